use axum::{
    body::Body,
    extract::{multipart::Multipart, Query},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::{debug, info};

use super::models::*;
use crate::batch::{convert_csv, BatchOptions};
use crate::dms::{parse_angle, Dms};
use crate::error::ensure_finite;
use crate::location::WellLocation;
use crate::projection::{egsa87_to_wgs84, wgs84_to_egsa87};
use crate::types::{round_meters, Direction};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn to_egsa87(Query(req): Query<ForwardRequest>) -> Result<Json<ForwardResponse>, ApiError> {
    let latitude = parse_angle(&req.latitude)?;
    let longitude = parse_angle(&req.longitude)?;

    let (x, y) = wgs84_to_egsa87(latitude, longitude);
    debug!("WGS84 ({}, {}) -> EGSA87 ({:.3}, {:.3})", latitude, longitude, x, y);

    Ok(Json(ForwardResponse {
        latitude,
        longitude,
        x,
        y,
        x_rounded: round_meters(x),
        y_rounded: round_meters(y),
    }))
}

pub async fn to_wgs84(Query(req): Query<InverseRequest>) -> Result<Json<InverseResponse>, ApiError> {
    let x = ensure_finite(req.x, "x")?;
    let y = ensure_finite(req.y, "y")?;

    let (longitude, latitude) = egsa87_to_wgs84(x, y);
    debug!("EGSA87 ({}, {}) -> WGS84 ({:.8}, {:.8})", x, y, latitude, longitude);

    Ok(Json(InverseResponse {
        x,
        y,
        longitude,
        latitude,
        latitude_dms: Dms::from_decimal(latitude)?.to_string(),
        longitude_dms: Dms::from_decimal(longitude)?.to_string(),
    }))
}

pub async fn convert_location(Json(req): Json<LocationRequest>) -> Result<Json<WellLocation>, ApiError> {
    let converted = match req.direction {
        Direction::ToEgsa87 => req.location.convert_to_egsa87()?,
        Direction::ToWgs84 => req.location.convert_to_wgs84()?,
    };

    Ok(Json(converted))
}

pub async fn upload_csv(mut multipart: Multipart) -> Result<Response, ApiError> {
    let mut csv_data: Option<Vec<u8>> = None;
    let mut direction = Direction::ToEgsa87;
    let mut round = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csv" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read CSV: {}", e)))?;
                csv_data = Some(bytes.to_vec());
            }
            "direction" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read direction: {}", e)))?;
                direction = text.parse()?;
            }
            "round" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read round: {}", e)))?;
                round = matches!(text.trim(), "true" | "1" | "yes");
            }
            _ => {}
        }
    }

    let csv_data = csv_data.ok_or_else(|| ApiError::bad_request("Missing CSV file"))?;
    info!("Batch upload: {} bytes, {}", csv_data.len(), direction);

    let options = BatchOptions { direction, round };
    let (summary, output) = tokio::task::spawn_blocking(move || {
        let mut output = Vec::with_capacity(csv_data.len() * 2);
        convert_csv(csv_data.as_slice(), &mut output, &options).map(|summary| (summary, output))
    })
    .await
    .map_err(|e| ApiError::internal(format!("Batch task failed: {}", e)))??;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref())
        .header(header::CONTENT_DISPOSITION, "attachment; filename=\"converted.csv\"")
        .header("x-rows-total", summary.total)
        .header("x-rows-converted", summary.converted)
        .header("x-rows-failed", summary.failed)
        .body(Body::from(output))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {}", e)))
}
