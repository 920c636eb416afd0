use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::location::WellLocation;
use crate::types::Direction;
use crate::Error;

/// Query for `GET /api/egsa87`; angles as decimal degrees or DMS
#[derive(Debug, Serialize, Deserialize)]
pub struct ForwardRequest {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForwardResponse {
    pub latitude: f64,
    pub longitude: f64,
    /// Easting in metres
    pub x: f64,
    /// Northing in metres
    pub y: f64,
    pub x_rounded: f64,
    pub y_rounded: f64,
}

/// Query for `GET /api/wgs84`
#[derive(Debug, Serialize, Deserialize)]
pub struct InverseRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InverseResponse {
    pub x: f64,
    pub y: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub latitude_dms: String,
    pub longitude_dms: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationRequest {
    pub direction: Direction,
    pub location: WellLocation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error answered with a status code and a JSON body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let status = match error {
            Error::Incomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidDms(_)
            | Error::NonFinite(_)
            | Error::InvalidInput(_)
            | Error::Unsupported(_)
            | Error::Csv(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Projection(_) | Error::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}
