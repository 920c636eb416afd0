//! Batch conversion of CSV point lists.
//!
//! Input rows keep all of their columns; the converted pair is appended.
//! WGS84 input needs `latitude`/`longitude` columns (or `lat`/`lon`), EGSA87
//! input needs `x` (easting) and `y` (northing). Rows that cannot be parsed
//! are written with `INVALID` in the converted columns.

use std::io::{Read, Write};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ensure_finite, Error, Result};
use crate::projection::{Coordinate, Transformer};
use crate::types::{round_degrees, round_meters, Direction};

/// Marker written in place of a conversion result for unusable rows
pub const INVALID: &str = "INVALID";

#[derive(Debug, Deserialize)]
struct GeographicRow {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon")]
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GridRow {
    x: f64,
    y: f64,
}

/// Options for a batch run
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub direction: Direction,
    /// Round to whole metres (grid output) or 1e-7 degrees (geographic output)
    pub round: bool,
}

/// Counts from a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
}

/// Column names appended to the output, in output order
fn output_columns(direction: Direction) -> [&'static str; 2] {
    match direction {
        Direction::ToEgsa87 => ["x", "y"],
        Direction::ToWgs84 => ["latitude", "longitude"],
    }
}

fn check_headers(headers: &csv::ByteRecord, direction: Direction) -> Result<()> {
    let has = |names: &[&str]| {
        headers
            .iter()
            .any(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name.as_bytes())))
    };

    let ok = match direction {
        Direction::ToEgsa87 => has(&["latitude", "lat"]) && has(&["longitude", "lon"]),
        Direction::ToWgs84 => has(&["x"]) && has(&["y"]),
    };

    if ok {
        Ok(())
    } else {
        let required = match direction {
            Direction::ToEgsa87 => "latitude,longitude",
            Direction::ToWgs84 => "x,y",
        };
        Err(Error::InvalidInput(format!("CSV header must contain {}", required)))
    }
}

/// Parses one row into the source coordinate (GIS axis order)
///
/// Rows are kept as raw bytes so a field that is not UTF-8 fails only its own row.
fn parse_row(record: &csv::ByteRecord, headers: &csv::ByteRecord, direction: Direction) -> Result<Coordinate> {
    match direction {
        Direction::ToEgsa87 => {
            let row: GeographicRow = record.deserialize(Some(headers))?;
            Ok(Coordinate::from_lonlat(
                ensure_finite(row.longitude, "longitude")?,
                ensure_finite(row.latitude, "latitude")?,
            ))
        }
        Direction::ToWgs84 => {
            let row: GridRow = record.deserialize(Some(headers))?;
            Ok(Coordinate::from_easting_northing(
                ensure_finite(row.x, "x")?,
                ensure_finite(row.y, "y")?,
            ))
        }
    }
}

/// Formats a converted coordinate as the two appended output columns
fn format_result(result: Coordinate, options: &BatchOptions) -> [String; 2] {
    match (options.direction, options.round) {
        (Direction::ToEgsa87, true) => [round_meters(result.x).to_string(), round_meters(result.y).to_string()],
        (Direction::ToEgsa87, false) => [result.x.to_string(), result.y.to_string()],
        // Geographic output is (latitude, longitude), result is (lon, lat)
        (Direction::ToWgs84, true) => [round_degrees(result.y).to_string(), round_degrees(result.x).to_string()],
        (Direction::ToWgs84, false) => [result.y.to_string(), result.x.to_string()],
    }
}

/// Converts every row of `input` and writes the extended rows to `output`
///
/// Only I/O failures and an unusable header abort the run; every other
/// problem is confined to its row.
pub fn convert_csv<R: Read, W: Write>(input: R, output: W, options: &BatchOptions) -> Result<BatchSummary> {
    let start = Instant::now();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    // Lower-case header names so serde field names match case-insensitively
    let original_headers = reader.byte_headers()?.clone();
    let headers: csv::ByteRecord = original_headers
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    check_headers(&headers, options.direction)?;

    let records: Vec<csv::ByteRecord> = reader.byte_records().collect::<std::result::Result<_, _>>()?;
    debug!("Read {} rows for {}", records.len(), options.direction);

    let parsed: Vec<Option<Coordinate>> = records
        .par_iter()
        .map(|record| parse_row(record, &headers, options.direction).ok())
        .collect();

    let transformer = Transformer::for_direction(options.direction);
    let results: Vec<Option<Coordinate>> = parsed
        .par_iter()
        .map(|coord| coord.map(|coord| transformer.transform(coord)))
        .collect();

    let mut writer = csv::Writer::from_writer(output);
    let mut header_row: Vec<&[u8]> = original_headers.iter().collect();
    header_row.extend(output_columns(options.direction).map(str::as_bytes));
    writer.write_record(&header_row)?;

    let mut summary = BatchSummary {
        total: records.len(),
        ..BatchSummary::default()
    };

    for (index, (record, result)) in records.iter().zip(&results).enumerate() {
        let mut row: Vec<Vec<u8>> = record.iter().map(<[u8]>::to_vec).collect();
        if row.len() != original_headers.len() {
            warn!(
                "Row {} has {} fields, header has {}; padding or truncating",
                index + 1,
                row.len(),
                original_headers.len()
            );
            row.resize(original_headers.len(), Vec::new());
        }

        match result {
            Some(coord) => {
                row.extend(format_result(*coord, options).map(String::into_bytes));
                summary.converted += 1;
            }
            None => {
                warn!("Row {} could not be converted", index + 1);
                row.extend([INVALID.as_bytes().to_vec(), INVALID.as_bytes().to_vec()]);
                summary.failed += 1;
            }
        }

        writer.write_record(&row)?;
    }

    writer.flush()?;

    info!(
        "Converted {}/{} rows {} in {:.2} ms",
        summary.converted,
        summary.total,
        options.direction,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, direction: Direction, round: bool) -> (BatchSummary, String) {
        let mut output = Vec::new();
        let summary = convert_csv(input.as_bytes(), &mut output, &BatchOptions { direction, round }).unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_forward_batch() {
        let input = "latitude,longitude,name\n37.9838,23.7275,Athens\n40.6401,22.9444,Thessaloniki\n";
        let (summary, output) = run(input, Direction::ToEgsa87, true);

        assert_eq!(summary, BatchSummary { total: 2, converted: 2, failed: 0 });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "latitude,longitude,name,x,y");
        assert_eq!(lines[1], "37.9838,23.7275,Athens,475920,4203765");
        assert_eq!(lines[2], "40.6401,22.9444,Thessaloniki,410590,4499055");
    }

    #[test]
    fn test_inverse_batch_axis_order() {
        let input = "x,y\n475920,4203765\n";
        let (summary, output) = run(input, Direction::ToWgs84, true);

        assert_eq!(summary.converted, 1);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "x,y,latitude,longitude");
        let fields: Vec<f64> = lines[1].split(',').map(|f| f.parse().unwrap()).collect();
        assert!((fields[2] - 37.98380).abs() < 1e-4, "latitude column {}", fields[2]);
        assert!((fields[3] - 23.72750).abs() < 1e-4, "longitude column {}", fields[3]);
    }

    #[test]
    fn test_invalid_rows_are_marked() {
        let input = "lat,lon\n37.9838,23.7275\nabc,23.0\n,\n";
        let (summary, output) = run(input, Direction::ToEgsa87, true);

        assert_eq!(summary, BatchSummary { total: 3, converted: 1, failed: 2 });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], "abc,23.0,INVALID,INVALID");
        assert!(lines[3].ends_with("INVALID,INVALID"));
    }

    #[test]
    fn test_missing_columns() {
        let mut output = Vec::new();
        let options = BatchOptions { direction: Direction::ToWgs84, round: false };
        let result = convert_csv("latitude,longitude\n1,2\n".as_bytes(), &mut output, &options);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_non_utf8_row_does_not_abort() {
        let input: &[u8] = b"latitude,longitude\n37.9838,23.7275\n\xff\xfe,23.0\n40.6401,22.9444\n";
        let mut output = Vec::new();
        let options = BatchOptions { direction: Direction::ToEgsa87, round: true };
        let summary = convert_csv(input, &mut output, &options).unwrap();

        assert_eq!(summary, BatchSummary { total: 3, converted: 2, failed: 1 });
        let lines: Vec<&[u8]> = output.split(|&b| b == b'\n').collect();
        assert_eq!(lines[1], b"37.9838,23.7275,475920,4203765");
        assert_eq!(lines[2], b"\xff\xfe,23.0,INVALID,INVALID");
        assert_eq!(lines[3], b"40.6401,22.9444,410590,4499055");
    }

    #[test]
    fn test_ragged_rows_keep_columns_aligned() {
        let input = "latitude,longitude,name\n37.9838,23.7275,Athens,extra\n37.9838,23.7275\n";
        let (summary, output) = run(input, Direction::ToEgsa87, true);

        assert_eq!(summary.converted, 2);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "37.9838,23.7275,Athens,475920,4203765");
        assert_eq!(lines[2], "37.9838,23.7275,,475920,4203765");
    }

    #[test]
    fn test_header_case_is_ignored() {
        let (summary, _) = run("Latitude,Longitude\n37.9838,23.7275\n", Direction::ToEgsa87, false);
        assert_eq!(summary.converted, 1);
    }
}
