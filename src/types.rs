//! Core data types for egsa87

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Direction of a conversion between the two reference systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// WGS84 geographic (latitude, longitude) to EGSA87 grid (x, y)
    ToEgsa87,
    /// EGSA87 grid (x, y) to WGS84 geographic (longitude, latitude)
    ToWgs84,
}

impl Direction {
    /// Returns the opposite direction
    pub fn reversed(&self) -> Self {
        match self {
            Direction::ToEgsa87 => Direction::ToWgs84,
            Direction::ToWgs84 => Direction::ToEgsa87,
        }
    }

    /// Returns the name of this direction
    pub fn name(&self) -> &'static str {
        match self {
            Direction::ToEgsa87 => "to-egsa87",
            Direction::ToWgs84 => "to-wgs84",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "to-egsa87" | "egsa87" | "forward" => Ok(Direction::ToEgsa87),
            "to-wgs84" | "wgs84" | "inverse" => Ok(Direction::ToWgs84),
            other => Err(Error::Unsupported(format!("conversion direction '{}'", other))),
        }
    }
}

/// Rounds a projected value to the nearest whole metre
pub fn round_meters(value: f64) -> f64 {
    value.round()
}

/// Rounds a decimal-degree value to 1e-7 degrees (about 1 cm on the ground)
pub fn round_degrees(value: f64) -> f64 {
    (value * 1e7).round() / 1e7
}

/// Rounds an arc-second value to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
