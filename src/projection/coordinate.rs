use serde::{Deserialize, Serialize};

use crate::dms::Dms;
use crate::error::Result;

/// Represents a coordinate in either reference system, in GIS axis order
///
/// `x` is the longitude (degrees) or the easting (metres), `y` is the latitude
/// (degrees) or the northing (metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Coordinate {
    /// Creates a new 2D coordinate (z = 0.0)
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Creates a new 3D coordinate
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate from longitude/latitude in degrees (WGS84)
    pub fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat)
    }

    /// Creates a coordinate from EGSA87 easting/northing in metres
    pub fn from_easting_northing(easting: f64, northing: f64) -> Self {
        Self::new(easting, northing)
    }

    /// Returns the coordinate with x and y rounded to the nearest metre
    pub fn rounded(&self) -> Self {
        Self::new_3d(self.x.round(), self.y.round(), self.z)
    }

    /// Returns true when both planar components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A WGS84 geographic position in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geographic {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geographic {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a position from latitude (φ) and longitude (λ) angles
    pub fn from_dms(latitude: &Dms, longitude: &Dms) -> Self {
        Self::new(latitude.to_decimal(), longitude.to_decimal())
    }

    /// Splits both angles into degrees, minutes and seconds (0.1" precision)
    pub fn to_dms(&self) -> Result<(Dms, Dms)> {
        Ok((Dms::from_decimal(self.latitude)?, Dms::from_decimal(self.longitude)?))
    }

    /// Returns the position as a (lon, lat) coordinate
    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate::from_lonlat(self.longitude, self.latitude)
    }
}

impl From<Coordinate> for Geographic {
    fn from(coord: Coordinate) -> Self {
        Self::new(coord.y, coord.x)
    }
}
