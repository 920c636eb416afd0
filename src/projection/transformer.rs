use std::sync::OnceLock;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::projection::coordinate::Coordinate;
use crate::projection::datum::{Datum, DatumTransform};
use crate::projection::epsg;
use crate::projection::tmerc::{TransverseMercator, TransverseMercatorParams};
use crate::types::Direction;

/// Converts between WGS84 geographic and EGSA87 projected coordinates
///
/// Pure and `Copy`; share it freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct Egsa87Converter {
    projection: TransverseMercator,
    to_local: DatumTransform,
    to_wgs84: DatumTransform,
}

impl Egsa87Converter {
    pub fn new() -> Self {
        Self {
            projection: TransverseMercator::new(TransverseMercatorParams::EGSA87),
            to_local: DatumTransform::new(Datum::WGS84, Datum::GGRS87),
            to_wgs84: DatumTransform::new(Datum::GGRS87, Datum::WGS84),
        }
    }

    /// WGS84 (lon, lat) in degrees -> EGSA87 (easting, northing) in metres
    pub fn to_egsa87(&self, coord: Coordinate) -> Coordinate {
        let (lat, lon) = self
            .to_local
            .transform_radians(coord.y.to_radians(), coord.x.to_radians());
        let (easting, northing) = self.projection.forward_radians(lat, lon);
        Coordinate::new_3d(easting, northing, coord.z)
    }

    /// EGSA87 (easting, northing) in metres -> WGS84 (lon, lat) in degrees
    pub fn to_wgs84(&self, coord: Coordinate) -> Coordinate {
        let (lat, lon) = self.projection.inverse_radians(coord.x, coord.y);
        let (lat, lon) = self.to_wgs84.transform_radians(lat, lon);
        Coordinate::new_3d(lon.to_degrees(), lat.to_degrees(), coord.z)
    }

    pub fn convert(&self, coord: Coordinate, direction: Direction) -> Coordinate {
        match direction {
            Direction::ToEgsa87 => self.to_egsa87(coord),
            Direction::ToWgs84 => self.to_wgs84(coord),
        }
    }
}

impl Default for Egsa87Converter {
    fn default() -> Self {
        Self::new()
    }
}

fn converter() -> &'static Egsa87Converter {
    static CONVERTER: OnceLock<Egsa87Converter> = OnceLock::new();
    CONVERTER.get_or_init(Egsa87Converter::new)
}

/// Converts WGS84 latitude/longitude (decimal degrees) to EGSA87.
///
/// Returns `(x, y)`: x is the easting and y the northing, in metres, at full
/// precision. Callers round to whole metres for display or storage. No input
/// checks are made; `(0, 0)` yields a defined but meaningless pair and NaN
/// propagates.
pub fn wgs84_to_egsa87(latitude: f64, longitude: f64) -> (f64, f64) {
    let grid = converter().to_egsa87(Coordinate::from_lonlat(longitude, latitude));
    (grid.x, grid.y)
}

/// Converts EGSA87 easting `x` / northing `y` (metres) to WGS84.
///
/// Returns `(longitude, latitude)` in decimal degrees, longitude first.
pub fn egsa87_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let geo = converter().to_wgs84(Coordinate::from_easting_northing(x, y));
    (geo.x, geo.y)
}

/// Transforms coordinates between EPSG:4326 and EPSG:2100
pub struct Transformer {
    direction: Direction,
    from_epsg: u16,
    to_epsg: u16,
}

impl Transformer {
    /// Creates a new transformer from source to target CRS using EPSG codes
    pub fn new(from_epsg: u16, to_epsg: u16) -> Result<Self> {
        let direction = match (from_epsg, to_epsg) {
            (epsg::WGS84, epsg::EGSA87) => Direction::ToEgsa87,
            (epsg::EGSA87, epsg::WGS84) => Direction::ToWgs84,
            _ => {
                return Err(Error::Unsupported(format!(
                    "transformation EPSG:{} -> EPSG:{}",
                    from_epsg, to_epsg
                )))
            }
        };

        Ok(Self {
            direction,
            from_epsg,
            to_epsg,
        })
    }

    /// Creates a transformer for a conversion direction
    pub fn for_direction(direction: Direction) -> Self {
        let (from_epsg, to_epsg) = match direction {
            Direction::ToEgsa87 => (epsg::WGS84, epsg::EGSA87),
            Direction::ToWgs84 => (epsg::EGSA87, epsg::WGS84),
        };

        Self {
            direction,
            from_epsg,
            to_epsg,
        }
    }

    /// Transforms a coordinate from source to target CRS
    pub fn transform(&self, coord: Coordinate) -> Coordinate {
        converter().convert(coord, self.direction)
    }

    /// Transforms multiple coordinates in parallel, preserving order
    pub fn transform_many(&self, coords: &[Coordinate]) -> Vec<Coordinate> {
        let converter = converter();
        coords
            .par_iter()
            .map(|&coord| converter.convert(coord, self.direction))
            .collect()
    }

    /// Transforms a coordinate from target back to source CRS
    pub fn transform_inverse(&self, coord: Coordinate) -> Coordinate {
        converter().convert(coord, self.direction.reversed())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the source EPSG code
    pub fn from_epsg(&self) -> u16 {
        self.from_epsg
    }

    /// Returns the target EPSG code
    pub fn to_epsg(&self) -> u16 {
        self.to_epsg
    }
}
