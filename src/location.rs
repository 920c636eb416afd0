//! Well location form state.
//!
//! A well location is entered either as WGS84 degrees-minutes-seconds or as
//! EGSA87 grid metres and converted on request. Every field is optional so an
//! angle of exactly zero is distinguishable from a field the user has not
//! filled in yet. Values are immutable; each update returns a new location.
//!
//! The serialized shape is the one stored in worksheet records:
//!
//! ```json
//! {
//!   "coordinatesWGS84": {
//!     "f": { "degrees": 37, "minutes": 59, "seconds": 1.7 },
//!     "l": { "degrees": 23, "minutes": 43, "seconds": 39.0 }
//!   },
//!   "coordinatesEGSA87": { "y": 4203765.0, "x": 475920.0 },
//!   "altitude": 120.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::dms::Dms;
use crate::error::{ensure_finite, Error, Result};
use crate::projection::transformer::{egsa87_to_wgs84, wgs84_to_egsa87};
use crate::projection::{Coordinate, Geographic};
use crate::types::round_meters;

/// A partially entered degrees-minutes-seconds angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DmsEntry {
    #[serde(default)]
    degrees: Option<i32>,
    #[serde(default)]
    minutes: Option<u32>,
    #[serde(default)]
    seconds: Option<f64>,
}

impl DmsEntry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_degrees(self, degrees: Option<i32>) -> Self {
        Self { degrees, ..self }
    }

    pub fn with_minutes(self, minutes: Option<u32>) -> Self {
        Self { minutes, ..self }
    }

    pub fn with_seconds(self, seconds: Option<f64>) -> Self {
        Self { seconds, ..self }
    }

    pub fn degrees(&self) -> Option<i32> {
        self.degrees
    }

    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    pub fn seconds(&self) -> Option<f64> {
        self.seconds
    }

    /// True when degrees, minutes and seconds have all been entered
    pub fn is_complete(&self) -> bool {
        self.degrees.is_some() && self.minutes.is_some() && self.seconds.is_some()
    }

    /// Returns the validated angle, or `Error::Incomplete` naming `what`
    pub fn complete(&self, what: &'static str) -> Result<Dms> {
        match (self.degrees, self.minutes, self.seconds) {
            (Some(degrees), Some(minutes), Some(seconds)) => Dms::new(degrees, minutes, seconds),
            _ => Err(Error::Incomplete(what)),
        }
    }
}

impl From<Dms> for DmsEntry {
    fn from(dms: Dms) -> Self {
        Self {
            degrees: Some(dms.degrees()),
            minutes: Some(dms.minutes()),
            seconds: Some(dms.seconds()),
        }
    }
}

/// Latitude (φ, `f`) and longitude (λ, `l`) entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wgs84Entry {
    #[serde(default)]
    f: DmsEntry,
    #[serde(default)]
    l: DmsEntry,
}

/// EGSA87 grid entry: `x` is the easting, `y` the northing, in metres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Egsa87Entry {
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    x: Option<f64>,
}

impl Egsa87Entry {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { y, x }
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// Location of a well as held by the worksheet form
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WellLocation {
    #[serde(rename = "coordinatesWGS84", default)]
    wgs84: Wgs84Entry,
    #[serde(rename = "coordinatesEGSA87", default)]
    egsa87: Egsa87Entry,
    #[serde(default)]
    altitude: Option<f64>,
}

impl WellLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latitude(&self) -> DmsEntry {
        self.wgs84.f
    }

    pub fn longitude(&self) -> DmsEntry {
        self.wgs84.l
    }

    pub fn egsa87(&self) -> Egsa87Entry {
        self.egsa87
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn with_latitude(self, latitude: DmsEntry) -> Self {
        Self {
            wgs84: Wgs84Entry { f: latitude, ..self.wgs84 },
            ..self
        }
    }

    pub fn with_longitude(self, longitude: DmsEntry) -> Self {
        Self {
            wgs84: Wgs84Entry { l: longitude, ..self.wgs84 },
            ..self
        }
    }

    pub fn with_egsa87(self, egsa87: Egsa87Entry) -> Self {
        Self { egsa87, ..self }
    }

    pub fn with_altitude(self, altitude: Option<f64>) -> Self {
        Self { altitude, ..self }
    }

    /// The WGS84 position, once all six DMS fields are entered
    pub fn geographic(&self) -> Result<Geographic> {
        let latitude = self.wgs84.f.complete("latitude")?;
        let longitude = self.wgs84.l.complete("longitude")?;
        Ok(Geographic::from_dms(&latitude, &longitude))
    }

    /// The EGSA87 (easting, northing) coordinate, once x and y are entered
    pub fn projected(&self) -> Result<Coordinate> {
        let x = self.egsa87.x.ok_or(Error::Incomplete("EGSA87 x"))?;
        let y = self.egsa87.y.ok_or(Error::Incomplete("EGSA87 y"))?;
        Ok(Coordinate::from_easting_northing(
            ensure_finite(x, "EGSA87 x")?,
            ensure_finite(y, "EGSA87 y")?,
        ))
    }

    /// Fills the EGSA87 fields from the WGS84 fields, rounded to whole metres
    pub fn convert_to_egsa87(&self) -> Result<Self> {
        let geo = self.geographic()?;
        let (x, y) = wgs84_to_egsa87(geo.latitude, geo.longitude);
        Ok(self.with_egsa87(Egsa87Entry::new(Some(round_meters(x)), Some(round_meters(y)))))
    }

    /// Fills the WGS84 fields from the EGSA87 fields, seconds rounded to 0.1"
    pub fn convert_to_wgs84(&self) -> Result<Self> {
        let grid = self.projected()?;
        let (longitude, latitude) = egsa87_to_wgs84(grid.x, grid.y);
        let latitude = Dms::from_decimal(latitude)?;
        let longitude = Dms::from_decimal(longitude)?;
        Ok(self
            .with_latitude(latitude.into())
            .with_longitude(longitude.into()))
    }

    /// Moves the location to a map marker position
    ///
    /// The grid fields no longer describe the new position and are cleared.
    pub fn with_marker_position(&self, position: Geographic) -> Result<Self> {
        let (latitude, longitude) = position.to_dms()?;
        Ok(self
            .with_latitude(latitude.into())
            .with_longitude(longitude.into())
            .with_egsa87(Egsa87Entry::default()))
    }

    /// Decimal-degree position for map display, `None` while incomplete
    pub fn map_position(&self) -> Option<Geographic> {
        self.geographic().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(degrees: i32, minutes: u32, seconds: f64) -> DmsEntry {
        DmsEntry::empty()
            .with_degrees(Some(degrees))
            .with_minutes(Some(minutes))
            .with_seconds(Some(seconds))
    }

    fn athens() -> WellLocation {
        WellLocation::new()
            .with_latitude(entry(37, 59, 1.7))
            .with_longitude(entry(23, 43, 39.0))
    }

    #[test]
    fn test_zero_is_not_missing() {
        let zero = entry(0, 0, 0.0);
        assert!(zero.is_complete());
        assert_eq!(zero.complete("latitude").unwrap().to_decimal(), 0.0);

        let missing = DmsEntry::empty().with_degrees(Some(37)).with_minutes(Some(0));
        assert!(!missing.is_complete());
        assert!(matches!(missing.complete("latitude"), Err(Error::Incomplete("latitude"))));
    }

    #[test]
    fn test_updates_return_new_values() {
        let location = WellLocation::new();
        let updated = location.with_altitude(Some(120.0));
        assert_eq!(location.altitude(), None);
        assert_eq!(updated.altitude(), Some(120.0));

        let moved = updated.with_latitude(entry(38, 0, 0.0));
        assert_eq!(moved.altitude(), Some(120.0));
        assert_eq!(moved.latitude().degrees(), Some(38));
        assert_eq!(moved.longitude(), DmsEntry::empty());
    }

    #[test]
    fn test_convert_to_egsa87() {
        let converted = athens().convert_to_egsa87().unwrap();
        assert_eq!(converted.egsa87().x(), Some(475_920.0));
        assert_eq!(converted.egsa87().y(), Some(4_203_765.0));
        // The WGS84 side is untouched
        assert_eq!(converted.latitude(), athens().latitude());
    }

    #[test]
    fn test_convert_incomplete_is_refused() {
        let partial = WellLocation::new().with_latitude(entry(37, 59, 1.7));
        assert!(matches!(partial.convert_to_egsa87(), Err(Error::Incomplete("longitude"))));

        let grid_only_x = WellLocation::new().with_egsa87(Egsa87Entry::new(Some(475_920.0), None));
        assert!(matches!(grid_only_x.convert_to_wgs84(), Err(Error::Incomplete("EGSA87 y"))));
    }

    #[test]
    fn test_convert_to_wgs84() {
        let location = WellLocation::new()
            .with_egsa87(Egsa87Entry::new(Some(475_920.0), Some(4_203_765.0)));
        let converted = location.convert_to_wgs84().unwrap();

        let latitude = converted.latitude();
        assert_eq!(latitude.degrees(), Some(37));
        assert_eq!(latitude.minutes(), Some(59));
        assert!((latitude.seconds().unwrap() - 1.7).abs() < 1e-9);

        let longitude = converted.longitude();
        assert_eq!(longitude.degrees(), Some(23));
        assert_eq!(longitude.minutes(), Some(43));
        assert!((longitude.seconds().unwrap() - 39.0).abs() < 1e-9);
    }

    #[test]
    fn test_marker_position_clears_grid() {
        let converted = athens().convert_to_egsa87().unwrap();
        let moved = converted
            .with_marker_position(Geographic::new(40.6401, 22.9444))
            .unwrap();

        assert_eq!(moved.egsa87(), Egsa87Entry::default());
        assert_eq!(moved.latitude().degrees(), Some(40));
        assert_eq!(moved.latitude().minutes(), Some(38));
        assert_eq!(moved.longitude().degrees(), Some(22));
        assert_eq!(moved.longitude().minutes(), Some(56));
    }

    #[test]
    fn test_map_position() {
        assert!(WellLocation::new().map_position().is_none());
        let position = athens().map_position().unwrap();
        assert!((position.latitude - 37.983_805_6).abs() < 1e-6);
        assert!((position.longitude - 23.7275).abs() < 1e-9);
    }

    #[test]
    fn test_stored_document_shape() {
        let json = r#"{
            "coordinatesWGS84": {
                "f": { "degrees": 37, "minutes": 59, "seconds": 1.7 },
                "l": { "degrees": 23, "minutes": 43, "seconds": 39.0 }
            },
            "coordinatesEGSA87": { "y": 4203765.0, "x": 475920.0 },
            "altitude": 120.0
        }"#;
        let location: WellLocation = serde_json::from_str(json).unwrap();
        assert_eq!(location.latitude(), entry(37, 59, 1.7));
        assert_eq!(location.egsa87().x(), Some(475_920.0));
        assert_eq!(location.altitude(), Some(120.0));

        let value = serde_json::to_value(location).unwrap();
        assert_eq!(value["coordinatesWGS84"]["l"]["minutes"], 43);
        assert_eq!(value["coordinatesEGSA87"]["y"], 4203765.0);
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let location: WellLocation =
            serde_json::from_str(r#"{"coordinatesWGS84":{"f":{"degrees":37}}}"#).unwrap();
        assert_eq!(location.latitude().degrees(), Some(37));
        assert_eq!(location.latitude().minutes(), None);
        assert!(!location.egsa87().is_complete());
        assert!(location.map_position().is_none());
    }
}
