//! egsa87 - WGS84 <-> EGSA87 coordinate conversion
//!
//! egsa87 converts between WGS84 geographic coordinates and the Greek Grid
//! (GGRS87 / EGSA87, EPSG:2100): a transverse Mercator projection on GRS80
//! with a three-parameter datum shift. Easting is called X and northing Y.
//!
//! # Examples
//!
//! ## Point conversion
//!
//! ```
//! use egsa87::{egsa87_to_wgs84, wgs84_to_egsa87};
//!
//! // Athens
//! let (x, y) = wgs84_to_egsa87(37.9838, 23.7275);
//! assert_eq!((x.round(), y.round()), (475920.0, 4203765.0));
//!
//! // The inverse answers in (longitude, latitude) order
//! let (lon, lat) = egsa87_to_wgs84(x, y);
//! assert!((lat - 37.9838).abs() < 1e-7);
//! assert!((lon - 23.7275).abs() < 1e-7);
//! ```
//!
//! ## Well locations in DMS
//!
//! ```
//! use egsa87::{Dms, WellLocation};
//! use egsa87::location::DmsEntry;
//!
//! let location = WellLocation::new()
//!     .with_latitude(DmsEntry::from(Dms::new(37, 59, 1.7)?))
//!     .with_longitude(DmsEntry::from(Dms::new(23, 43, 39.0)?))
//!     .convert_to_egsa87()?;
//!
//! assert_eq!(location.egsa87().x(), Some(475920.0));
//! assert_eq!(location.egsa87().y(), Some(4203765.0));
//! # Ok::<(), egsa87::Error>(())
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod dms;
pub mod error;
pub mod location;
pub mod projection;
pub mod types;

pub use batch::{convert_csv, BatchOptions, BatchSummary};
pub use config::ServerConfig;
pub use dms::{parse_angle, Dms};
pub use error::{Error, Result};
pub use location::WellLocation;
pub use projection::{
    egsa87_to_wgs84, wgs84_to_egsa87, Coordinate, Datum, DatumTransform, Egsa87Converter, Geographic,
    ProjectionDefinition, Transformer,
};
pub use types::Direction;
