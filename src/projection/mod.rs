//! Geodetic datums, the transverse Mercator projection and the
//! WGS84 <-> EGSA87 converter built from them.

pub mod coordinate;
pub mod custom;
pub mod datum;
pub mod ellipsoid;
pub mod tmerc;
pub mod transformer;

pub use coordinate::{Coordinate, Geographic};
#[cfg(feature = "proj")]
pub use custom::CustomProjection;
pub use custom::{ProjectionBuilder, ProjectionDefinition};
pub use datum::{Datum, DatumTransform, Helmert};
pub use ellipsoid::Ellipsoid;
pub use tmerc::{TransverseMercator, TransverseMercatorParams};
pub use transformer::{egsa87_to_wgs84, wgs84_to_egsa87, Egsa87Converter, Transformer};

/// EPSG codes of the supported reference systems
pub mod epsg {
    /// WGS 84 geographic, degrees
    pub const WGS84: u16 = 4326;
    /// GGRS87 / Greek Grid (EGSA87), metres
    pub const EGSA87: u16 = 2100;
}
