use crate::projection::coordinate::Coordinate;
use crate::projection::ellipsoid::Ellipsoid;

/// Arc-seconds to radians
const ARCSEC: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Represents the geodetic datums handled by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datum {
    /// WGS 84, the GPS datum
    WGS84,
    /// Greek Geodetic Reference System 1987, the datum of EGSA87
    GGRS87,
}

impl Datum {
    /// Returns the reference ellipsoid of this datum
    pub fn ellipsoid(&self) -> Ellipsoid {
        match self {
            Datum::WGS84 => Ellipsoid::WGS84,
            Datum::GGRS87 => Ellipsoid::GRS80,
        }
    }

    /// Returns the Helmert parameters that take this datum to WGS84
    pub fn to_wgs84(&self) -> Helmert {
        match self {
            Datum::WGS84 => Helmert::IDENTITY,
            Datum::GGRS87 => Helmert::GGRS87_TO_WGS84,
        }
    }

    /// Converts datum to PROJ string representation
    pub fn to_proj_string(&self) -> String {
        match self {
            Datum::WGS84 => "+datum=WGS84".to_string(),
            Datum::GGRS87 => format!("+ellps={} {}", self.ellipsoid().name, self.to_wgs84().to_proj_string()),
        }
    }
}

/// Seven-parameter Helmert transformation, position-vector convention
///
/// Maps geocentric coordinates of a local datum onto WGS84, the same way PROJ
/// interprets `+towgs84`. Rotations are in arc-seconds, scale in ppm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmert {
    pub translation: [f64; 3],
    pub rotation_arcsec: [f64; 3],
    pub scale_ppm: f64,
}

impl Helmert {
    pub const IDENTITY: Helmert = Helmert {
        translation: [0.0, 0.0, 0.0],
        rotation_arcsec: [0.0, 0.0, 0.0],
        scale_ppm: 0.0,
    };

    /// GGRS87 -> WGS84, translations only
    pub const GGRS87_TO_WGS84: Helmert = Helmert {
        translation: [-199.87, 74.79, 246.62],
        rotation_arcsec: [0.0, 0.0, 0.0],
        scale_ppm: 0.0,
    };

    fn scale(&self) -> f64 {
        1.0 + self.scale_ppm * 1e-6
    }

    fn rotation(&self) -> [f64; 3] {
        [
            self.rotation_arcsec[0] * ARCSEC,
            self.rotation_arcsec[1] * ARCSEC,
            self.rotation_arcsec[2] * ARCSEC,
        ]
    }

    /// Applies the shift: local geocentric -> WGS84 geocentric
    pub fn apply(&self, xyz: &[f64; 3]) -> [f64; 3] {
        let [x, y, z] = *xyz;
        let [rx, ry, rz] = self.rotation();
        let m = self.scale();
        let [dx, dy, dz] = self.translation;

        [
            dx + m * (x - rz * y + ry * z),
            dy + m * (rz * x + y - rx * z),
            dz + m * (-ry * x + rx * y + z),
        ]
    }

    /// Applies the inverse shift: WGS84 geocentric -> local geocentric
    pub fn apply_inverse(&self, xyz: &[f64; 3]) -> [f64; 3] {
        let [rx, ry, rz] = self.rotation();
        let m = self.scale();
        let [dx, dy, dz] = self.translation;

        let x = (xyz[0] - dx) / m;
        let y = (xyz[1] - dy) / m;
        let z = (xyz[2] - dz) / m;

        [
            x + rz * y - ry * z,
            -rz * x + y + rx * z,
            ry * x - rx * y + z,
        ]
    }

    /// Returns the PROJ `+towgs84` parameter
    pub fn to_proj_string(&self) -> String {
        format!("+towgs84={}", self.parameters())
    }

    /// The seven parameters as PROJ lists them: `dx,dy,dz,rx,ry,rz,ds`
    pub fn parameters(&self) -> String {
        let [dx, dy, dz] = self.translation;
        let [rx, ry, rz] = self.rotation_arcsec;
        format!("{},{},{},{},{},{},{}", dx, dy, dz, rx, ry, rz, self.scale_ppm)
    }
}

/// Transforms geographic coordinates between two geodetic datums
///
/// Input heights are taken as zero on the source ellipsoid and the resulting
/// height on the target ellipsoid is discarded.
#[derive(Debug, Clone, Copy)]
pub struct DatumTransform {
    from_datum: Datum,
    to_datum: Datum,
}

impl DatumTransform {
    /// Creates a new datum transformation between two datums
    pub fn new(from_datum: Datum, to_datum: Datum) -> Self {
        Self { from_datum, to_datum }
    }

    /// Transforms latitude/longitude in radians between datums
    pub fn transform_radians(&self, lat: f64, lon: f64) -> (f64, f64) {
        if self.from_datum == self.to_datum {
            return (lat, lon);
        }

        let source = self.from_datum.ellipsoid();
        let target = self.to_datum.ellipsoid();

        let local = source.geodetic_to_geocentric(lat, lon, 0.0);
        let wgs84 = self.from_datum.to_wgs84().apply(&local);
        let shifted = self.to_datum.to_wgs84().apply_inverse(&wgs84);

        let (lat, lon, _height) = target.geocentric_to_geodetic(&shifted);
        (lat, lon)
    }

    /// Transforms a (lon, lat) coordinate in degrees between datums
    pub fn transform(&self, coord: Coordinate) -> Coordinate {
        let (lat, lon) = self.transform_radians(coord.y.to_radians(), coord.x.to_radians());
        Coordinate::new_3d(lon.to_degrees(), lat.to_degrees(), coord.z)
    }

    /// Returns the source datum
    pub fn from_datum(&self) -> Datum {
        self.from_datum
    }

    /// Returns the target datum
    pub fn to_datum(&self) -> Datum {
        self.to_datum
    }
}
