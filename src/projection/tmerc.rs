//! Transverse Mercator projection.
//!
//! Krüger series to sixth order in the third flattening n, following
//! Karney, "Transverse Mercator with an accuracy of a few nanometres" (2011).
//! Errors stay below a millimetre within several degrees of the central
//! meridian, which covers the whole of Greece for `lon_0 = 24°`.

use crate::projection::coordinate::Coordinate;
use crate::projection::ellipsoid::Ellipsoid;

const ORDER: usize = 6;

/// Newton iterations when recovering tan(φ) from the conformal latitude
const MAX_ITERATIONS: usize = 15;

/// Transverse Mercator parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercatorParams {
    pub ellipsoid: Ellipsoid,
    /// Latitude of origin, degrees
    pub latitude_of_origin: f64,
    /// Central meridian, degrees
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl TransverseMercatorParams {
    /// EGSA87 / Greek Grid (EPSG:2100)
    pub const EGSA87: TransverseMercatorParams = TransverseMercatorParams {
        ellipsoid: Ellipsoid::GRS80,
        latitude_of_origin: 0.0,
        central_meridian: 24.0,
        scale_factor: 0.9996,
        false_easting: 500_000.0,
        false_northing: 0.0,
    };
}

/// A transverse Mercator projection with precomputed series coefficients
#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    params: TransverseMercatorParams,
    eccentricity: f64,
    /// Rectifying radius times the scale factor
    k0_a: f64,
    alpha: [f64; ORDER],
    beta: [f64; ORDER],
    /// Northing of the latitude of origin on the central meridian
    origin_northing: f64,
}

impl TransverseMercator {
    pub fn new(params: TransverseMercatorParams) -> Self {
        let ellipsoid = params.ellipsoid;
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying_radius =
            ellipsoid.semi_major / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1118711.0 * n6 / 3870720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
            4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
            20648693.0 * n6 / 638668800.0,
        ];

        let mut projection = Self {
            params,
            eccentricity: ellipsoid.eccentricity(),
            k0_a: params.scale_factor * rectifying_radius,
            alpha,
            beta,
            origin_northing: 0.0,
        };

        if params.latitude_of_origin != 0.0 {
            let (xi, _) = projection.gauss_krueger(params.latitude_of_origin.to_radians(), 0.0);
            projection.origin_northing = projection.k0_a * xi;
        }

        projection
    }

    pub fn params(&self) -> &TransverseMercatorParams {
        &self.params
    }

    /// Returns the ellipsoidal (ξ, η) of a point `dlon` radians from the central meridian
    fn gauss_krueger(&self, lat: f64, dlon: f64) -> (f64, f64) {
        let e = self.eccentricity;
        let sin_lat = lat.sin();
        // tan of the conformal latitude
        let tau = (sin_lat.atanh() - e * (e * sin_lat).atanh()).sinh();

        let xi_p = tau.atan2(dlon.cos());
        let eta_p = (dlon.sin() / tau.hypot(1.0)).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        (xi, eta)
    }

    /// Projects geodetic latitude/longitude (radians) to (easting, northing) in metres
    pub fn forward_radians(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlon = lon - self.params.central_meridian.to_radians();
        let (xi, eta) = self.gauss_krueger(lat, dlon);

        let easting = self.params.false_easting + self.k0_a * eta;
        let northing = self.params.false_northing + self.k0_a * xi - self.origin_northing;
        (easting, northing)
    }

    /// Unprojects (easting, northing) in metres to geodetic (lat, lon) in radians
    pub fn inverse_radians(&self, easting: f64, northing: f64) -> (f64, f64) {
        let xi = (northing - self.params.false_northing + self.origin_northing) / self.k0_a;
        let eta = (easting - self.params.false_easting) / self.k0_a;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let tau_p = xi_p.sin() / eta_p.sinh().hypot(xi_p.cos());
        let tau = self.conformal_to_geodetic_tan(tau_p);

        let lat = tau.atan();
        let lon = self.params.central_meridian.to_radians() + eta_p.sinh().atan2(xi_p.cos());
        (lat, lon)
    }

    /// Solves tan(φ) from tan(χ) of the conformal latitude by Newton's method
    fn conformal_to_geodetic_tan(&self, tau_p: f64) -> f64 {
        let e = self.eccentricity;
        let e2m = 1.0 - e * e;
        let mut tau = tau_p;

        for _ in 0..MAX_ITERATIONS {
            let sigma = (e * (e * tau / tau.hypot(1.0)).atanh()).sinh();
            let tau_i = tau * sigma.hypot(1.0) - sigma * tau.hypot(1.0);
            let delta = (tau_p - tau_i) / tau_i.hypot(1.0) * (1.0 + e2m * tau * tau)
                / (e2m * tau.hypot(1.0));
            tau += delta;
            if delta.abs() < 1e-12 || delta.is_nan() {
                break;
            }
        }

        tau
    }

    /// Projects a (lon, lat) coordinate in degrees to (easting, northing)
    pub fn project(&self, coord: Coordinate) -> Coordinate {
        let (easting, northing) = self.forward_radians(coord.y.to_radians(), coord.x.to_radians());
        Coordinate::new_3d(easting, northing, coord.z)
    }

    /// Unprojects an (easting, northing) coordinate to (lon, lat) in degrees
    pub fn unproject(&self, coord: Coordinate) -> Coordinate {
        let (lat, lon) = self.inverse_radians(coord.x, coord.y);
        Coordinate::new_3d(lon.to_degrees(), lat.to_degrees(), coord.z)
    }
}
