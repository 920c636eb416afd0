//! Reference ellipsoids and geodetic <-> geocentric (ECEF) conversion.

/// Convergence threshold for the geodetic latitude iteration, in radians.
const LATITUDE_TOLERANCE: f64 = 1e-14;

/// Upper bound on latitude iterations; non-finite input never converges.
const MAX_ITERATIONS: usize = 30;

/// A biaxial reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// PROJ `+ellps` identifier
    pub name: &'static str,
    /// Semi-major axis in metres
    pub semi_major: f64,
    /// Inverse flattening 1/f
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    /// WGS 84 (EPSG:7030)
    pub const WGS84: Ellipsoid = Ellipsoid {
        name: "WGS84",
        semi_major: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    };

    /// GRS 1980 (EPSG:7019), the ellipsoid of EGSA87
    pub const GRS80: Ellipsoid = Ellipsoid {
        name: "GRS80",
        semi_major: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared, e² = f(2 − f)
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// Third flattening n = f / (2 − f)
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }

    pub fn semi_minor(&self) -> f64 {
        self.semi_major * (1.0 - self.flattening())
    }

    /// Radius of curvature in the prime vertical at latitude `lat` (radians)
    fn prime_vertical_radius(&self, lat: f64) -> f64 {
        let s = lat.sin();
        self.semi_major / (1.0 - self.eccentricity_squared() * s * s).sqrt()
    }

    /// Converts geodetic latitude/longitude (radians) and ellipsoidal height
    /// (metres) to Earth-centred Cartesian `[X, Y, Z]` in metres.
    pub fn geodetic_to_geocentric(&self, lat: f64, lon: f64, height: f64) -> [f64; 3] {
        let n = self.prime_vertical_radius(lat);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        [
            (n + height) * cos_lat * cos_lon,
            (n + height) * cos_lat * sin_lon,
            (n * (1.0 - self.eccentricity_squared()) + height) * sin_lat,
        ]
    }

    /// Converts Earth-centred Cartesian `[X, Y, Z]` to geodetic
    /// `(lat, lon, height)` with angles in radians.
    ///
    /// Fixed-point iteration on latitude; converges in a handful of steps for
    /// points near the ellipsoid surface.
    pub fn geocentric_to_geodetic(&self, xyz: &[f64; 3]) -> (f64, f64, f64) {
        let [x, y, z] = *xyz;
        let es = self.eccentricity_squared();
        let p = x.hypot(y);
        let lon = y.atan2(x);

        // On the polar axis the iteration below divides by cos(lat) = 0.
        if p == 0.0 {
            let lat = if z >= 0.0 {
                std::f64::consts::FRAC_PI_2
            } else {
                -std::f64::consts::FRAC_PI_2
            };
            return (lat, lon, z.abs() - self.semi_minor());
        }

        let mut lat = z.atan2(p * (1.0 - es));
        for _ in 0..MAX_ITERATIONS {
            let n = self.prime_vertical_radius(lat);
            let height = p / lat.cos() - n;
            let next = z.atan2(p * (1.0 - es * n / (n + height)));
            let converged = (next - lat).abs() < LATITUDE_TOLERANCE;
            lat = next;
            if converged {
                break;
            }
        }

        let height = p / lat.cos() - self.prime_vertical_radius(lat);
        (lat, lon, height)
    }
}
