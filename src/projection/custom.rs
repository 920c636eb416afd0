use crate::error::{Error, Result};
use crate::projection::datum::{Datum, Helmert};
use crate::projection::tmerc::TransverseMercatorParams;

#[cfg(feature = "proj")]
use crate::projection::coordinate::Coordinate;
#[cfg(feature = "proj")]
use proj::Proj;

/// A PROJ-style projection definition string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDefinition {
    definition: String,
}

impl ProjectionDefinition {
    /// Definition of EGSA87 / Greek Grid, built from the same constants the
    /// native converter uses
    pub fn egsa87() -> Self {
        Self::transverse_mercator(&TransverseMercatorParams::EGSA87, Datum::GGRS87)
    }

    /// Builds a `+proj=tmerc` definition for the given parameters and datum
    pub fn transverse_mercator(params: &TransverseMercatorParams, datum: Datum) -> Self {
        let mut builder = ProjectionBuilder::new()
            .latitude_of_origin(params.latitude_of_origin)
            .central_meridian(params.central_meridian)
            .scale_factor(params.scale_factor)
            .false_easting(params.false_easting)
            .false_northing(params.false_northing)
            .ellipsoid(datum.ellipsoid().name);

        if datum != Datum::WGS84 {
            builder = builder.towgs84(&datum.to_wgs84());
        }

        builder
            .units("m")
            .flag("no_defs")
            .parameter("type", "crs")
            .render("tmerc")
    }

    /// Returns the projection definition string
    pub fn as_str(&self) -> &str {
        &self.definition
    }
}

impl std::fmt::Display for ProjectionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.definition)
    }
}

/// Builder for creating custom projection definitions
///
/// Parameters are emitted in the order they were added.
pub struct ProjectionBuilder {
    proj_type: Option<String>,
    parameters: Vec<(String, String)>,
}

impl ProjectionBuilder {
    /// Creates a new projection builder
    pub fn new() -> Self {
        Self {
            proj_type: None,
            parameters: Vec::new(),
        }
    }

    /// Sets the projection type (e.g., "tmerc", "utm")
    pub fn projection_type(mut self, proj_type: &str) -> Self {
        self.proj_type = Some(proj_type.to_string());
        self
    }

    /// Sets the ellipsoid (e.g., "WGS84", "GRS80")
    pub fn ellipsoid(self, ellipsoid: &str) -> Self {
        self.parameter("ellps", ellipsoid)
    }

    /// Sets the datum shift to WGS84
    pub fn towgs84(self, shift: &Helmert) -> Self {
        self.parameter("towgs84", &shift.parameters())
    }

    /// Adds a custom parameter
    pub fn parameter(mut self, key: &str, value: &str) -> Self {
        self.parameters.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds a parameter without a value (e.g., "no_defs")
    pub fn flag(self, key: &str) -> Self {
        self.parameter(key, "")
    }

    /// Sets the latitude of origin
    pub fn latitude_of_origin(self, lat: f64) -> Self {
        self.parameter("lat_0", &lat.to_string())
    }

    /// Sets the central meridian
    pub fn central_meridian(self, lon: f64) -> Self {
        self.parameter("lon_0", &lon.to_string())
    }

    /// Sets the scale factor
    pub fn scale_factor(self, k: f64) -> Self {
        self.parameter("k", &k.to_string())
    }

    /// Sets the false easting
    pub fn false_easting(self, x: f64) -> Self {
        self.parameter("x_0", &x.to_string())
    }

    /// Sets the false northing
    pub fn false_northing(self, y: f64) -> Self {
        self.parameter("y_0", &y.to_string())
    }

    /// Sets the units (e.g., "m", "ft", "us-ft")
    pub fn units(self, units: &str) -> Self {
        self.parameter("units", units)
    }

    /// Builds the definition string
    pub fn build(self) -> Result<ProjectionDefinition> {
        let proj_type = self
            .proj_type
            .clone()
            .ok_or_else(|| Error::Projection("Projection type is required".to_string()))?;

        Ok(self.render(&proj_type))
    }

    fn render(self, proj_type: &str) -> ProjectionDefinition {
        let mut parts = vec![format!("+proj={}", proj_type)];

        for (key, value) in self.parameters {
            if value.is_empty() {
                parts.push(format!("+{}", key));
            } else {
                parts.push(format!("+{}={}", key, value));
            }
        }

        ProjectionDefinition {
            definition: parts.join(" "),
        }
    }
}

impl Default for ProjectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A projection evaluated by the PROJ library, from WGS84 geographic
/// coordinates (lon, lat) to the projected CRS of a definition
#[cfg(feature = "proj")]
pub struct CustomProjection {
    forward: Proj,
    inverse: Proj,
    definition: ProjectionDefinition,
}

#[cfg(feature = "proj")]
impl CustomProjection {
    /// Creates a PROJ transformation between EPSG:4326 and the definition
    pub fn from_definition(definition: ProjectionDefinition) -> Result<Self> {
        let forward = Proj::new_known_crs("EPSG:4326", definition.as_str(), None)
            .map_err(|e| Error::Projection(format!("Failed to create custom projection: {}", e)))?;
        let inverse = Proj::new_known_crs(definition.as_str(), "EPSG:4326", None)
            .map_err(|e| Error::Projection(format!("Failed to create inverse projection: {}", e)))?;

        Ok(Self {
            forward,
            inverse,
            definition,
        })
    }

    /// Projects a (lon, lat) coordinate to (easting, northing)
    pub fn project(&self, coord: Coordinate) -> Result<Coordinate> {
        let result = self.forward.convert((coord.x, coord.y))
            .map_err(|e| Error::Projection(format!("Projection failed: {}", e)))?;

        Ok(Coordinate::new(result.0, result.1))
    }

    /// Unprojects an (easting, northing) coordinate to (lon, lat)
    pub fn unproject(&self, coord: Coordinate) -> Result<Coordinate> {
        let result = self.inverse.convert((coord.x, coord.y))
            .map_err(|e| Error::Projection(format!("Unprojection failed: {}", e)))?;

        Ok(Coordinate::new(result.0, result.1))
    }

    /// Returns the projection definition
    pub fn definition(&self) -> &ProjectionDefinition {
        &self.definition
    }
}
