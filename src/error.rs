//! Error types for egsa87

use std::io;
use thiserror::Error;

/// Result type for egsa87 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in egsa87 operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed degrees-minutes-seconds value
    #[error("Invalid DMS value: {0}")]
    InvalidDms(String),

    /// A coordinate value that is NaN or infinite
    #[error("Non-finite {0} value")]
    NonFinite(&'static str),

    /// Malformed input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not every component of a coordinate has been entered
    #[error("Incomplete coordinate: {0}")]
    Incomplete(&'static str),

    /// Unsupported feature
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Projection error
    #[error("Projection error: {0}")]
    Projection(String),

    /// Invalid configuration value
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

/// Rejects NaN and infinities at input boundaries
pub fn ensure_finite(value: f64, what: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDms("61 minutes".to_string());
        assert_eq!(err.to_string(), "Invalid DMS value: 61 minutes");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config {
            key: "EGSA87_PORT".to_string(),
            message: "invalid digit".to_string(),
        };
        assert!(err.to_string().contains("EGSA87_PORT"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5, "latitude").unwrap(), 1.5);
        assert!(matches!(ensure_finite(f64::NAN, "latitude"), Err(Error::NonFinite("latitude"))));
        assert!(ensure_finite(f64::INFINITY, "x").is_err());
    }
}
