//! Degrees-minutes-seconds angles
//!
//! Angles are split with a floor convention: `degrees = floor(decimal)`, so the
//! minutes and seconds are always non-negative offsets added to the degrees.
//! `to_decimal` is the exact inverse of that split, which keeps negative
//! angles consistent even though every coordinate in use is in the
//! northern/eastern hemisphere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Error, Result};
use crate::types::round_tenth;

/// Largest magnitude accepted when splitting decimal degrees
const MAX_DECIMAL_DEGREES: f64 = 360.0;

/// An angle in degrees, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DmsParts")]
pub struct Dms {
    degrees: i32,
    minutes: u32,
    seconds: f64,
}

#[derive(Deserialize)]
struct DmsParts {
    degrees: i32,
    minutes: u32,
    seconds: f64,
}

impl TryFrom<DmsParts> for Dms {
    type Error = Error;

    fn try_from(parts: DmsParts) -> Result<Self> {
        Dms::new(parts.degrees, parts.minutes, parts.seconds)
    }
}

impl Dms {
    /// Creates a validated angle. Minutes must be below 60 and seconds in `[0, 60)`.
    pub fn new(degrees: i32, minutes: u32, seconds: f64) -> Result<Self> {
        if minutes >= 60 {
            return Err(Error::InvalidDms(format!("minutes out of range: {}", minutes)));
        }
        if !seconds.is_finite() {
            return Err(Error::NonFinite("seconds"));
        }
        if !(0.0..60.0).contains(&seconds) {
            return Err(Error::InvalidDms(format!("seconds out of range: {}", seconds)));
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
        })
    }

    /// Splits decimal degrees into degrees, minutes and seconds rounded to 0.1"
    ///
    /// Seconds that round up to 60 carry into the minutes, and minutes into
    /// the degrees. Values beyond ±360° are rejected.
    pub fn from_decimal(decimal: f64) -> Result<Self> {
        if !decimal.is_finite() {
            return Err(Error::NonFinite("decimal degrees"));
        }
        if decimal.abs() > MAX_DECIMAL_DEGREES {
            return Err(Error::InvalidDms(format!("{} degrees is out of range", decimal)));
        }

        let floor = decimal.floor();
        let mut degrees = floor as i32;
        let fraction_minutes = (decimal - floor) * 60.0;
        let mut minutes = fraction_minutes.floor() as u32;
        let mut seconds = round_tenth((fraction_minutes - minutes as f64) * 60.0);

        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            degrees = degrees
                .checked_add(1)
                .ok_or_else(|| Error::InvalidDms(format!("{} degrees is out of range", decimal)))?;
        }

        Self::new(degrees, minutes, seconds.max(0.0))
    }

    /// Converts to signed decimal degrees
    pub fn to_decimal(&self) -> f64 {
        self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0
    }

    /// Returns the whole degrees
    pub fn degrees(&self) -> i32 {
        self.degrees
    }

    /// Returns the whole minutes
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the seconds of arc
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

/// Parses an angle given either as plain decimal degrees or in one of the
/// DMS notations accepted by [`Dms`]'s `FromStr`
///
/// Decimal input is returned unchanged, without the 0.1" rounding of a DMS split.
pub fn parse_angle(s: &str) -> Result<f64> {
    if let Ok(decimal) = s.trim().parse::<f64>() {
        return ensure_finite(decimal, "angle");
    }
    Ok(s.parse::<Dms>()?.to_decimal())
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}'{:.1}\"", self.degrees, self.minutes, self.seconds)
    }
}

impl FromStr for Dms {
    type Err = Error;

    /// Parses `37°59'1.7"`, `37 59 1.7`, `37:59:1.7`, `37 59` or decimal degrees
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || matches!(c, '°' | '\'' | '"' | ':' | '′' | '″'))
            .filter(|part| !part.is_empty())
            .collect();

        let invalid = |what: &str| Error::InvalidDms(format!("{} in '{}'", what, s.trim()));

        match parts.as_slice() {
            [decimal] => {
                let value: f64 = decimal.parse().map_err(|_| invalid("bad decimal degrees"))?;
                Self::from_decimal(value)
            }
            [degrees, minutes] => Self::new(
                degrees.parse().map_err(|_| invalid("bad degrees"))?,
                minutes.parse().map_err(|_| invalid("bad minutes"))?,
                0.0,
            ),
            [degrees, minutes, seconds] => Self::new(
                degrees.parse().map_err(|_| invalid("bad degrees"))?,
                minutes.parse().map_err(|_| invalid("bad minutes"))?,
                seconds.parse().map_err(|_| invalid("bad seconds"))?,
            ),
            _ => Err(invalid("expected degrees, minutes and seconds")),
        }
    }
}
