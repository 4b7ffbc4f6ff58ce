//! Physical quantities as they appear in configuration files.
//!
//! Values are written with an explicit unit suffix (`"149.0cm"`,
//! `"150deg"`). Lengths are normalised to centimetres and angles to degrees;
//! asking for one dimension and finding the other is a configuration error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// The physical dimension of a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Angle,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Length => f.write_str("length"),
            Dimension::Angle => f.write_str("angle"),
        }
    }
}

/// Supported unit suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Millimetre,
    Centimetre,
    Metre,
    Degree,
    Radian,
}

impl Unit {
    // Longest suffixes first so that "mm" and "cm" are not read as "m".
    const SUFFIXES: [(&'static str, Unit); 5] = [
        ("deg", Unit::Degree),
        ("rad", Unit::Radian),
        ("mm", Unit::Millimetre),
        ("cm", Unit::Centimetre),
        ("m", Unit::Metre),
    ];

    /// Returns the dimension measured by this unit.
    #[must_use]
    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Millimetre | Unit::Centimetre | Unit::Metre => Dimension::Length,
            Unit::Degree | Unit::Radian => Dimension::Angle,
        }
    }

    /// Returns the suffix used when formatting.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Millimetre => "mm",
            Unit::Centimetre => "cm",
            Unit::Metre => "m",
            Unit::Degree => "deg",
            Unit::Radian => "rad",
        }
    }
}

/// A number with a unit, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity from a value and unit.
    #[must_use]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Shorthand for a length in centimetres.
    #[must_use]
    pub fn cm(value: f64) -> Self {
        Self::new(value, Unit::Centimetre)
    }

    /// Shorthand for an angle in degrees.
    #[must_use]
    pub fn deg(value: f64) -> Self {
        Self::new(value, Unit::Degree)
    }

    /// Returns the dimension of this quantity.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Interprets the quantity as a length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongDimension`] if the quantity is an angle.
    pub fn to_length(self, parameter: &'static str) -> Result<Length, ConfigError> {
        match self.unit {
            Unit::Millimetre => Ok(Length::from_cm(self.value * 0.1)),
            Unit::Centimetre => Ok(Length::from_cm(self.value)),
            Unit::Metre => Ok(Length::from_cm(self.value * 100.0)),
            Unit::Degree | Unit::Radian => Err(ConfigError::WrongDimension {
                parameter,
                expected: Dimension::Length,
                found: Dimension::Angle,
            }),
        }
    }

    /// Interprets the quantity as an angle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongDimension`] if the quantity is a length.
    pub fn to_angle(self, parameter: &'static str) -> Result<Angle, ConfigError> {
        match self.unit {
            Unit::Degree => Ok(Angle::from_degrees(self.value)),
            Unit::Radian => Ok(Angle::from_radians(self.value)),
            Unit::Millimetre | Unit::Centimetre | Unit::Metre => {
                Err(ConfigError::WrongDimension {
                    parameter,
                    expected: Dimension::Angle,
                    found: Dimension::Length,
                })
            }
        }
    }
}

impl FromStr for Quantity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (number, unit) = Unit::SUFFIXES
            .iter()
            .find_map(|&(suffix, unit)| trimmed.strip_suffix(suffix).map(|n| (n, unit)))
            .ok_or_else(|| ConfigError::Parse(s.to_owned()))?;
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(s.to_owned()))?;
        if !value.is_finite() {
            return Err(ConfigError::Parse(s.to_owned()));
        }
        Ok(Self { value, unit })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A length, stored in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length(f64);

impl Length {
    /// Creates a length from centimetres.
    #[must_use]
    pub fn from_cm(cm: f64) -> Self {
        Self(cm)
    }

    /// Returns the length in centimetres.
    #[must_use]
    pub fn cm(self) -> f64 {
        self.0
    }
}

/// An angle, stored in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    /// Creates an angle from degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Creates an angle from radians.
    #[must_use]
    pub fn from_radians(radians: f64) -> Self {
        Self(radians.to_degrees())
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}
