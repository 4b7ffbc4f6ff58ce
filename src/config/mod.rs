//! Detector configuration.
//!
//! A configuration file is a TOML document with one table per builder.
//! Raw tables hold optional, unit-carrying values exactly as written; a
//! single call to [`DetectorConfig::validate`] turns them into the typed
//! parameter records the builders consume, reporting the first missing or
//! ill-dimensioned key.

mod cryostat;
mod tpc;
mod world;

pub use cryostat::{CryostatParams, CryostatSection};
pub use tpc::{TpcParams, TpcSection};
pub use world::{
    EnclosureParams, EnclosureSection, MaterialsParams, MaterialsSection, WorldParams,
    WorldSection,
};

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::units::{Angle, Quantity};

/// The complete, unvalidated detector configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub enclosure: EnclosureSection,
    #[serde(default)]
    pub cryostat: CryostatSection,
    #[serde(default)]
    pub tpc: TpcSection,
    #[serde(default)]
    pub materials: MaterialsSection,
}

/// Validated parameters for every builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorParams {
    pub world: WorldParams,
    pub enclosure: EnclosureParams,
    pub cryostat: CryostatParams,
    pub tpc: TpcParams,
    pub materials: MaterialsParams,
}

impl DetectorConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed documents, unknown keys,
    /// or quantities that cannot be parsed.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`DetectorConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&text)
    }

    /// The reference ProtoDUNE vertical-drift configuration.
    #[must_use]
    pub fn nominal() -> Self {
        Self {
            world: WorldSection::nominal(),
            enclosure: EnclosureSection::nominal(),
            cryostat: CryostatSection::nominal(),
            tpc: TpcSection::nominal(),
            materials: MaterialsSection::nominal(),
        }
    }

    /// Validates every section and derives the dependent quantities.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in the order TPC, cryostat,
    /// enclosure, world, materials.
    pub fn validate(&self) -> Result<DetectorParams, ConfigError> {
        let tpc = self.tpc.validate()?;
        let cryostat = self.cryostat.validate(&tpc)?;
        let enclosure = self.enclosure.validate(&cryostat)?;
        let world = self.world.validate(&enclosure)?;
        let materials = self.materials.validate()?;
        Ok(DetectorParams {
            world,
            enclosure,
            cryostat,
            tpc,
            materials,
        })
    }
}

fn required<T>(value: Option<T>, parameter: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::Missing(parameter))
}

fn invalid(parameter: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        parameter,
        value: value.to_string(),
        reason,
    }
}

/// A required length in centimetres, strictly positive.
fn positive_length(value: Option<Quantity>, parameter: &'static str) -> Result<f64, ConfigError> {
    let quantity = required(value, parameter)?;
    let cm = quantity.to_length(parameter)?.cm();
    if cm > 0.0 {
        Ok(cm)
    } else {
        Err(invalid(parameter, quantity, "must be positive"))
    }
}

/// A required length in centimetres, zero allowed.
fn non_negative_length(
    value: Option<Quantity>,
    parameter: &'static str,
) -> Result<f64, ConfigError> {
    let quantity = required(value, parameter)?;
    let cm = quantity.to_length(parameter)?.cm();
    if cm >= 0.0 {
        Ok(cm)
    } else {
        Err(invalid(parameter, quantity, "must not be negative"))
    }
}

fn angle(value: Option<Quantity>, parameter: &'static str) -> Result<Angle, ConfigError> {
    required(value, parameter)?.to_angle(parameter)
}

fn positive_number(value: Option<f64>, parameter: &'static str) -> Result<f64, ConfigError> {
    let v = required(value, parameter)?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(invalid(parameter, v, "must be positive"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn nominal_configuration_validates() {
        let params = DetectorConfig::nominal().validate().unwrap();
        assert_relative_eq!(params.tpc.width_tpc_active(), 674.0, epsilon = 1e-9);
        assert_relative_eq!(params.tpc.length_tpc_active(), 299.3, epsilon = 1e-9);
        assert!(params.cryostat.y_lar_buffer > 0.0);
        assert!(params.enclosure.size.x > params.cryostat.cryostat.x);
    }

    #[test]
    fn bundled_file_matches_nominal() {
        let text = include_str!("../../config/protodune_vd.toml");
        let parsed = DetectorConfig::from_toml_str(text).unwrap();
        assert_eq!(
            parsed.validate().unwrap(),
            DetectorConfig::nominal().validate().unwrap()
        );
    }

    #[test]
    fn empty_document_reports_the_first_missing_key() {
        let config = DetectorConfig::from_toml_str("").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("lengthPCBActive")));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = DetectorConfig::from_toml_str("[tpc]\nwirePitchW = \"1cm\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn unparsable_quantity_is_rejected() {
        let err = DetectorConfig::from_toml_str("[tpc]\nwirePitchU = \"0.765\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DetectorConfig::load(Path::new("/nonexistent/pdvd.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
