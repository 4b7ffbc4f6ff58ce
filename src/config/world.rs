use serde::Deserialize;

use super::{invalid, positive_length, positive_number, CryostatParams};
use crate::error::ConfigError;
use crate::math::Vector3;
use crate::units::{Quantity, Unit};

/// Raw `[world]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldSection {
    pub width: Option<Quantity>,
    pub height: Option<Quantity>,
    pub depth: Option<Quantity>,
}

/// Raw `[enclosure]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnclosureSection {
    #[serde(rename = "DetEncX")]
    pub det_enc_x: Option<Quantity>,
    #[serde(rename = "DetEncY")]
    pub det_enc_y: Option<Quantity>,
    #[serde(rename = "DetEncZ")]
    pub det_enc_z: Option<Quantity>,
}

/// Raw `[materials]` table. Densities are in g/cm³.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialsSection {
    #[serde(rename = "SteelDensity")]
    pub steel_density: Option<f64>,
    #[serde(rename = "AirDensity")]
    pub air_density: Option<f64>,
    #[serde(rename = "LArDensity")]
    pub lar_density: Option<f64>,
    #[serde(rename = "GArDensity")]
    pub gar_density: Option<f64>,
    #[serde(rename = "FracMassOfSteel")]
    pub frac_mass_of_steel: Option<f64>,
    #[serde(rename = "FracMassOfAir")]
    pub frac_mass_of_air: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParams {
    pub size: Vector3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosureParams {
    pub size: Vector3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialsParams {
    pub steel_density: f64,
    pub air_density: f64,
    pub lar_density: f64,
    pub gar_density: f64,
    pub frac_steel: f64,
    pub frac_air: f64,
}

impl MaterialsParams {
    /// Density of the air/steel mixture, weighted by mass fraction.
    #[must_use]
    pub fn air_steel_density(&self) -> f64 {
        self.frac_air * self.air_density + self.frac_steel * self.steel_density
    }
}

/// Fails unless `inner` fits strictly inside `outer` on every axis.
fn check_contains(
    outer: Vector3,
    inner: Vector3,
    parameters: [&'static str; 3],
    reason: &'static str,
) -> Result<(), ConfigError> {
    for ((o, i), parameter) in outer.iter().zip(inner.iter()).zip(parameters) {
        if o <= i {
            return Err(invalid(parameter, o, reason));
        }
    }
    Ok(())
}

impl WorldSection {
    #[must_use]
    pub fn nominal() -> Self {
        Self {
            width: Some(Quantity::new(50.0, Unit::Metre)),
            height: Some(Quantity::new(50.0, Unit::Metre)),
            depth: Some(Quantity::new(50.0, Unit::Metre)),
        }
    }

    /// Validates the table against the enclosure it has to contain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing keys or a world smaller than the
    /// enclosure.
    pub fn validate(&self, enclosure: &EnclosureParams) -> Result<WorldParams, ConfigError> {
        let size = Vector3::new(
            positive_length(self.width, "width")?,
            positive_length(self.height, "height")?,
            positive_length(self.depth, "depth")?,
        );
        check_contains(
            size,
            enclosure.size,
            ["width", "height", "depth"],
            "does not contain the detector enclosure",
        )?;
        Ok(WorldParams { size })
    }
}

impl EnclosureSection {
    #[must_use]
    pub fn nominal() -> Self {
        Self {
            det_enc_x: Some(Quantity::cm(1000.0)),
            det_enc_y: Some(Quantity::cm(1000.0)),
            det_enc_z: Some(Quantity::cm(1000.0)),
        }
    }

    /// Validates the table against the cryostat it has to contain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing keys or an enclosure smaller
    /// than the cryostat.
    pub fn validate(&self, cryostat: &CryostatParams) -> Result<EnclosureParams, ConfigError> {
        let size = Vector3::new(
            positive_length(self.det_enc_x, "DetEncX")?,
            positive_length(self.det_enc_y, "DetEncY")?,
            positive_length(self.det_enc_z, "DetEncZ")?,
        );
        check_contains(
            size,
            cryostat.cryostat,
            ["DetEncX", "DetEncY", "DetEncZ"],
            "does not contain the cryostat",
        )?;
        Ok(EnclosureParams { size })
    }
}

impl MaterialsSection {
    #[must_use]
    pub fn nominal() -> Self {
        Self {
            steel_density: Some(7.93),
            air_density: Some(0.001_205),
            lar_density: Some(1.39),
            gar_density: Some(0.001_66),
            frac_mass_of_steel: Some(0.5),
            frac_mass_of_air: Some(0.5),
        }
    }

    /// Validates the table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing or non-positive densities, or
    /// mass fractions that do not sum to one.
    pub fn validate(&self) -> Result<MaterialsParams, ConfigError> {
        let params = MaterialsParams {
            steel_density: positive_number(self.steel_density, "SteelDensity")?,
            air_density: positive_number(self.air_density, "AirDensity")?,
            lar_density: positive_number(self.lar_density, "LArDensity")?,
            gar_density: positive_number(self.gar_density, "GArDensity")?,
            frac_steel: positive_number(self.frac_mass_of_steel, "FracMassOfSteel")?,
            frac_air: positive_number(self.frac_mass_of_air, "FracMassOfAir")?,
        };
        let total = params.frac_steel + params.frac_air;
        if (total - 1.0).abs() > 1e-6 {
            return Err(invalid("FracMassOfAir", params.frac_air, "mass fractions must sum to 1"));
        }
        Ok(params)
    }
}
