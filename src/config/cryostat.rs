use serde::Deserialize;

use super::{invalid, positive_length, TpcParams};
use crate::error::ConfigError;
use crate::math::Vector3;
use crate::units::Quantity;

/// Raw `[cryostat]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CryostatSection {
    #[serde(rename = "Argon_x")]
    pub argon_x: Option<Quantity>,
    #[serde(rename = "Argon_y")]
    pub argon_y: Option<Quantity>,
    #[serde(rename = "Argon_z")]
    pub argon_z: Option<Quantity>,
    #[serde(rename = "HeightGaseousAr")]
    pub height_gaseous_ar: Option<Quantity>,
    #[serde(rename = "SteelThickness")]
    pub steel_thickness: Option<Quantity>,
    #[serde(rename = "Upper_xLArBuffer_base")]
    pub upper_x_lar_buffer_base: Option<Quantity>,
    #[serde(rename = "Lower_xLArBuffer_base")]
    pub lower_x_lar_buffer_base: Option<Quantity>,
}

/// Validated cryostat parameters, lengths in centimetres.
///
/// The buffers are the liquid argon left around the TPC active volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CryostatParams {
    /// Inner (liquid plus gas) argon volume.
    pub argon: Vector3,
    /// Outer steel box.
    pub cryostat: Vector3,
    pub steel_thickness: f64,
    pub gas_height: f64,
    /// Argon depth not taken by drift, gas or readout.
    pub x_lar_buffer: f64,
    /// Liquid between the readout planes and the gas layer.
    pub upper_x_lar_buffer: f64,
    /// Liquid below the cathode.
    pub lower_x_lar_buffer: f64,
    pub y_lar_buffer: f64,
    pub z_lar_buffer: f64,
}

impl CryostatParams {
    /// x of the CRM envelopes' centre in the argon frame.
    ///
    /// The readout face sits just under the gas layer and the upper buffer.
    #[must_use]
    pub fn envelope_x(&self, tpc: &TpcParams) -> f64 {
        0.5 * self.argon.x - self.gas_height - self.upper_x_lar_buffer - 0.5 * tpc.envelope_depth()
    }
}

impl CryostatSection {
    /// The reference ProtoDUNE-VD cryostat.
    #[must_use]
    pub fn nominal() -> Self {
        Self {
            argon_x: Some(Quantity::cm(789.6)),
            argon_y: Some(Quantity::cm(854.4)),
            argon_z: Some(Quantity::cm(854.4)),
            height_gaseous_ar: Some(Quantity::cm(49.7)),
            steel_thickness: Some(Quantity::cm(0.12)),
            upper_x_lar_buffer_base: Some(Quantity::cm(23.6)),
            lower_x_lar_buffer_base: Some(Quantity::cm(34.7)),
        }
    }

    /// Validates the table against the TPC it has to contain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an absent key, or
    /// [`ConfigError::Invalid`] when the TPC does not fit in the argon.
    pub fn validate(&self, tpc: &TpcParams) -> Result<CryostatParams, ConfigError> {
        let argon = Vector3::new(
            positive_length(self.argon_x, "Argon_x")?,
            positive_length(self.argon_y, "Argon_y")?,
            positive_length(self.argon_z, "Argon_z")?,
        );
        let gas_height = positive_length(self.height_gaseous_ar, "HeightGaseousAr")?;
        let steel_thickness = positive_length(self.steel_thickness, "SteelThickness")?;
        let upper_base = positive_length(self.upper_x_lar_buffer_base, "Upper_xLArBuffer_base")?;
        let lower_base = positive_length(self.lower_x_lar_buffer_base, "Lower_xLArBuffer_base")?;

        let x_lar_buffer = argon.x - tpc.drift - gas_height - tpc.readout_plane;
        let upper_x_lar_buffer = upper_base - tpc.readout_plane;
        let lower_x_lar_buffer = lower_base - tpc.readout_plane;
        let y_lar_buffer = 0.5 * (argon.y - tpc.width_tpc_active());
        let z_lar_buffer = 0.5 * (argon.z - tpc.length_tpc_active());

        if upper_x_lar_buffer < 0.0 || x_lar_buffer < upper_x_lar_buffer {
            return Err(invalid("Argon_x", argon.x, "too shallow for the drift volume"));
        }
        if y_lar_buffer < 0.0 {
            return Err(invalid("Argon_y", argon.y, "narrower than the TPC active width"));
        }
        if z_lar_buffer < 0.0 {
            return Err(invalid("Argon_z", argon.z, "shorter than the TPC active length"));
        }

        Ok(CryostatParams {
            argon,
            cryostat: argon.add_scalar(2.0 * steel_thickness),
            steel_thickness,
            gas_height,
            x_lar_buffer,
            upper_x_lar_buffer,
            lower_x_lar_buffer,
            y_lar_buffer,
            z_lar_buffer,
        })
    }
}
