use serde::Deserialize;

use super::{angle, invalid, non_negative_length, positive_length, required};
use crate::error::ConfigError;
use crate::math::Vector2;
use crate::units::{Angle, Quantity};
use crate::wires::{SplitParams, View, WireGenParams};

/// Raw `[tpc]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TpcSection {
    #[serde(rename = "lengthPCBActive")]
    pub length_pcb_active: Option<Quantity>,
    #[serde(rename = "widthPCBActive")]
    pub width_pcb_active: Option<Quantity>,
    #[serde(rename = "nChannelsInd1")]
    pub n_channels_ind1: Option<u32>,
    #[serde(rename = "nChannelsInd2")]
    pub n_channels_ind2: Option<u32>,
    #[serde(rename = "nChannelsCol")]
    pub n_channels_col: Option<u32>,
    #[serde(rename = "wirePitchU")]
    pub wire_pitch_u: Option<Quantity>,
    #[serde(rename = "wirePitchV")]
    pub wire_pitch_v: Option<Quantity>,
    #[serde(rename = "wirePitchZ")]
    pub wire_pitch_z: Option<Quantity>,
    #[serde(rename = "wireAngleU")]
    pub wire_angle_u: Option<Quantity>,
    #[serde(rename = "wireAngleV")]
    pub wire_angle_v: Option<Quantity>,
    #[serde(rename = "padWidth")]
    pub pad_width: Option<Quantity>,
    #[serde(rename = "offsetUVwire")]
    pub offset_uv_wire: Option<[Quantity; 2]>,
    #[serde(rename = "driftTPCActive")]
    pub drift_tpc_active: Option<Quantity>,
    #[serde(rename = "nCRM_x")]
    pub n_crm_x: Option<u32>,
    #[serde(rename = "nCRM_z")]
    pub n_crm_z: Option<u32>,
    #[serde(rename = "gapCRU")]
    pub gap_cru: Option<Quantity>,
    #[serde(rename = "borderCRP")]
    pub border_crp: Option<Quantity>,
    /// Derived from the pad width when absent.
    #[serde(rename = "ReadoutPlane")]
    pub readout_plane: Option<Quantity>,
    #[serde(rename = "wireDiameter")]
    pub wire_diameter: Option<Quantity>,
    #[serde(rename = "placeWires", default)]
    pub place_wires: bool,
}

/// Validated TPC parameters, lengths in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TpcParams {
    /// Active PCB extent along the beam (3D z).
    pub length_pcb: f64,
    /// Active PCB extent across the beam (3D y).
    pub width_pcb: f64,
    pub n_channels_u: u32,
    pub n_channels_v: u32,
    /// Collection-plane channel count. Validated and carried for the
    /// collection view; no wires are generated for it.
    pub n_channels_z: u32,
    pub pitch_u: f64,
    pub pitch_v: f64,
    /// Collection-plane wire pitch, see `n_channels_z`.
    pub pitch_z: f64,
    pub angle_u: Angle,
    pub angle_v: Angle,
    pub pad_width: f64,
    pub offset_uv: Vector2,
    pub drift: f64,
    pub n_crm_x: u32,
    pub n_crm_z: u32,
    pub gap_cru: f64,
    pub border_crp: f64,
    pub readout_plane: f64,
    /// Diameter of the wire tubes placed when `place_wires` is set.
    pub wire_diameter: f64,
    pub place_wires: bool,
}

impl TpcParams {
    /// Number of readout views (U, V and collection).
    pub const N_VIEWS: u32 = 3;

    /// Width of one CRP including its border.
    #[must_use]
    pub fn width_crp(&self) -> f64 {
        self.width_pcb + 2.0 * self.border_crp
    }

    /// Length of one CRP: two panels, their borders and the gap between them.
    #[must_use]
    pub fn length_crp(&self) -> f64 {
        2.0 * self.length_pcb + 2.0 * self.border_crp + self.gap_cru
    }

    /// Number of CRPs across the beam.
    #[must_use]
    pub fn n_crp_y(&self) -> u32 {
        self.n_crm_x / 2
    }

    /// Number of CRPs along the beam.
    #[must_use]
    pub fn n_crp_z(&self) -> u32 {
        self.n_crm_z / 2
    }

    #[must_use]
    pub fn width_tpc_active(&self) -> f64 {
        f64::from(self.n_crp_y()) * self.width_crp()
    }

    #[must_use]
    pub fn length_tpc_active(&self) -> f64 {
        f64::from(self.n_crp_z()) * self.length_crp()
    }

    /// Full depth of one CRM envelope: drift volume plus readout planes.
    #[must_use]
    pub fn envelope_depth(&self) -> f64 {
        self.drift + self.readout_plane
    }

    /// Wire layout parameters for one induction view over a full panel.
    #[must_use]
    pub fn wire_gen_params(&self, view: View) -> WireGenParams {
        let (n_channels, pitch, angle) = match view {
            View::U => (self.n_channels_u, self.pitch_u, self.angle_u),
            View::V => (self.n_channels_v, self.pitch_v, self.angle_v),
        };
        WireGenParams {
            length: self.length_pcb,
            width: self.width_pcb,
            n_channels,
            pitch,
            angle,
            offset: self.offset_uv,
        }
    }

    /// Split parameters for one induction view.
    #[must_use]
    pub fn split_params(&self, view: View) -> SplitParams {
        let angle = match view {
            View::U => self.angle_u,
            View::V => self.angle_v,
        };
        SplitParams {
            width: self.width_pcb,
            angle,
        }
    }
}

impl TpcSection {
    /// The reference ProtoDUNE-VD readout.
    #[must_use]
    pub fn nominal() -> Self {
        Self {
            length_pcb_active: Some(Quantity::cm(149.0)),
            width_pcb_active: Some(Quantity::cm(335.8)),
            n_channels_ind1: Some(476),
            n_channels_ind2: Some(476),
            n_channels_col: Some(584),
            wire_pitch_u: Some(Quantity::cm(0.765)),
            wire_pitch_v: Some(Quantity::cm(0.765)),
            wire_pitch_z: Some(Quantity::cm(0.51)),
            wire_angle_u: Some(Quantity::deg(150.0)),
            wire_angle_v: Some(Quantity::deg(30.0)),
            pad_width: Some(Quantity::cm(0.02)),
            offset_uv_wire: Some([Quantity::cm(1.50), Quantity::cm(0.87)]),
            drift_tpc_active: Some(Quantity::cm(338.5)),
            n_crm_x: Some(4),
            n_crm_z: Some(2),
            gap_cru: Some(Quantity::cm(0.1)),
            border_crp: Some(Quantity::cm(0.6)),
            readout_plane: None,
            wire_diameter: Some(Quantity::cm(0.015)),
            place_wires: false,
        }
    }

    /// Validates the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an absent key,
    /// [`ConfigError::WrongDimension`] for an angle given as a length or the
    /// reverse, and [`ConfigError::Invalid`] for non-positive extents, odd
    /// CRM counts, or a readout plane too thin for three views.
    pub fn validate(&self) -> Result<TpcParams, ConfigError> {
        let length_pcb = positive_length(self.length_pcb_active, "lengthPCBActive")?;
        let width_pcb = positive_length(self.width_pcb_active, "widthPCBActive")?;
        let n_channels_u = required(self.n_channels_ind1, "nChannelsInd1")?;
        let n_channels_v = required(self.n_channels_ind2, "nChannelsInd2")?;
        let n_channels_z = required(self.n_channels_col, "nChannelsCol")?;
        let pitch_u = positive_length(self.wire_pitch_u, "wirePitchU")?;
        let pitch_v = positive_length(self.wire_pitch_v, "wirePitchV")?;
        let pitch_z = positive_length(self.wire_pitch_z, "wirePitchZ")?;
        let angle_u = angle(self.wire_angle_u, "wireAngleU")?;
        let angle_v = angle(self.wire_angle_v, "wireAngleV")?;
        let pad_width = positive_length(self.pad_width, "padWidth")?;
        let [ox, oy] = required(self.offset_uv_wire, "offsetUVwire")?;
        let offset_uv = Vector2::new(
            ox.to_length("offsetUVwire")?.cm(),
            oy.to_length("offsetUVwire")?.cm(),
        );
        let drift = positive_length(self.drift_tpc_active, "driftTPCActive")?;
        let n_crm_x = crm_count(self.n_crm_x, "nCRM_x")?;
        let n_crm_z = crm_count(self.n_crm_z, "nCRM_z")?;
        let gap_cru = non_negative_length(self.gap_cru, "gapCRU")?;
        let border_crp = non_negative_length(self.border_crp, "borderCRP")?;
        let wire_diameter = positive_length(self.wire_diameter, "wireDiameter")?;

        if wire_diameter > pad_width {
            return Err(invalid(
                "wireDiameter",
                wire_diameter,
                "wires must fit inside their plane",
            ));
        }

        let min_readout = f64::from(TpcParams::N_VIEWS) * pad_width;
        let readout_plane = match self.readout_plane {
            None => min_readout,
            Some(q) => {
                let cm = q.to_length("ReadoutPlane")?.cm();
                if cm < min_readout {
                    return Err(invalid("ReadoutPlane", q, "must hold one pad per view"));
                }
                cm
            }
        };

        Ok(TpcParams {
            length_pcb,
            width_pcb,
            n_channels_u,
            n_channels_v,
            n_channels_z,
            pitch_u,
            pitch_v,
            pitch_z,
            angle_u,
            angle_v,
            pad_width,
            offset_uv,
            drift,
            n_crm_x,
            n_crm_z,
            gap_cru,
            border_crp,
            readout_plane,
            wire_diameter,
            place_wires: self.place_wires,
        })
    }
}

/// CRMs come in pairs per CRP along each axis.
fn crm_count(value: Option<u32>, parameter: &'static str) -> Result<u32, ConfigError> {
    let n = required(value, parameter)?;
    if n == 0 || n % 2 != 0 {
        return Err(invalid(parameter, n, "must be a positive even number"));
    }
    Ok(n)
}
