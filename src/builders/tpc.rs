//! Readout planes of one CRP, split into four cold readout modules.

use tracing::{debug, info};

use super::materials::{LAR, WIRE};
use super::BuilderState;
use crate::config::TpcParams;
use crate::error::{BuilderError, Result};
use crate::math::Vector3;
use crate::operations::creation::{MakeBox, MakePlacement, MakeTube, MakeVolume};
use crate::store::{GeometryStore, RotationData, RotationId, VolumeId};
use crate::units::Angle;
use crate::wires::{
    ChannelMap, GenerateWires, MirrorWires, Panel, PanelHalf, SplitWires, View, WireSet,
};

/// Depth of each plane below the envelope's readout face, in pad widths.
const PLANE_DEPTHS: [(&str, f64); 3] = [("U", 2.5), ("V", 1.5), ("Z", 0.5)];

/// One cold readout module: a quarter of a CRP.
#[derive(Debug, Clone, PartialEq)]
pub struct Crm {
    /// `panel * 2 + half`, lower half first.
    pub index: usize,
    pub panel: Panel,
    pub half: PanelHalf,
    pub envelope: VolumeId,
    pub active: VolumeId,
    /// U, V and collection plane volumes, in that order.
    pub planes: [VolumeId; 3],
    pub wires_u: WireSet,
    pub wires_v: WireSet,
}

impl Crm {
    /// Offset of this module's envelope from its CRP centre, as `(y, z)`.
    ///
    /// Halves sit either side of the CRP's long axis and panels either side
    /// of the gap between the two readout units.
    #[must_use]
    pub fn offset_in_crp(&self, params: &TpcParams) -> (f64, f64) {
        let dy = match self.half {
            PanelHalf::Lower => -0.25 * params.width_pcb,
            PanelHalf::Upper => 0.25 * params.width_pcb,
            PanelHalf::Full => 0.0,
        };
        let dz = 0.5 * (params.length_pcb + params.gap_cru);
        let dz = match self.panel {
            Panel::First => -dz,
            Panel::Second => dz,
        };
        (dy, dz)
    }
}

/// Wire sets for one quadrant, before any volume is made.
struct Quadrant {
    panel: Panel,
    half: PanelHalf,
    wires_u: WireSet,
    wires_v: WireSet,
}

/// Builds the four CRM volumes of a CRP and lays out their wires.
pub struct TpcBuilder {
    name: String,
    state: BuilderState,
    params: Option<TpcParams>,
    crms: Vec<Crm>,
}

impl TpcBuilder {
    /// Creates an unconfigured builder. Every name it registers starts with
    /// `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: BuilderState::Unconfigured,
            params: None,
            crms: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn state(&self) -> BuilderState {
        self.state
    }

    #[must_use]
    pub fn params(&self) -> Option<&TpcParams> {
        self.params.as_ref()
    }

    /// The constructed modules, empty before construction.
    #[must_use]
    pub fn crms(&self) -> &[Crm] {
        &self.crms
    }

    /// Stores the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] unless the builder is
    /// unconfigured.
    pub fn configure(&mut self, params: TpcParams) -> std::result::Result<(), BuilderError> {
        self.state.begin_configure(&self.name)?;
        self.params = Some(params);
        Ok(())
    }

    /// Generates the wires and registers the four CRM volumes.
    ///
    /// Panel 1 is generated per view and rotated by 180° to give panel 2;
    /// all four sets are then split into half-panels. Modules are produced
    /// in index order.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] unless the builder is
    /// configured, or a store error if a name is taken or a material is
    /// missing.
    pub fn construct(&mut self, store: &mut GeometryStore) -> Result<&[Crm]> {
        self.state.begin_construct(&self.name)?;
        let params = self.params.ok_or_else(|| BuilderError::MissingDependency {
            builder: self.name.clone(),
            dependency: "parameters",
        })?;

        let u1 = GenerateWires::new(View::U, params.wire_gen_params(View::U)).execute();
        let v1 = GenerateWires::new(View::V, params.wire_gen_params(View::V)).execute();
        let u2 = MirrorWires.execute(&u1);
        let v2 = MirrorWires.execute(&v1);

        let split_u = SplitWires::new(params.split_params(View::U));
        let split_v = SplitWires::new(params.split_params(View::V));
        let mut quadrants = Vec::with_capacity(4);
        for (u, v) in [(&u1, &v1), (&u2, &v2)] {
            let (u_lower, u_upper) = split_u.execute(u);
            let (v_lower, v_upper) = split_v.execute(v);
            quadrants.push(Quadrant {
                panel: u.panel,
                half: PanelHalf::Lower,
                wires_u: u_lower,
                wires_v: v_lower,
            });
            quadrants.push(Quadrant {
                panel: u.panel,
                half: PanelHalf::Upper,
                wires_u: u_upper,
                wires_v: v_upper,
            });
        }

        let rotations = if params.place_wires {
            Some([
                self.wire_rotation(store, View::U, params.angle_u)?,
                self.wire_rotation(store, View::V, params.angle_v)?,
            ])
        } else {
            None
        };

        for (index, quadrant) in quadrants.into_iter().enumerate() {
            let crm = self.build_crm(store, &params, index, quadrant, rotations)?;
            self.crms.push(crm);
        }

        info!(
            builder = %self.name,
            crms = self.crms.len(),
            wires_u = u1.len(),
            wires_v = v1.len(),
            skipped = u1.skipped.len() + v1.skipped.len(),
            "constructed TPC"
        );
        Ok(&self.crms)
    }

    /// Channel map of every constructed module.
    #[must_use]
    pub fn channel_map(&self) -> ChannelMap {
        let mut map = ChannelMap::new();
        for crm in &self.crms {
            map.push_set(crm.index, &crm.wires_u);
            map.push_set(crm.index, &crm.wires_v);
        }
        map
    }

    fn build_crm(
        &self,
        store: &mut GeometryStore,
        params: &TpcParams,
        index: usize,
        quadrant: Quadrant,
        rotations: Option<[RotationId; 2]>,
    ) -> Result<Crm> {
        let prefix = format!("{}_crm{index}", self.name);
        let depth = params.envelope_depth();
        let half_width = 0.25 * params.width_pcb;
        let half_length = 0.5 * params.length_pcb;

        let envelope_shape = MakeBox::new(
            format!("{prefix}_envelope_shape"),
            0.5 * depth,
            half_width,
            half_length,
        )
        .execute(store)?;
        let active_shape = MakeBox::new(
            format!("{prefix}_active_shape"),
            0.5 * params.drift,
            half_width,
            half_length,
        )
        .execute(store)?;
        let plane_shape = MakeBox::new(
            format!("{prefix}_plane_shape"),
            0.5 * params.pad_width,
            half_width,
            half_length,
        )
        .execute(store)?;

        let envelope = MakeVolume::new(format!("{prefix}_envelope"), LAR, envelope_shape)
            .execute(store)?;
        let active = MakeVolume::new(format!("{prefix}_active"), LAR, active_shape)
            .with_aux("SensDet", "SimEnergyDeposit")
            .execute(store)?;
        MakePlacement::new(format!("{prefix}_active_place"), active)
            .at(Vector3::new(-0.5 * params.readout_plane, 0.0, 0.0))
            .execute(store, envelope)?;

        let mut planes = Vec::with_capacity(PLANE_DEPTHS.len());
        for (plane, k) in PLANE_DEPTHS {
            let volume = MakeVolume::new(format!("{prefix}_plane{plane}"), LAR, plane_shape)
                .execute(store)?;
            MakePlacement::new(format!("{prefix}_plane{plane}_place"), volume)
                .at(Vector3::new(0.5 * depth - k * params.pad_width, 0.0, 0.0))
                .execute(store, envelope)?;
            planes.push(volume);
        }
        let planes = [planes[0], planes[1], planes[2]];

        if let Some([rot_u, rot_v]) = rotations {
            place_wires(store, &prefix, planes[0], &quadrant.wires_u, rot_u, params.wire_diameter)?;
            place_wires(store, &prefix, planes[1], &quadrant.wires_v, rot_v, params.wire_diameter)?;
        }

        debug!(
            crm = index,
            panel = quadrant.panel.index(),
            half = ?quadrant.half,
            wires_u = quadrant.wires_u.len(),
            wires_v = quadrant.wires_v.len(),
            "built CRM"
        );

        Ok(Crm {
            index,
            panel: quadrant.panel,
            half: quadrant.half,
            envelope,
            active,
            planes,
            wires_u: quadrant.wires_u,
            wires_v: quadrant.wires_v,
        })
    }

    /// Rotation taking a tube's axis onto the view's wire direction.
    ///
    /// Local wire x maps to z and local y to y, so the rotation is about x.
    /// It is shared by every wire of the view.
    fn wire_rotation(&self, store: &mut GeometryStore, view: View, angle: Angle) -> Result<RotationId> {
        let zero = Angle::from_degrees(0.0);
        let id = store.add_rotation(RotationData::new(
            format!("{}_wire{view}_rot", self.name),
            [Angle::from_degrees(-angle.degrees()), zero, zero],
        ))?;
        Ok(id)
    }
}

/// Places one copper-beryllium tube per wire inside its plane.
fn place_wires(
    store: &mut GeometryStore,
    prefix: &str,
    plane: VolumeId,
    wires: &WireSet,
    rotation: RotationId,
    diameter: f64,
) -> Result<()> {
    for wire in wires {
        let name = format!("{prefix}_wire{}{}", wires.view, wire.channel);
        let shape = MakeTube::new(format!("{name}_shape"), 0.0, 0.5 * diameter, 0.5 * wire.length)
            .execute(store)?;
        let volume = MakeVolume::new(name.clone(), WIRE, shape).execute(store)?;
        MakePlacement::new(format!("{name}_place"), volume)
            .at(Vector3::new(0.0, wire.center.y, wire.center.x))
            .rotated(rotation)
            .execute(store, plane)?;
    }
    Ok(())
}
