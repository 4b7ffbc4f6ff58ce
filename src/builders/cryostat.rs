//! Steel cryostat filled with liquid argon under a gas layer.

use tracing::info;

use super::materials::{AIR, GAR, LAR, STEEL};
use super::tpc::{Crm, TpcBuilder};
use super::BuilderState;
use crate::config::{CryostatParams, TpcParams};
use crate::error::{BuilderError, Result};
use crate::math::Vector3;
use crate::operations::creation::{MakeBoolean, MakeBox, MakePlacement, MakeVolume};
use crate::store::{GeometryStore, VolumeId};

/// Builds the cryostat and places the CRM grid in its argon.
pub struct CryostatBuilder {
    name: String,
    state: BuilderState,
    params: Option<CryostatParams>,
    tpc: TpcBuilder,
    volume: Option<VolumeId>,
}

impl CryostatBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, tpc: TpcBuilder) -> Self {
        Self {
            name: name.into(),
            state: BuilderState::Unconfigured,
            params: None,
            tpc,
            volume: None,
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
    pub fn tpc(&self) -> &TpcBuilder {
        &self.tpc
    }

    /// The top cryostat volume, once constructed.
    #[must_use]
    pub fn volume(&self) -> Option<VolumeId> {
        self.volume
    }

    /// Stores the parameters and configures the TPC.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] unless the builder and its
    /// sub-builders are unconfigured. A rejected call leaves this builder
    /// unconfigured.
    pub fn configure(
        &mut self,
        params: CryostatParams,
        tpc: TpcParams,
    ) -> std::result::Result<(), BuilderError> {
        self.state.begin_configure(&self.name)?;
        if let Err(err) = self.tpc.configure(tpc) {
            self.state = BuilderState::Unconfigured;
            return Err(err);
        }
        self.params = Some(params);
        Ok(())
    }

    /// Registers the cryostat, its argon and the TPC modules.
    ///
    /// The top volume is an air box holding the steel shell and the argon.
    /// The gas layer fills the top of the argon; CRM envelopes hang below it
    /// on a grid of CRPs.
    ///
    /// # Errors
    ///
    /// Returns a builder error on a repeated or premature call, or a store
    /// error if a name is taken or a material is missing.
    pub fn construct(&mut self, store: &mut GeometryStore) -> Result<VolumeId> {
        self.state.begin_construct(&self.name)?;
        let params = self.params.ok_or_else(|| BuilderError::MissingDependency {
            builder: self.name.clone(),
            dependency: "parameters",
        })?;
        let name = &self.name;

        let cryostat_shape = MakeBox::from_size(format!("{name}_shape"), params.cryostat)
            .execute(store)?;
        let argon_shape = MakeBox::from_size(format!("{name}_argon_shape"), params.argon)
            .execute(store)?;
        let gas_shape = MakeBox::new(
            format!("{name}_gas_argon_shape"),
            0.5 * params.gas_height,
            0.5 * params.argon.y,
            0.5 * params.argon.z,
        )
        .execute(store)?;
        let steel_shape = MakeBoolean::new(format!("{name}_steel_shape"), cryostat_shape)
            .subtract(argon_shape, None)
            .execute(store)?;

        let steel = MakeVolume::new(format!("{name}_steel_volume"), STEEL, steel_shape)
            .execute(store)?;
        let argon = MakeVolume::new(format!("{name}_argon_volume"), LAR, argon_shape)
            .execute(store)?;
        let gas = MakeVolume::new(format!("{name}_gas_argon_volume"), GAR, gas_shape)
            .execute(store)?;

        MakePlacement::new(format!("{name}_gas_place"), gas)
            .at(Vector3::new(0.5 * (params.argon.x - params.gas_height), 0.0, 0.0))
            .execute(store, argon)?;

        let tpc_params = self.tpc.params().copied().ok_or_else(|| {
            BuilderError::MissingDependency {
                builder: name.clone(),
                dependency: "TPC parameters",
            }
        })?;
        let crms = self.tpc.construct(store)?;
        let placed = place_crm_grid(store, name, argon, crms, &params, &tpc_params)?;

        let cryostat = MakeVolume::new(format!("{name}_volume"), AIR, cryostat_shape)
            .execute(store)?;
        MakePlacement::new(format!("{name}_steel_place"), steel).execute(store, cryostat)?;
        MakePlacement::new(format!("{name}_argon_place"), argon).execute(store, cryostat)?;

        info!(builder = %name, crm_placements = placed, "constructed cryostat");
        self.volume = Some(cryostat);
        Ok(cryostat)
    }
}

/// Places every CRM of every CRP in the argon, returning the placement
/// count. CRPs are centred on a regular grid across the active area.
fn place_crm_grid(
    store: &mut GeometryStore,
    name: &str,
    argon: VolumeId,
    crms: &[Crm],
    params: &CryostatParams,
    tpc: &TpcParams,
) -> Result<usize> {
    let x = params.envelope_x(tpc);
    let mut placed = 0;
    for j in 0..tpc.n_crp_y() {
        let y = -0.5 * tpc.width_tpc_active() + (f64::from(j) + 0.5) * tpc.width_crp();
        for k in 0..tpc.n_crp_z() {
            let z = -0.5 * tpc.length_tpc_active() + (f64::from(k) + 0.5) * tpc.length_crp();
            for crm in crms {
                let (dy, dz) = crm.offset_in_crp(tpc);
                MakePlacement::new(format!("{name}_crp{j}_{k}_crm{}", crm.index), crm.envelope)
                    .at(Vector3::new(x, y + dy, z + dz))
                    .execute(store, argon)?;
                placed += 1;
            }
        }
    }
    Ok(placed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::builders::materials::define_materials;
    use crate::config::{CryostatSection, MaterialsSection, TpcSection};
    use crate::error::PdvdError;
    use crate::store::{BooleanOp, ShapeKind};

    fn configured() -> (GeometryStore, CryostatBuilder) {
        let mut store = GeometryStore::new();
        define_materials(&mut store, &MaterialsSection::nominal().validate().unwrap()).unwrap();
        let tpc = TpcSection::nominal().validate().unwrap();
        let params = CryostatSection::nominal().validate(&tpc).unwrap();
        let mut cryostat = CryostatBuilder::new("Cryostat", TpcBuilder::new("TPC"));
        cryostat.configure(params, tpc).unwrap();
        (store, cryostat)
    }

    #[test]
    fn cryostat_holds_steel_then_argon() {
        let (mut store, mut cryostat) = configured();
        let id = cryostat.construct(&mut store).unwrap();
        let volume = store.volume(id).unwrap();
        assert_eq!(volume.name, "Cryostat_volume");
        let names: Vec<&str> = volume
            .placements
            .iter()
            .map(|&p| store.placement(p).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Cryostat_steel_place", "Cryostat_argon_place"]);
        assert_eq!(cryostat.volume(), Some(id));
        assert_eq!(cryostat.tpc().state(), BuilderState::Constructed);
    }

    #[test]
    fn steel_is_box_minus_argon() {
        let (mut store, mut cryostat) = configured();
        cryostat.construct(&mut store).unwrap();
        let steel = store.shape_by_name("Cryostat_steel_shape").unwrap();
        let ShapeKind::Boolean { op, first, second, .. } = store.shape(steel).unwrap().kind else {
            panic!("steel shell is not boolean");
        };
        assert_eq!(op, BooleanOp::Subtraction);
        assert_eq!(first, store.shape_by_name("Cryostat_shape").unwrap());
        assert_eq!(second, store.shape_by_name("Cryostat_argon_shape").unwrap());
    }

    #[test]
    fn argon_holds_gas_then_crm_grid() {
        let (mut store, mut cryostat) = configured();
        cryostat.construct(&mut store).unwrap();
        let argon = store.volume_by_name("Cryostat_argon_volume").unwrap();
        let argon = store.volume(argon).unwrap();

        // Gas layer plus 2 CRPs of 4 CRMs.
        assert_eq!(argon.placements.len(), 1 + 8);
        let gas = store.placement(argon.placements[0]).unwrap();
        let gas_x = store.position(gas.position.unwrap()).unwrap().offset.x;
        assert_relative_eq!(gas_x, 0.5 * (789.6 - 49.7), epsilon = 1e-9);
    }

    #[test]
    fn crm_envelopes_stay_inside_the_liquid() {
        let (mut store, mut cryostat) = configured();
        cryostat.construct(&mut store).unwrap();
        let argon = store.volume_by_name("Cryostat_argon_volume").unwrap();
        let argon = store.volume(argon).unwrap();
        let liquid_top = 0.5 * 789.6 - 49.7;

        for &p in &argon.placements[1..] {
            let placement = store.placement(p).unwrap();
            let offset = store.position(placement.position.unwrap()).unwrap().offset;
            let shape = store.volume(placement.volume).unwrap().shape;
            let half = store.shape(shape).unwrap().box_size().unwrap() * 0.5;
            assert!(offset.x + half.x < liquid_top);
            assert!(offset.y.abs() + half.y <= 0.5 * 854.4);
            assert!(offset.z.abs() + half.z <= 0.5 * 854.4);
        }
    }

    #[test]
    fn rejected_configure_leaves_cryostat_unconfigured() {
        let tpc_params = TpcSection::nominal().validate().unwrap();
        let params = CryostatSection::nominal().validate(&tpc_params).unwrap();
        let mut tpc = TpcBuilder::new("TPC");
        tpc.configure(tpc_params).unwrap();

        let mut cryostat = CryostatBuilder::new("Cryostat", tpc);
        let err = cryostat.configure(params, tpc_params).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidTransition { ref builder, action: "configure", .. } if builder == "TPC"
        ));
        assert_eq!(cryostat.state(), BuilderState::Unconfigured);

        let mut store = GeometryStore::new();
        assert!(matches!(
            cryostat.construct(&mut store).unwrap_err(),
            PdvdError::Builder(BuilderError::InvalidTransition {
                state: BuilderState::Unconfigured,
                ..
            })
        ));
    }

    #[test]
    fn construct_twice_fails() {
        let (mut store, mut cryostat) = configured();
        cryostat.construct(&mut store).unwrap();
        assert!(matches!(
            cryostat.construct(&mut store).unwrap_err(),
            PdvdError::Builder(BuilderError::InvalidTransition { .. })
        ));
    }
}
