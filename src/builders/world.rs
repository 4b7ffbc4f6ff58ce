//! Top-level world volume.

use tracing::info;

use super::cryostat::CryostatBuilder;
use super::enclosure::DetectorEnclosureBuilder;
use super::materials::AIR;
use super::tpc::TpcBuilder;
use super::BuilderState;
use crate::config::{DetectorParams, WorldParams};
use crate::error::{BuilderError, Result};
use crate::operations::creation::{MakeBox, MakePlacement, MakeVolume};
use crate::store::{GeometryStore, VolumeId};

/// Builds the world box around the detector enclosure.
pub struct WorldBuilder {
    name: String,
    state: BuilderState,
    params: Option<WorldParams>,
    enclosure: DetectorEnclosureBuilder,
    volume: Option<VolumeId>,
}

impl WorldBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, enclosure: DetectorEnclosureBuilder) -> Self {
        Self {
            name: name.into(),
            state: BuilderState::Unconfigured,
            params: None,
            enclosure,
            volume: None,
        }
    }

    /// The ProtoDUNE-VD builder tree with its conventional names.
    #[must_use]
    pub fn protodune_vd() -> Self {
        let tpc = TpcBuilder::new("TPC");
        let cryostat = CryostatBuilder::new("Cryostat", tpc);
        let enclosure = DetectorEnclosureBuilder::new("DetEnclosure", cryostat);
        Self::new("World", enclosure)
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
    pub fn enclosure(&self) -> &DetectorEnclosureBuilder {
        &self.enclosure
    }

    /// Shortcut to the TPC builder at the bottom of the tree.
    #[must_use]
    pub fn tpc(&self) -> &TpcBuilder {
        self.enclosure.cryostat().tpc()
    }

    #[must_use]
    pub fn volume(&self) -> Option<VolumeId> {
        self.volume
    }

    /// Configures the whole builder tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] unless the builder and its
    /// sub-builders are unconfigured. A rejected call leaves this builder
    /// unconfigured.
    pub fn configure(&mut self, params: &DetectorParams) -> std::result::Result<(), BuilderError> {
        self.state.begin_configure(&self.name)?;
        if let Err(err) = self.enclosure.configure(params) {
            self.state = BuilderState::Unconfigured;
            return Err(err);
        }
        self.params = Some(params.world);
        Ok(())
    }

    /// Constructs the whole tree, returning the world volume.
    ///
    /// # Errors
    ///
    /// Returns a builder error on a repeated or premature call, or a store
    /// error if a name is taken.
    pub fn construct(&mut self, store: &mut GeometryStore) -> Result<VolumeId> {
        self.state.begin_construct(&self.name)?;
        let params = self.params.ok_or_else(|| BuilderError::MissingDependency {
            builder: self.name.clone(),
            dependency: "parameters",
        })?;

        let enclosure = self.enclosure.construct(store)?;

        let name = &self.name;
        let shape = MakeBox::from_size(format!("{name}_shape"), params.size).execute(store)?;
        let world = MakeVolume::new(format!("{name}_volume"), AIR, shape).execute(store)?;
        let enclosure_name = store.volume(enclosure)?.name.clone();
        MakePlacement::new(format!("{enclosure_name}_in_{name}"), enclosure)
            .execute(store, world)?;

        info!(
            builder = %name,
            volumes = store.volume_count(),
            shapes = store.shape_count(),
            placements = store.placement_count(),
            "constructed world"
        );
        self.volume = Some(world);
        Ok(world)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::error::PdvdError;

    #[test]
    fn world_contains_the_enclosure() {
        let params = DetectorConfig::nominal().validate().unwrap();
        let mut store = GeometryStore::new();
        let mut world = WorldBuilder::protodune_vd();
        world.configure(&params).unwrap();
        let id = world.construct(&mut store).unwrap();

        let volume = store.volume(id).unwrap();
        assert_eq!(volume.name, "World_volume");
        let placement = store.placement(volume.placements[0]).unwrap();
        assert_eq!(placement.name, "DetEnclosure_volume_in_World");
        assert!(placement.position.is_none());
        assert_eq!(world.tpc().crms().len(), 4);
    }

    #[test]
    fn rejected_configure_leaves_world_unconfigured() {
        let params = DetectorConfig::nominal().validate().unwrap();
        let mut cryostat = CryostatBuilder::new("Cryostat", TpcBuilder::new("TPC"));
        cryostat.configure(params.cryostat, params.tpc).unwrap();
        let enclosure = DetectorEnclosureBuilder::new("DetEnclosure", cryostat);
        let mut world = WorldBuilder::new("World", enclosure);

        let err = world.configure(&params).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidTransition { ref builder, .. } if builder == "Cryostat"
        ));
        assert_eq!(world.state(), BuilderState::Unconfigured);

        let mut store = GeometryStore::new();
        assert!(matches!(
            world.construct(&mut store).unwrap_err(),
            PdvdError::Builder(BuilderError::InvalidTransition {
                state: BuilderState::Unconfigured,
                ..
            })
        ));
    }

    #[test]
    fn unconfigured_world_does_not_touch_the_store() {
        let mut store = GeometryStore::new();
        let mut world = WorldBuilder::protodune_vd();
        let err = world.construct(&mut store).unwrap_err();
        assert!(matches!(err, PdvdError::Builder(_)));
        assert_eq!(store.material_count(), 0);
        assert_eq!(store.volume_count(), 0);
    }
}
