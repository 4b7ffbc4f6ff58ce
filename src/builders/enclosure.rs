//! Detector hall enclosure around the cryostat.

use tracing::info;

use super::cryostat::CryostatBuilder;
use super::materials::{define_materials, AIR};
use super::BuilderState;
use crate::config::{DetectorParams, EnclosureParams, MaterialsParams};
use crate::error::{BuilderError, Result};
use crate::math::Vector3;
use crate::operations::creation::{MakeBox, MakePlacement, MakeVolume};
use crate::store::{GeometryStore, VolumeId};

/// Builds the air-filled enclosure and defines the detector materials.
pub struct DetectorEnclosureBuilder {
    name: String,
    state: BuilderState,
    params: Option<(EnclosureParams, MaterialsParams)>,
    cryostat: CryostatBuilder,
    volume: Option<VolumeId>,
}

impl DetectorEnclosureBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, cryostat: CryostatBuilder) -> Self {
        Self {
            name: name.into(),
            state: BuilderState::Unconfigured,
            params: None,
            cryostat,
            volume: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cryostat(&self) -> &CryostatBuilder {
        &self.cryostat
    }

    #[must_use]
    pub fn volume(&self) -> Option<VolumeId> {
        self.volume
    }

    /// Stores the parameters and configures the cryostat.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] unless the builder and its
    /// sub-builders are unconfigured. A rejected call leaves this builder
    /// unconfigured.
    pub fn configure(&mut self, params: &DetectorParams) -> std::result::Result<(), BuilderError> {
        self.state.begin_configure(&self.name)?;
        if let Err(err) = self.cryostat.configure(params.cryostat, params.tpc) {
            self.state = BuilderState::Unconfigured;
            return Err(err);
        }
        self.params = Some((params.enclosure, params.materials));
        Ok(())
    }

    /// Defines the materials, builds the cryostat and places it at the
    /// centre of the enclosure.
    ///
    /// # Errors
    ///
    /// Returns a builder error on a repeated or premature call, or a store
    /// error if a name is taken.
    pub fn construct(&mut self, store: &mut GeometryStore) -> Result<VolumeId> {
        self.state.begin_construct(&self.name)?;
        let (params, materials) = self.params.ok_or_else(|| BuilderError::MissingDependency {
            builder: self.name.clone(),
            dependency: "parameters",
        })?;

        define_materials(store, &materials)?;
        let cryostat = self.cryostat.construct(store)?;

        let name = &self.name;
        let shape = MakeBox::from_size(format!("{name}_shape"), params.size).execute(store)?;
        let enclosure = MakeVolume::new(format!("{name}_volume"), AIR, shape).execute(store)?;
        let cryostat_name = store.volume(cryostat)?.name.clone();
        MakePlacement::new(format!("{cryostat_name}_in_{name}"), cryostat)
            .at(Vector3::zeros())
            .execute(store, enclosure)?;

        info!(builder = %name, materials = store.material_count(), "constructed enclosure");
        self.volume = Some(enclosure);
        Ok(enclosure)
    }
}
