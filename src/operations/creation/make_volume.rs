use crate::error::Result;
use crate::store::{GeometryStore, ShapeId, VolumeData, VolumeId};

/// Creates a logical volume from a shape and a named material.
pub struct MakeVolume {
    name: String,
    material: String,
    shape: ShapeId,
    aux: Vec<(String, String)>,
}

impl MakeVolume {
    /// Creates a new `MakeVolume` operation.
    #[must_use]
    pub fn new(name: impl Into<String>, material: impl Into<String>, shape: ShapeId) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            shape,
            aux: Vec::new(),
        }
    }

    /// Attaches an auxiliary key/value pair, e.g. `SensDet`.
    #[must_use]
    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.aux.push((key.into(), value.into()));
        self
    }

    /// Executes the operation, registering the volume in the store.
    ///
    /// # Errors
    ///
    /// Returns a store error if the material is not defined, the shape is
    /// unknown, or the name is taken.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<VolumeId> {
        let material = store.material_by_name(&self.material)?;
        let mut data = VolumeData::new(self.name.clone(), material, self.shape);
        data.aux.clone_from(&self.aux);
        Ok(store.add_volume(data)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{PdvdError, StoreError};
    use crate::operations::creation::MakeBox;
    use crate::store::MaterialData;

    #[test]
    fn volume_resolves_material_and_keeps_aux() {
        let mut store = GeometryStore::new();
        let ar = store
            .add_material(MaterialData::element("Argon", "Ar", 18, 39.948))
            .unwrap();
        let lar = store
            .add_material(MaterialData::molecule("LAr", 1.39, vec![(ar, 1)]))
            .unwrap();
        let shape = MakeBox::new("s", 1.0, 1.0, 1.0).execute(&mut store).unwrap();

        let id = MakeVolume::new("v", "LAr", shape)
            .with_aux("SensDet", "SimEnergyDeposit")
            .execute(&mut store)
            .unwrap();

        let volume = store.volume(id).unwrap();
        assert_eq!(volume.material, lar);
        assert_eq!(volume.aux_value("SensDet"), Some("SimEnergyDeposit"));
        assert_eq!(volume.aux_value("Color"), None);
    }

    #[test]
    fn unknown_material_is_reported() {
        let mut store = GeometryStore::new();
        let shape = MakeBox::new("s", 1.0, 1.0, 1.0).execute(&mut store).unwrap();
        let err = MakeVolume::new("v", "Unobtainium", shape)
            .execute(&mut store)
            .unwrap_err();
        assert!(matches!(
            err,
            PdvdError::Store(StoreError::EntityNotFound { kind: "material", .. })
        ));
    }
}
