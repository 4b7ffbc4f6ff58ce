use super::{MaterialId, Named, PlacementId, ShapeId};

slotmap::new_key_type! {
    /// Unique identifier for a logical volume in the geometry store.
    pub struct VolumeId;
}

/// Data associated with a logical volume.
///
/// `placements` lists the daughters in insertion order; that order is kept
/// for lookup but carries no physical meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeData {
    pub name: String,
    pub material: MaterialId,
    pub shape: ShapeId,
    /// Opaque key/value pairs passed through to the simulation.
    pub aux: Vec<(String, String)>,
    pub placements: Vec<PlacementId>,
}

impl VolumeData {
    /// Creates a volume with no auxiliary values and no daughters.
    #[must_use]
    pub fn new(name: impl Into<String>, material: MaterialId, shape: ShapeId) -> Self {
        Self {
            name: name.into(),
            material,
            shape,
            aux: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Returns the auxiliary value for `key`, if any.
    #[must_use]
    pub fn aux_value(&self, key: &str) -> Option<&str> {
        self.aux
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Named for VolumeData {
    fn name(&self) -> &str {
        &self.name
    }
}
