use crate::error::Result;
use crate::math::Vector3;
use crate::store::{GeometryStore, PlacementData, PlacementId, PositionData, RotationId, VolumeId};

/// Places a volume inside a parent volume.
///
/// An offset, if given, is registered as the position `"{name}_pos"`.
/// Rotations are shared between placements and passed by ID.
pub struct MakePlacement {
    name: String,
    volume: VolumeId,
    offset: Option<Vector3>,
    rotation: Option<RotationId>,
}

impl MakePlacement {
    /// Creates a new `MakePlacement` operation at the parent's origin.
    #[must_use]
    pub fn new(name: impl Into<String>, volume: VolumeId) -> Self {
        Self {
            name: name.into(),
            volume,
            offset: None,
            rotation: None,
        }
    }

    /// Sets the offset from the parent's origin, in centimetres.
    #[must_use]
    pub fn at(mut self, offset: Vector3) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the rotation of the daughter.
    #[must_use]
    pub fn rotated(mut self, rotation: RotationId) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Executes the operation, appending the placement to `parent`.
    ///
    /// # Errors
    ///
    /// Returns a store error if a name is taken or a volume is unknown.
    pub fn execute(&self, store: &mut GeometryStore, parent: VolumeId) -> Result<PlacementId> {
        let position = self
            .offset
            .map(|o| store.add_position(PositionData::new(format!("{}_pos", self.name), o)))
            .transpose()?;
        let data = PlacementData {
            name: self.name.clone(),
            volume: self.volume,
            position,
            rotation: self.rotation,
        };
        Ok(store.add_placement(parent, data)?)
    }
}
