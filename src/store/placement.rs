use super::{Named, VolumeId};
use crate::math::Vector3;
use crate::units::Angle;

slotmap::new_key_type! {
    /// Unique identifier for a position in the geometry store.
    pub struct PositionId;
}

slotmap::new_key_type! {
    /// Unique identifier for a rotation in the geometry store.
    pub struct RotationId;
}

slotmap::new_key_type! {
    /// Unique identifier for a placement in the geometry store.
    pub struct PlacementId;
}

/// A named translation, in centimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionData {
    pub name: String,
    pub offset: Vector3,
}

impl PositionData {
    /// Creates a new named position.
    #[must_use]
    pub fn new(name: impl Into<String>, offset: Vector3) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// A named rotation about the x, y and z axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationData {
    pub name: String,
    pub angles: [Angle; 3],
}

impl RotationData {
    /// Creates a new named rotation.
    #[must_use]
    pub fn new(name: impl Into<String>, angles: [Angle; 3]) -> Self {
        Self {
            name: name.into(),
            angles,
        }
    }
}

/// A daughter volume placed inside a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementData {
    pub name: String,
    pub volume: VolumeId,
    pub position: Option<PositionId>,
    pub rotation: Option<RotationId>,
}

impl PlacementData {
    /// Creates a placement at the parent's origin, unrotated.
    #[must_use]
    pub fn new(name: impl Into<String>, volume: VolumeId) -> Self {
        Self {
            name: name.into(),
            volume,
            position: None,
            rotation: None,
        }
    }
}

impl Named for PositionData {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for RotationData {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for PlacementData {
    fn name(&self) -> &str {
        &self.name
    }
}
