use super::{Named, PositionId, RotationId};
use crate::math::Vector3;

slotmap::new_key_type! {
    /// Unique identifier for a solid shape in the geometry store.
    pub struct ShapeId;
}

/// The kind of boolean combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtraction,
}

/// Solid description of a shape. Lengths are in centimetres.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned box given by its half-lengths.
    Box { half: Vector3 },
    /// Cylinder along z with inner and outer radius.
    Tube { rmin: f64, rmax: f64, half_z: f64 },
    /// `first op second`, with `second` displaced in `first`'s frame.
    Boolean {
        op: BooleanOp,
        first: ShapeId,
        second: ShapeId,
        position: Option<PositionId>,
        rotation: Option<RotationId>,
    },
}

/// Data associated with a registered shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeData {
    pub name: String,
    pub kind: ShapeKind,
}

impl ShapeData {
    /// Creates new shape data.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Full extents of a box shape, or `None` for other kinds.
    #[must_use]
    pub fn box_size(&self) -> Option<Vector3> {
        match self.kind {
            ShapeKind::Box { half } => Some(half * 2.0),
            _ => None,
        }
    }
}

impl Named for ShapeData {
    fn name(&self) -> &str {
        &self.name
    }
}
