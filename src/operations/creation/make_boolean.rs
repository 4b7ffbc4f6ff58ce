use crate::error::{GeometryError, Result};
use crate::math::Vector3;
use crate::store::{
    BooleanOp, GeometryStore, PositionData, RotationData, ShapeData, ShapeId, ShapeKind,
};
use crate::units::Angle;

/// One step of a boolean chain: combine the running shape with `operand`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanStep {
    pub op: BooleanOp,
    pub operand: ShapeId,
    /// Placement of the operand in the running shape's frame.
    pub offset: Option<Vector3>,
    pub rotation: Option<[Angle; 3]>,
}

/// Builds a shape by folding a list of boolean steps over a base shape.
///
/// Every intermediate result is registered as `"{name}_step{i}"`; the final
/// one takes `name`. Operand positions and rotations are registered as
/// `"{shape}_pos"` and `"{shape}_rot"`.
pub struct MakeBoolean {
    name: String,
    base: ShapeId,
    steps: Vec<BooleanStep>,
}

impl MakeBoolean {
    /// Creates a new chain starting from `base`.
    #[must_use]
    pub fn new(name: impl Into<String>, base: ShapeId) -> Self {
        Self {
            name: name.into(),
            base,
            steps: Vec::new(),
        }
    }

    /// Appends a union with `operand`, displaced by `offset`.
    #[must_use]
    pub fn union(self, operand: ShapeId, offset: Option<Vector3>) -> Self {
        self.step(BooleanStep {
            op: BooleanOp::Union,
            operand,
            offset,
            rotation: None,
        })
    }

    /// Appends a subtraction of `operand`, displaced by `offset`.
    #[must_use]
    pub fn subtract(self, operand: ShapeId, offset: Option<Vector3>) -> Self {
        self.step(BooleanStep {
            op: BooleanOp::Subtraction,
            operand,
            offset,
            rotation: None,
        })
    }

    /// Appends an arbitrary step.
    #[must_use]
    pub fn step(mut self, step: BooleanStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Executes the chain, returning the final shape.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyBoolean`] if no step was added, or a
    /// store error if a name is taken or an operand is unknown.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<ShapeId> {
        let Some(last) = self.steps.len().checked_sub(1) else {
            return Err(GeometryError::EmptyBoolean(self.name.clone()).into());
        };

        self.steps
            .iter()
            .enumerate()
            .try_fold(self.base, |acc, (i, step)| -> Result<ShapeId> {
                let name = if i == last {
                    self.name.clone()
                } else {
                    format!("{}_step{i}", self.name)
                };
                let position = step
                    .offset
                    .map(|o| store.add_position(PositionData::new(format!("{name}_pos"), o)))
                    .transpose()?;
                let rotation = step
                    .rotation
                    .map(|r| store.add_rotation(RotationData::new(format!("{name}_rot"), r)))
                    .transpose()?;
                let id = store.add_shape(ShapeData::new(
                    name,
                    ShapeKind::Boolean {
                        op: step.op,
                        first: acc,
                        second: step.operand,
                        position,
                        rotation,
                    },
                ))?;
                Ok(id)
            })
    }
}
