use crate::error::{GeometryError, Result};
use crate::math::Vector3;
use crate::store::{GeometryStore, ShapeData, ShapeId, ShapeKind};

/// Creates a box shape from its half-lengths.
pub struct MakeBox {
    name: String,
    half: Vector3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(name: impl Into<String>, half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            name: name.into(),
            half: Vector3::new(half_x, half_y, half_z),
        }
    }

    /// Creates a `MakeBox` operation from full side lengths.
    #[must_use]
    pub fn from_size(name: impl Into<String>, size: Vector3) -> Self {
        Self {
            name: name.into(),
            half: size * 0.5,
        }
    }

    /// Executes the operation, registering the box in the store.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if any half-length is not a
    /// positive finite number, or a store error if the name is taken.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<ShapeId> {
        if !self.half.iter().all(|h| h.is_finite() && *h > 0.0) {
            return Err(GeometryError::Degenerate {
                name: self.name.clone(),
                reason: "box half-lengths must be positive",
            }
            .into());
        }
        let id = store.add_shape(ShapeData::new(
            self.name.clone(),
            ShapeKind::Box { half: self.half },
        ))?;
        Ok(id)
    }
}
