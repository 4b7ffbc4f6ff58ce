use crate::error::{GeometryError, Result};
use crate::store::{GeometryStore, ShapeData, ShapeId, ShapeKind};

/// Creates a full-circle tube along z.
pub struct MakeTube {
    name: String,
    rmin: f64,
    rmax: f64,
    half_z: f64,
}

impl MakeTube {
    /// Creates a new `MakeTube` operation.
    #[must_use]
    pub fn new(name: impl Into<String>, rmin: f64, rmax: f64, half_z: f64) -> Self {
        Self {
            name: name.into(),
            rmin,
            rmax,
            half_z,
        }
    }

    /// Executes the operation, registering the tube in the store.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] unless `0 <= rmin < rmax` and
    /// `half_z > 0`.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<ShapeId> {
        let valid = self.rmin >= 0.0
            && self.rmax > self.rmin
            && self.rmax.is_finite()
            && self.half_z > 0.0
            && self.half_z.is_finite();
        if !valid {
            return Err(GeometryError::Degenerate {
                name: self.name.clone(),
                reason: "tube needs 0 <= rmin < rmax and a positive length",
            }
            .into());
        }
        let id = store.add_shape(ShapeData::new(
            self.name.clone(),
            ShapeKind::Tube {
                rmin: self.rmin,
                rmax: self.rmax,
                half_z: self.half_z,
            },
        ))?;
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn solid_wire_tube() {
        let mut store = GeometryStore::new();
        let id = MakeTube::new("wire", 0.0, 0.0075, 10.0)
            .execute(&mut store)
            .unwrap();
        assert!(matches!(
            store.shape(id).unwrap().kind,
            ShapeKind::Tube { rmin, .. } if rmin == 0.0
        ));
    }

    #[test]
    fn inverted_radii_fail() {
        let mut store = GeometryStore::new();
        assert!(MakeTube::new("t", 2.0, 1.0, 1.0).execute(&mut store).is_err());
        assert!(MakeTube::new("t", 0.0, 1.0, 0.0).execute(&mut store).is_err());
    }
}
