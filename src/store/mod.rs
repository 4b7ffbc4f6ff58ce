pub mod material;
pub mod placement;
pub mod shape;
pub mod volume;

pub use material::{Composition, MaterialData, MaterialId};
pub use placement::{PlacementData, PlacementId, PositionData, PositionId, RotationData, RotationId};
pub use shape::{BooleanOp, ShapeData, ShapeId, ShapeKind};
pub use volume::{VolumeData, VolumeId};

use std::collections::HashMap;

use slotmap::{Key, SlotMap};

use crate::error::StoreError;

/// Entities registered in the store under a unique name.
pub trait Named {
    /// The registered name.
    fn name(&self) -> &str;
}

/// A slot map of one entity kind with a name index on the side.
#[derive(Debug)]
struct Registry<K: Key, V> {
    kind: &'static str,
    items: SlotMap<K, V>,
    by_name: HashMap<String, K>,
}

impl<K: Key, V: Named> Registry<K, V> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: SlotMap::with_key(),
            by_name: HashMap::new(),
        }
    }

    fn insert(&mut self, data: V) -> Result<K, StoreError> {
        let name = data.name().to_owned();
        if self.by_name.contains_key(&name) {
            return Err(StoreError::DuplicateName {
                kind: self.kind,
                name,
            });
        }
        let id = self.items.insert(data);
        self.by_name.insert(name, id);
        Ok(id)
    }

    fn get(&self, id: K) -> Result<&V, StoreError> {
        self.items.get(id).ok_or_else(|| self.not_found(id))
    }

    fn get_mut(&mut self, id: K) -> Result<&mut V, StoreError> {
        let kind = self.kind;
        self.items
            .get_mut(id)
            .ok_or_else(|| StoreError::EntityNotFound {
                kind,
                name: format!("{id:?}"),
            })
    }

    fn find(&self, name: &str) -> Result<K, StoreError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::EntityNotFound {
                kind: self.kind,
                name: name.to_owned(),
            })
    }

    fn not_found(&self, id: K) -> StoreError {
        StoreError::EntityNotFound {
            kind: self.kind,
            name: format!("{id:?}"),
        }
    }
}

/// Central arena that owns every material, shape, volume and placement of a
/// geometry.
///
/// Entities reference each other via typed IDs. Each entity kind has its own
/// namespace and every name in it can be written only once; a second write
/// is reported as [`StoreError::DuplicateName`].
#[derive(Debug)]
pub struct GeometryStore {
    materials: Registry<MaterialId, MaterialData>,
    shapes: Registry<ShapeId, ShapeData>,
    volumes: Registry<VolumeId, VolumeData>,
    positions: Registry<PositionId, PositionData>,
    rotations: Registry<RotationId, RotationData>,
    placements: Registry<PlacementId, PlacementData>,
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self {
            materials: Registry::new("material"),
            shapes: Registry::new("shape"),
            volumes: Registry::new("volume"),
            positions: Registry::new("position"),
            rotations: Registry::new("rotation"),
            placements: Registry::new("placement"),
        }
    }
}

impl GeometryStore {
    /// Creates a new, empty geometry store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Material operations ---

    /// Registers a material.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or a component is unknown.
    pub fn add_material(&mut self, data: MaterialData) -> Result<MaterialId, StoreError> {
        for component in data.composition.components() {
            self.materials.get(component)?;
        }
        self.materials.insert(data)
    }

    /// Returns the material data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn material(&self, id: MaterialId) -> Result<&MaterialData, StoreError> {
        self.materials.get(id)
    }

    /// Looks up a material by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no material has this name.
    pub fn material_by_name(&self, name: &str) -> Result<MaterialId, StoreError> {
        self.materials.find(name)
    }

    // --- Shape operations ---

    /// Registers a shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or a boolean operand is unknown.
    pub fn add_shape(&mut self, data: ShapeData) -> Result<ShapeId, StoreError> {
        if let ShapeKind::Boolean {
            first,
            second,
            position,
            rotation,
            ..
        } = &data.kind
        {
            self.shapes.get(*first)?;
            self.shapes.get(*second)?;
            if let Some(position) = position {
                self.positions.get(*position)?;
            }
            if let Some(rotation) = rotation {
                self.rotations.get(*rotation)?;
            }
        }
        self.shapes.insert(data)
    }

    /// Returns the shape data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shape(&self, id: ShapeId) -> Result<&ShapeData, StoreError> {
        self.shapes.get(id)
    }

    /// Looks up a shape by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no shape has this name.
    pub fn shape_by_name(&self, name: &str) -> Result<ShapeId, StoreError> {
        self.shapes.find(name)
    }

    // --- Volume operations ---

    /// Registers a logical volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken, or the material or shape is
    /// unknown.
    pub fn add_volume(&mut self, data: VolumeData) -> Result<VolumeId, StoreError> {
        self.materials.get(data.material)?;
        self.shapes.get(data.shape)?;
        self.volumes.insert(data)
    }

    /// Returns the volume data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn volume(&self, id: VolumeId) -> Result<&VolumeData, StoreError> {
        self.volumes.get(id)
    }

    /// Looks up a volume by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no volume has this name.
    pub fn volume_by_name(&self, name: &str) -> Result<VolumeId, StoreError> {
        self.volumes.find(name)
    }

    // --- Position and rotation operations ---

    /// Registers a position.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken.
    pub fn add_position(&mut self, data: PositionData) -> Result<PositionId, StoreError> {
        self.positions.insert(data)
    }

    /// Returns the position data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn position(&self, id: PositionId) -> Result<&PositionData, StoreError> {
        self.positions.get(id)
    }

    /// Registers a rotation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken.
    pub fn add_rotation(&mut self, data: RotationData) -> Result<RotationId, StoreError> {
        self.rotations.insert(data)
    }

    /// Returns the rotation data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn rotation(&self, id: RotationId) -> Result<&RotationData, StoreError> {
        self.rotations.get(id)
    }

    // --- Placement operations ---

    /// Registers a placement and appends it to `parent`'s daughter list.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or any referenced entity is
    /// unknown. Nothing is registered in that case.
    pub fn add_placement(
        &mut self,
        parent: VolumeId,
        data: PlacementData,
    ) -> Result<PlacementId, StoreError> {
        self.volumes.get(parent)?;
        self.volumes.get(data.volume)?;
        if let Some(position) = data.position {
            self.positions.get(position)?;
        }
        if let Some(rotation) = data.rotation {
            self.rotations.get(rotation)?;
        }
        let id = self.placements.insert(data)?;
        self.volumes.get_mut(parent)?.placements.push(id);
        Ok(id)
    }

    /// Returns the placement data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn placement(&self, id: PlacementId) -> Result<&PlacementData, StoreError> {
        self.placements.get(id)
    }

    /// Looks up a placement by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no placement has this name.
    pub fn placement_by_name(&self, name: &str) -> Result<PlacementId, StoreError> {
        self.placements.find(name)
    }

    // --- Statistics ---

    /// Number of registered materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.items.len()
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.items.len()
    }

    /// Number of registered volumes.
    #[must_use]
    pub fn volume_count(&self) -> usize {
        self.volumes.items.len()
    }

    /// Number of registered placements.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.placements.items.len()
    }
}
