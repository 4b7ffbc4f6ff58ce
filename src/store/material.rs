use super::Named;

slotmap::new_key_type! {
    /// Unique identifier for a material in the geometry store.
    pub struct MaterialId;
}

/// How a material is built from other materials.
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// A chemical element with its atomic number and molar mass in g/mole.
    Element {
        symbol: String,
        z: u32,
        molar_mass: f64,
    },
    /// Elements with atom counts.
    Molecule(Vec<(MaterialId, u32)>),
    /// Materials with mass fractions.
    Mixture(Vec<(MaterialId, f64)>),
}

impl Composition {
    /// The materials this composition refers to.
    #[must_use]
    pub fn components(&self) -> Vec<MaterialId> {
        match self {
            Composition::Element { .. } => Vec::new(),
            Composition::Molecule(atoms) => atoms.iter().map(|(id, _)| *id).collect(),
            Composition::Mixture(fractions) => fractions.iter().map(|(id, _)| *id).collect(),
        }
    }
}

/// Data associated with a material. Densities are in g/cm³.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    pub name: String,
    /// Elements carry no density.
    pub density: Option<f64>,
    pub composition: Composition,
}

impl MaterialData {
    /// Creates an element.
    #[must_use]
    pub fn element(name: &str, symbol: &str, z: u32, molar_mass: f64) -> Self {
        Self {
            name: name.to_owned(),
            density: None,
            composition: Composition::Element {
                symbol: symbol.to_owned(),
                z,
                molar_mass,
            },
        }
    }

    /// Creates a molecule from elements and atom counts.
    #[must_use]
    pub fn molecule(name: &str, density: f64, atoms: Vec<(MaterialId, u32)>) -> Self {
        Self {
            name: name.to_owned(),
            density: Some(density),
            composition: Composition::Molecule(atoms),
        }
    }

    /// Creates a mixture from materials and mass fractions.
    #[must_use]
    pub fn mixture(name: &str, density: f64, fractions: Vec<(MaterialId, f64)>) -> Self {
        Self {
            name: name.to_owned(),
            density: Some(density),
            composition: Composition::Mixture(fractions),
        }
    }
}

impl Named for MaterialData {
    fn name(&self) -> &str {
        &self.name
    }
}
