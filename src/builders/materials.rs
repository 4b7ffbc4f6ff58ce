//! Materials used by the detector volumes.

use crate::config::MaterialsParams;
use crate::error::Result;
use crate::store::{GeometryStore, MaterialData};

pub const AIR: &str = "Air";
pub const LAR: &str = "LAr";
pub const GAR: &str = "GAr";
pub const STEEL: &str = "STEEL_STAINLESS_Fe7Cr2Ni";
pub const AIR_STEEL: &str = "AirSteelMixture";
pub const WIRE: &str = "Copper_Beryllium_alloy25";

/// Density of the copper-beryllium wire alloy, g/cm³.
const WIRE_DENSITY: f64 = 8.26;

/// Registers the elements and every material the builders refer to.
///
/// # Errors
///
/// Returns a store error if any material is already defined.
pub fn define_materials(store: &mut GeometryStore, params: &MaterialsParams) -> Result<()> {
    let nitrogen = store.add_material(MaterialData::element("Nitrogen", "N", 7, 14.0067))?;
    let oxygen = store.add_material(MaterialData::element("Oxygen", "O", 8, 15.999))?;
    let argon = store.add_material(MaterialData::element("Argon", "Ar", 18, 39.948))?;
    let iron = store.add_material(MaterialData::element("Iron", "Fe", 26, 55.845))?;
    let nickel = store.add_material(MaterialData::element("Nickel", "Ni", 28, 58.6934))?;
    let copper = store.add_material(MaterialData::element("Copper", "Cu", 29, 63.546))?;
    let beryllium = store.add_material(MaterialData::element("Beryllium", "Be", 4, 9.0122))?;

    let air = store.add_material(MaterialData::mixture(
        AIR,
        params.air_density,
        vec![(nitrogen, 0.7), (oxygen, 0.3)],
    ))?;
    store.add_material(MaterialData::molecule(LAR, params.lar_density, vec![(argon, 1)]))?;
    store.add_material(MaterialData::molecule(GAR, params.gar_density, vec![(argon, 1)]))?;
    let steel = store.add_material(MaterialData::mixture(
        STEEL,
        params.steel_density,
        vec![(iron, 0.7), (nickel, 0.3)],
    ))?;
    store.add_material(MaterialData::mixture(
        AIR_STEEL,
        params.air_steel_density(),
        vec![(steel, params.frac_steel), (air, params.frac_air)],
    ))?;
    store.add_material(MaterialData::mixture(
        WIRE,
        WIRE_DENSITY,
        vec![(copper, 0.98), (beryllium, 0.02)],
    ))?;
    Ok(())
}
