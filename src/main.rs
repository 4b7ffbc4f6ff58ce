//! Builds the ProtoDUNE vertical-drift geometry and reports what was made.
//!
//! ```text
//! pdvd-geometry                                   # nominal configuration
//! pdvd-geometry --config config/protodune_vd.toml
//! pdvd-geometry --channel-map channels.json --place-wires
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pdvd_geometry::builders::WorldBuilder;
use pdvd_geometry::config::DetectorConfig;
use pdvd_geometry::store::GeometryStore;
use pdvd_geometry::wires::View;

#[derive(Parser)]
#[command(name = "pdvd-geometry")]
#[command(about = "Build the ProtoDUNE-VD detector geometry", long_about = None)]
struct Cli {
    /// TOML configuration file (default: built-in nominal values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the wire channel map to this JSON file
    #[arg(long)]
    channel_map: Option<PathBuf>,

    /// Place one volume per induction wire
    #[arg(long)]
    place_wires: bool,
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for this crate.
    // Override with RUST_LOG (e.g. RUST_LOG=pdvd_geometry=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("pdvd_geometry=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => DetectorConfig::nominal(),
    };
    if cli.place_wires {
        config.tpc.place_wires = true;
    }
    let params = config.validate().context("validating configuration")?;

    let mut store = GeometryStore::new();
    let mut world = WorldBuilder::protodune_vd();
    world.configure(&params)?;
    world
        .construct(&mut store)
        .context("constructing the detector geometry")?;

    let map = world.tpc().channel_map();
    for crm in world.tpc().crms() {
        info!(
            crm = crm.index,
            u = map.count(crm.index, View::U),
            v = map.count(crm.index, View::V),
            "wire channels"
        );
    }
    info!(
        materials = store.material_count(),
        shapes = store.shape_count(),
        volumes = store.volume_count(),
        placements = store.placement_count(),
        "geometry summary"
    );

    if let Some(path) = &cli.channel_map {
        let json = serde_json::to_string_pretty(&map).context("serializing channel map")?;
        fs::write(path, json)
            .with_context(|| format!("writing channel map {}", path.display()))?;
        info!(path = %path.display(), channels = map.records().len(), "wrote channel map");
    }

    Ok(())
}
