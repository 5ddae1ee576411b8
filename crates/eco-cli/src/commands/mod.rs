//! Command implementations for the eco CLI

pub mod analyze;
pub mod config;
pub mod estimate;
pub mod prompt;

use anyhow::Result;
use eco_sim::SimulationConfig;
use std::path::Path;
use tracing::info;

/// Load the simulation config and apply a command-line seed override
pub(crate) fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<SimulationConfig> {
    match path {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("Using default configuration with layered estimator settings"),
    }

    let mut config = SimulationConfig::load(path)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}
