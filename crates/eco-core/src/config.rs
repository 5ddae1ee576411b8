//! Configuration management for ecomesh
//!
//! Provides the estimator configuration with layered loading from defaults,
//! YAML files and environment variables.

use crate::error::{ensure_non_negative, ensure_positive};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ECO_CONFIG";

/// Prefix for environment overrides, e.g. `ECO_EMISSION__PUE=1.4`
pub const ENV_PREFIX: &str = "ECO";

/// Top-level estimator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Device utilization assumptions for the modeled-energy path
    #[serde(default)]
    pub device: DeviceUtilizationProfile,

    /// Carbon intensity and data-center overhead
    #[serde(default)]
    pub emission: EmissionConfig,
}

impl EstimatorConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Configuration file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(config::File::with_name(&config_path).required(true));
        } else {
            for path in &["./eco.yaml", "/etc/eco/config.yaml"] {
                builder = builder.add_source(config::File::with_name(path).required(false));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let parsed: Self = builder.build()?.try_deserialize()?;
        parsed.validate()?;

        tracing::debug!(?parsed, "Loaded estimator configuration");
        Ok(parsed)
    }

    /// Load configuration from a specific file layered over the defaults
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path));

        let parsed: Self = builder.build()?.try_deserialize()?;
        parsed.validate()?;

        Ok(parsed)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.device.validate()?;
        self.emission.validate()?;
        Ok(())
    }
}

/// Hardware draw assumptions used to model energy from a duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceUtilizationProfile {
    /// GPU board power in watts
    pub gpu_watts: f64,
    /// Fraction of GPU board power drawn on average
    pub gpu_utilization: f64,
    /// CPU thermal design power in watts
    pub cpu_tdp_watts: f64,
    /// Fraction of CPU TDP drawn on average
    pub cpu_utilization: f64,
    /// Installed memory in GB
    pub ram_gb: f64,
    /// Memory draw per GB in watts
    pub ram_watts_per_gb: f64,
}

impl Default for DeviceUtilizationProfile {
    fn default() -> Self {
        Self {
            gpu_watts: 250.0,
            gpu_utilization: 0.75,
            cpu_tdp_watts: 65.0,
            cpu_utilization: 0.45,
            ram_gb: 16.0,
            ram_watts_per_gb: 0.375,
        }
    }
}

impl DeviceUtilizationProfile {
    /// Validate that every field is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("gpu_watts", self.gpu_watts)?;
        ensure_non_negative("gpu_utilization", self.gpu_utilization)?;
        ensure_non_negative("cpu_tdp_watts", self.cpu_tdp_watts)?;
        ensure_non_negative("cpu_utilization", self.cpu_utilization)?;
        ensure_non_negative("ram_gb", self.ram_gb)?;
        ensure_non_negative("ram_watts_per_gb", self.ram_watts_per_gb)?;
        Ok(())
    }
}

/// Grid carbon intensity and power usage effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionConfig {
    /// kg CO2 emitted per kWh consumed
    pub carbon_intensity_kg_per_kwh: f64,
    /// Data-center overhead multiplier
    pub pue: f64,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            carbon_intensity_kg_per_kwh: 0.45,
            pue: 1.2,
        }
    }
}

impl EmissionConfig {
    /// Validate that both multipliers are strictly positive
    pub fn validate(&self) -> Result<()> {
        ensure_positive("carbon_intensity_kg_per_kwh", self.carbon_intensity_kg_per_kwh)?;
        ensure_positive("pue", self.pue)?;
        Ok(())
    }
}
