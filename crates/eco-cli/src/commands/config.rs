//! Simulation configuration commands

use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use eco_sim::SimulationConfig;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Flattened view of a validated configuration
#[derive(Debug, Serialize)]
pub struct ConfigOverview {
    pub seed: u64,
    pub samples: usize,
    pub modeled_runs: usize,
    pub duration_range_s: (f64, f64),
    pub gpu_watts: f64,
    pub carbon_intensity_kg_per_kwh: f64,
    pub pue: f64,
}

impl From<&SimulationConfig> for ConfigOverview {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            seed: config.seed,
            samples: config.samples,
            modeled_runs: config.modeled.runs,
            duration_range_s: (config.modeled.min_duration_s, config.modeled.max_duration_s),
            gpu_watts: config.estimator.device.gpu_watts,
            carbon_intensity_kg_per_kwh: config.estimator.emission.carbon_intensity_kg_per_kwh,
            pue: config.estimator.emission.pue,
        }
    }
}

impl Formattable for ConfigOverview {
    fn table_headers() -> Vec<String> {
        vec![
            "Seed".to_string(),
            "Samples".to_string(),
            "Runs".to_string(),
            "Durations (s)".to_string(),
            "GPU (W)".to_string(),
            "Intensity (kg/kWh)".to_string(),
            "PUE".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.seed.to_string(),
            self.samples.to_string(),
            self.modeled_runs.to_string(),
            format!("[{}, {})", self.duration_range_s.0, self.duration_range_s.1),
            self.gpu_watts.to_string(),
            self.carbon_intensity_kg_per_kwh.to_string(),
            self.pue.to_string(),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        Self::table_headers().into_iter().zip(self.table_row()).collect()
    }
}

/// Write the default simulation configuration as YAML
pub fn generate_config(output_path: PathBuf, output_format: OutputFormat) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);

    let config = SimulationConfig::default();
    config.to_yaml_file(&output_path)?;

    info!("Example configuration saved to {:?}", output_path);
    formatter.print_success(&format!("Configuration written to {}", output_path.display()))?;
    Ok(())
}

/// Load and validate a simulation configuration
pub fn validate_config(config_path: PathBuf, output_format: OutputFormat) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);
    info!("Validating configuration file: {:?}", config_path);

    let config = SimulationConfig::from_yaml_file(&config_path)?;
    config.validate()?;

    formatter.print_success_with("Configuration is valid", &ConfigOverview::from(&config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_then_validate() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("eco.yaml");

        assert!(generate_config(output_path.clone(), OutputFormat::Text).is_ok());
        assert!(output_path.exists());
        assert!(validate_config(output_path.clone(), OutputFormat::Text).is_ok());
        assert!(validate_config(output_path, OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");

        let mut config = SimulationConfig::default();
        config.estimator.emission.pue = 0.0;
        config.to_yaml_file(&config_path).unwrap();

        assert!(validate_config(config_path, OutputFormat::Text).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let temp_dir = tempdir().unwrap();
        assert!(validate_config(temp_dir.path().join("missing.yaml"), OutputFormat::Text).is_err());
    }

    #[test]
    fn test_overview_pairs() {
        let overview = ConfigOverview::from(&SimulationConfig::default());
        let pairs = overview.key_value_pairs();

        assert_eq!(pairs[0], ("Seed".to_string(), "42".to_string()));
        assert_eq!(pairs[3].1, "[1, 8)");
    }
}
