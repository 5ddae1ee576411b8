//! # Synthetic Workload Pipeline for ecomesh
//!
//! Generates seeded synthetic inference samples and modeled workload
//! durations, then runs them through the `eco-core` estimation engine.
//!
//! ## Features
//!
//! - Reproducible sample batches from a single seed
//! - Modeled energy and CO2 for sampled or explicit durations
//! - Jittered prompt estimates
//! - CSV/JSON export through a directory report sink

pub mod export;
pub mod generator;
pub mod sampler;

pub use export::DirectorySink;
pub use generator::SampleGenerator;
pub use sampler::{DurationSampler, ModeledConfig, PromptSampler};

use anyhow::Result;
use eco_core::{AnalyticsReport, CarbonEstimator, EstimatorConfig, ModeledEstimate, PromptEstimate, ReportSink};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of synthetic samples to generate
    pub samples: usize,
    /// Modeled workload configuration
    #[serde(default)]
    pub modeled: ModeledConfig,
    /// Device and emission parameters
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 600,
            modeled: ModeledConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` if given, otherwise defaults with the layered estimator config
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self {
                estimator: EstimatorConfig::load()?,
                ..Self::default()
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.modeled.validate() {
            return Err(anyhow::anyhow!("Invalid modeled workload: {}", e));
        }

        self.estimator.validate()?;

        if self.samples == 0 {
            tracing::warn!("Configuration requests zero samples; the report will be empty");
        }

        Ok(())
    }
}

/// Pipeline runner that wires generators to the estimation core
pub struct PipelineRunner {
    config: SimulationConfig,
    estimator: CarbonEstimator,
}

impl PipelineRunner {
    /// Create a new pipeline runner
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let estimator = CarbonEstimator::from_config(&config.estimator)?;

        Ok(Self { config, estimator })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn estimator(&self) -> &CarbonEstimator {
        &self.estimator
    }

    /// Generate the synthetic batch, enrich it and aggregate it
    pub fn run_analytics(&self) -> Result<AnalyticsReport> {
        tracing::info!(
            "Starting analytics run: {} samples, seed {}",
            self.config.samples,
            self.config.seed
        );

        let samples = SampleGenerator::new(self.config.seed).generate_batch(self.config.samples)?;
        let report = AnalyticsReport::build(&samples)?;

        tracing::info!("Aggregated {} models", report.summary.len());
        Ok(report)
    }

    /// Run analytics and hand the report to `sink`
    pub fn run_analytics_into(&self, sink: &mut dyn ReportSink) -> Result<AnalyticsReport> {
        let report = self.run_analytics()?;
        sink.deliver(&report)?;
        Ok(report)
    }

    /// Estimate explicit durations, or `modeled.runs` sampled ones when empty
    pub fn run_modeled(&self, durations: &[f64]) -> Result<Vec<ModeledEstimate>> {
        let durations = if durations.is_empty() {
            let mut sampler = DurationSampler::new(self.config.modeled.clone(), self.config.seed)
                .map_err(|e| anyhow::anyhow!("Failed to create duration sampler: {}", e))?;
            sampler.sample_runs()
        } else {
            durations.to_vec()
        };

        tracing::info!("Estimating {} modeled workloads", durations.len());
        Ok(self.estimator.estimate_batch(&durations)?)
    }

    /// Classify a prompt and estimate it with a jittered multiplier
    pub fn run_prompt(&self, prompt: &str) -> Result<PromptEstimate> {
        let assessment = eco_core::prompt::classify(prompt);
        let multiplier = PromptSampler::new(self.config.seed).sample_multiplier(&assessment);

        tracing::debug!(category = %assessment.category, multiplier, "Classified prompt");
        Ok(eco_core::prompt::estimate(assessment, multiplier)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_config() -> SimulationConfig {
        SimulationConfig {
            seed: 42,
            samples: 120,
            modeled: ModeledConfig { runs: 3, min_duration_s: 1.0, max_duration_s: 8.0 },
            estimator: EstimatorConfig::default(),
        }
    }

    #[test]
    fn test_config_validation() {
        let config = create_test_config();
        assert!(config.validate().is_ok());

        let mut invalid_config = config.clone();
        invalid_config.modeled.max_duration_s = 0.5;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = config;
        invalid_config.estimator.emission.carbon_intensity_kg_per_kwh = -0.2;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("sim.yaml");

        let config = create_test_config();
        config.to_yaml_file(&path).unwrap();
        let loaded = SimulationConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_defaults_for_missing_sections() {
        let config: SimulationConfig = serde_yaml::from_str("seed: 3\nsamples: 10\n").unwrap();
        assert_eq!(config.modeled, ModeledConfig::default());
        assert_eq!(config.estimator, EstimatorConfig::default());
    }

    #[test]
    fn test_run_analytics() {
        let runner = PipelineRunner::new(create_test_config()).unwrap();
        let report = runner.run_analytics().unwrap();

        assert_eq!(report.samples.len(), 120);
        let total: usize = report.summary.iter().map(|m| m.sample_count).sum();
        assert_eq!(total, 120);
        let share_total: usize = report.categories.iter().map(|c| c.count).sum();
        assert_eq!(share_total, 120);
        assert!((report.correlation.energy_co2.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_analytics_reproducible() {
        let a = PipelineRunner::new(create_test_config()).unwrap().run_analytics().unwrap();
        let b = PipelineRunner::new(create_test_config()).unwrap().run_analytics().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_analytics_into_sink() {
        let temp_dir = tempdir().unwrap();
        let runner = PipelineRunner::new(create_test_config()).unwrap();
        let mut sink = DirectorySink::new(temp_dir.path().join("out"));

        runner.run_analytics_into(&mut sink).unwrap();
        assert!(temp_dir.path().join("out").join(export::DATASET_FILE).exists());
    }

    #[test]
    fn test_run_modeled() {
        let runner = PipelineRunner::new(create_test_config()).unwrap();

        let sampled = runner.run_modeled(&[]).unwrap();
        assert_eq!(sampled.len(), 3);

        let explicit = runner.run_modeled(&[3600.0]).unwrap();
        assert!((explicit[0].co2_kg - 120.285).abs() < 1e-9);

        assert!(runner.run_modeled(&[1.0, -1.0]).is_err());
    }

    #[test]
    fn test_run_prompt() {
        let runner = PipelineRunner::new(create_test_config()).unwrap();
        let estimate = runner.run_prompt("debug this python script").unwrap();

        let (low, high) = estimate.assessment.multiplier_range();
        assert!(estimate.multiplier >= low && estimate.multiplier < high);
        assert_eq!(estimate.models.len(), 4);
    }
}
