use eco_core::PromptAssessment;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// Modeled-workload configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeledConfig {
    /// Number of durations to draw
    pub runs: usize,
    /// Inclusive lower bound in seconds
    pub min_duration_s: f64,
    /// Exclusive upper bound in seconds
    pub max_duration_s: f64,
}

impl Default for ModeledConfig {
    fn default() -> Self {
        Self {
            runs: 5,
            min_duration_s: 1.0,
            max_duration_s: 8.0,
        }
    }
}

impl ModeledConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_duration_s.is_finite() || !self.max_duration_s.is_finite() {
            return Err("Duration bounds must be finite".to_string());
        }
        if self.min_duration_s < 0.0 {
            return Err(format!("min_duration_s must be non-negative, got {}", self.min_duration_s));
        }
        if self.max_duration_s <= self.min_duration_s {
            return Err(format!(
                "max_duration_s ({}) must exceed min_duration_s ({})",
                self.max_duration_s, self.min_duration_s
            ));
        }
        Ok(())
    }
}

/// Draws workload durations in seconds, rounded to two decimals
#[derive(Clone)]
pub struct DurationSampler {
    config: ModeledConfig,
    rng: SmallRng,
}

impl DurationSampler {
    pub fn new(config: ModeledConfig, seed: u64) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn sample(&mut self) -> f64 {
        let raw = self
            .rng
            .gen_range(self.config.min_duration_s..self.config.max_duration_s);
        (raw * 100.0).round() / 100.0
    }

    /// Draw `config.runs` durations
    pub fn sample_runs(&mut self) -> Vec<f64> {
        (0..self.config.runs).map(|_| self.sample()).collect()
    }
}

/// Draws a jittered multiplier within an assessment's band
pub struct PromptSampler {
    rng: SmallRng,
}

impl PromptSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn sample_multiplier(&mut self, assessment: &PromptAssessment) -> f64 {
        let (low, high) = assessment.multiplier_range();
        self.rng.gen_range(low..high)
    }
}
