use eco_core::types::TOKEN_COUNT_RANGE;
use eco_core::{ModelName, SampleId, TaskCategory, WorkloadSample};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::Uniform;

/// Difficulty multiplier bounds applied to a model's base emission
pub const DIFFICULTY_RANGE: (f64, f64) = (1.0, 3.5);

/// Seeded generator of synthetic per-query samples
#[derive(Clone)]
pub struct SampleGenerator {
    rng: SmallRng,
    difficulty: Uniform<f64>,
    tokens: Uniform<u32>,
    next_sample_id: SampleId,
}

impl SampleGenerator {
    /// Create a new generator; the same seed always yields the same samples
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            difficulty: Uniform::new(DIFFICULTY_RANGE.0, DIFFICULTY_RANGE.1),
            tokens: Uniform::new(TOKEN_COUNT_RANGE.start, TOKEN_COUNT_RANGE.end),
            next_sample_id: 1,
        }
    }

    /// Generate the next sample
    pub fn generate_sample(&mut self) -> eco_core::Result<WorkloadSample> {
        let id = self.next_sample_id;
        self.next_sample_id += 1;

        let model = *ModelName::ALL.choose(&mut self.rng).unwrap_or(&ModelName::Gpt4);
        let category = *TaskCategory::ALL
            .choose(&mut self.rng)
            .unwrap_or(&TaskCategory::General);

        let difficulty = self.difficulty.sample(&mut self.rng);
        let co2_grams = model.base_emission_grams() * difficulty;
        let token_count = self.tokens.sample(&mut self.rng);

        WorkloadSample::new(id, model, category, token_count, co2_grams)
    }

    /// Generate `count` samples with consecutive ids
    pub fn generate_batch(&mut self, count: usize) -> eco_core::Result<Vec<WorkloadSample>> {
        let samples = (0..count)
            .map(|_| self.generate_sample())
            .collect::<eco_core::Result<Vec<_>>>()?;

        tracing::info!("Generated {} synthetic samples", samples.len());
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_deterministic() {
        let a = SampleGenerator::new(42).generate_batch(50).unwrap();
        let b = SampleGenerator::new(42).generate_batch(50).unwrap();
        assert_eq!(a, b);

        let c = SampleGenerator::new(7).generate_batch(50).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_sequential_ids() {
        let samples = SampleGenerator::new(42).generate_batch(10).unwrap();
        let ids: Vec<u64> = samples.iter().map(|s| s.id()).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_generated_fields_within_domain() {
        let samples = SampleGenerator::new(42).generate_batch(600).unwrap();

        for sample in &samples {
            assert!(TOKEN_COUNT_RANGE.contains(&sample.token_count()));

            let base = sample.model().base_emission_grams();
            let difficulty = sample.co2_grams() / base;
            assert!(difficulty >= DIFFICULTY_RANGE.0 - 1e-12);
            assert!(difficulty < DIFFICULTY_RANGE.1 + 1e-12);

            assert!((sample.energy_kwh() - sample.co2_grams() / 500.0).abs() < 1e-15);
        }

        // 600 uniform draws over four models should hit every model
        for model in ModelName::ALL {
            assert!(samples.iter().any(|s| s.model() == model));
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(SampleGenerator::new(1).generate_batch(0).unwrap().is_empty());
    }
}
