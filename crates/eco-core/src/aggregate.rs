//! Batch aggregation and derived metrics over workload samples

use crate::types::{ModelName, ScoredSample, TaskCategory, WorkloadSample};
use crate::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Decimal places kept in summary means
pub const SUMMARY_PRECISION: i32 = 3;

/// Round `value` to `places` decimal places, half away from zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Per-model means over a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub model: ModelName,
    pub sample_count: usize,
    pub mean_energy_kwh: f64,
    pub mean_co2_grams: f64,
    pub mean_token_count: f64,
}

/// Summary keyed by model, ordered by model display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub models: Vec<ModelSummary>,
}

impl AggregateSummary {
    pub fn get(&self, model: ModelName) -> Option<&ModelSummary> {
        self.models.iter().find(|s| s.model == model)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelSummary> {
        self.models.iter()
    }
}

/// Count and share of one task category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: TaskCategory,
    pub count: usize,
    pub percentage: f64,
}

/// Pearson correlations between token count, energy and CO2.
///
/// A cell is `None` when it is undefined: fewer than two samples, or a column
/// with zero variance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub tokens_energy: Option<f64>,
    pub tokens_co2: Option<f64>,
    pub energy_co2: Option<f64>,
}

impl CorrelationMatrix {
    pub const LABELS: [&'static str; 3] = ["Tokens", "Energy_kWh", "CO2_grams"];

    /// Full 3x3 matrix in [`Self::LABELS`] order
    pub fn as_rows(&self) -> [[Option<f64>; 3]; 3] {
        [
            [Some(1.0), self.tokens_energy, self.tokens_co2],
            [self.tokens_energy, Some(1.0), self.energy_co2],
            [self.tokens_co2, self.energy_co2, Some(1.0)],
        ]
    }
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    count: usize,
    energy_kwh: f64,
    co2_grams: f64,
    token_count: u64,
}

/// Stateless aggregation over sample batches
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAggregator;

impl RecordAggregator {
    /// Group samples by model and compute rounded means.
    ///
    /// Reduction is sequential in input order so results are reproducible to
    /// the bit. Groups are ordered by model display name.
    pub fn summarize(samples: &[WorkloadSample]) -> AggregateSummary {
        let mut groups: BTreeMap<&'static str, (ModelName, GroupAccumulator)> = BTreeMap::new();

        for sample in samples {
            let (_, acc) = groups
                .entry(sample.model().as_str())
                .or_insert_with(|| (sample.model(), GroupAccumulator::default()));
            acc.count += 1;
            acc.energy_kwh += sample.energy_kwh();
            acc.co2_grams += sample.co2_grams();
            acc.token_count += u64::from(sample.token_count());
        }

        let models = groups
            .into_values()
            .map(|(model, acc)| {
                let n = acc.count as f64;
                ModelSummary {
                    model,
                    sample_count: acc.count,
                    mean_energy_kwh: round_to(acc.energy_kwh / n, SUMMARY_PRECISION),
                    mean_co2_grams: round_to(acc.co2_grams / n, SUMMARY_PRECISION),
                    mean_token_count: round_to(acc.token_count as f64 / n, SUMMARY_PRECISION),
                }
            })
            .collect();

        AggregateSummary { models }
    }

    /// Efficiency score: `1000 / co2_grams + token_count / 500`
    pub fn score(sample: &WorkloadSample) -> Result<f64> {
        if sample.co2_grams() == 0.0 {
            return Err(Error::division_by_zero(format!(
                "efficiency score of sample {} is undefined for zero co2_grams",
                sample.id()
            )));
        }

        let score = 1000.0 / sample.co2_grams() + f64::from(sample.token_count()) / 500.0;
        if !score.is_finite() {
            return Err(Error::division_by_zero(format!(
                "efficiency score of sample {} overflows for co2_grams {}",
                sample.id(),
                sample.co2_grams()
            )));
        }
        Ok(score)
    }

    /// Score every sample, preserving input order; any failure fails the batch
    pub fn enrich(samples: &[WorkloadSample]) -> Result<Vec<ScoredSample>> {
        let scored = samples
            .par_iter()
            .map(|sample| -> Result<ScoredSample> {
                Ok(ScoredSample {
                    sample: sample.clone(),
                    efficiency_score: Self::score(sample)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = scored.len(), "Enriched samples with efficiency scores");
        Ok(scored)
    }

    /// Category counts and percentages, most frequent first
    pub fn category_distribution(samples: &[WorkloadSample]) -> Vec<CategoryShare> {
        let mut counts: HashMap<TaskCategory, usize> = HashMap::new();
        for sample in samples {
            *counts.entry(sample.category()).or_insert(0) += 1;
        }

        let total = samples.len() as f64;
        let mut shares: Vec<CategoryShare> = counts
            .into_iter()
            .map(|(category, count)| CategoryShare {
                category,
                count,
                percentage: count as f64 * 100.0 / total,
            })
            .collect();

        shares.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });
        shares
    }

    /// Pairwise Pearson correlations of tokens, energy and CO2
    pub fn correlation_matrix(samples: &[WorkloadSample]) -> CorrelationMatrix {
        let tokens: Vec<f64> = samples.iter().map(|s| f64::from(s.token_count())).collect();
        let energy: Vec<f64> = samples.iter().map(|s| s.energy_kwh()).collect();
        let co2: Vec<f64> = samples.iter().map(|s| s.co2_grams()).collect();

        CorrelationMatrix {
            tokens_energy: pearson(&tokens, &energy),
            tokens_co2: pearson(&tokens, &co2),
            energy_co2: pearson(&energy, &co2),
        }
    }

    /// `(token_count, co2_grams)` pairs ordered by token count
    pub fn co2_by_tokens(samples: &[WorkloadSample]) -> Vec<(u32, f64)> {
        let mut series: Vec<(u32, f64)> = samples
            .iter()
            .map(|s| (s.token_count(), s.co2_grams()))
            .collect();
        series.sort_by_key(|&(tokens, _)| tokens);
        series
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
