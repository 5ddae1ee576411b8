//! Synthetic batch analytics command

use crate::output::{format_percentage, Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use eco_core::{
    AggregateSummary, CategoryShare, CorrelationMatrix, ModelName, ModelSummary, ScoredSample,
    TaskCategory,
};
use eco_sim::{DirectorySink, PipelineRunner};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

impl Formattable for ModelSummary {
    fn table_headers() -> Vec<String> {
        vec![
            "Model".to_string(),
            "Samples".to_string(),
            "Energy (kWh)".to_string(),
            "CO2 (g)".to_string(),
            "Tokens".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.model.to_string(),
            self.sample_count.to_string(),
            format!("{:.3}", self.mean_energy_kwh),
            format!("{:.3}", self.mean_co2_grams),
            format!("{:.3}", self.mean_token_count),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Model".to_string(), self.model.to_string()),
            ("Samples".to_string(), self.sample_count.to_string()),
            ("Mean Energy (kWh)".to_string(), self.mean_energy_kwh.to_string()),
            ("Mean CO2 (g)".to_string(), self.mean_co2_grams.to_string()),
            ("Mean Tokens".to_string(), self.mean_token_count.to_string()),
        ]
    }
}

impl Formattable for CategoryShare {
    fn table_headers() -> Vec<String> {
        vec!["Category".to_string(), "Count".to_string(), "Share".to_string()]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.category.to_string(),
            self.count.to_string(),
            format_percentage(self.percentage),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Category".to_string(), self.category.to_string()),
            ("Count".to_string(), self.count.to_string()),
            ("Share".to_string(), format_percentage(self.percentage)),
        ]
    }
}

impl Formattable for ScoredSample {
    fn table_headers() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Model".to_string(),
            "Category".to_string(),
            "Tokens".to_string(),
            "Energy (kWh)".to_string(),
            "CO2 (g)".to_string(),
            "Score".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        let s = &self.sample;
        vec![
            s.id().to_string(),
            s.model().to_string(),
            s.category().to_string(),
            s.token_count().to_string(),
            format!("{:.5}", s.energy_kwh()),
            format!("{:.3}", s.co2_grams()),
            format!("{:.2}", self.efficiency_score),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        let s = &self.sample;
        vec![
            ("ID".to_string(), s.id().to_string()),
            ("Model".to_string(), s.model().to_string()),
            ("Category".to_string(), s.category().to_string()),
            ("Tokens".to_string(), s.token_count().to_string()),
            ("Energy (kWh)".to_string(), s.energy_kwh().to_string()),
            ("CO2 (g)".to_string(), s.co2_grams().to_string()),
            ("Efficiency Score".to_string(), self.efficiency_score.to_string()),
        ]
    }
}

/// Restricts which enriched samples are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleFilter {
    pub model: Option<ModelName>,
    pub category: Option<TaskCategory>,
}

impl SampleFilter {
    pub fn is_active(&self) -> bool {
        self.model.is_some() || self.category.is_some()
    }

    pub fn matches(&self, scored: &ScoredSample) -> bool {
        self.model.map_or(true, |m| scored.sample.model() == m)
            && self.category.map_or(true, |c| scored.sample.category() == c)
    }

    fn select(&self, samples: &[ScoredSample]) -> Vec<ScoredSample> {
        samples.iter().filter(|s| self.matches(s)).cloned().collect()
    }
}

/// Single machine-readable document for structured formats
#[derive(Serialize)]
struct AnalysisView<'a> {
    summary: &'a AggregateSummary,
    categories: &'a [CategoryShare],
    correlation: &'a CorrelationMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<&'a [ScoredSample]>,
}

/// Generate, enrich and summarize a synthetic batch.
///
/// An active `filter` implies `show_samples`; it never affects the summaries or the export.
pub fn run_analyze(
    config_path: Option<PathBuf>,
    samples: Option<usize>,
    seed: Option<u64>,
    export: Option<PathBuf>,
    show_samples: bool,
    filter: SampleFilter,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);

    let mut config = super::load_config(config_path.as_deref(), seed)?;
    if let Some(samples) = samples {
        config.samples = samples;
    }

    let runner = PipelineRunner::new(config)?;
    let report = match &export {
        Some(dir) => {
            let mut sink = DirectorySink::new(dir);
            runner.run_analytics_into(&mut sink)?
        }
        None => runner.run_analytics()?,
    };

    let shown = (show_samples || filter.is_active()).then(|| filter.select(&report.samples));

    if formatter.is_structured() {
        let view = AnalysisView {
            summary: &report.summary,
            categories: &report.categories,
            correlation: &report.correlation,
            samples: shown.as_deref(),
        };
        formatter.print_value(&view)?;
    } else {
        formatter.print_heading("Per-model summary");
        formatter.print_list(&report.summary.models)?;

        formatter.print_heading("Category distribution");
        formatter.print_list(&report.categories)?;

        formatter.print_heading("Correlation");
        formatter.print_matrix(&CorrelationMatrix::LABELS, &report.correlation.as_rows());

        if let Some(shown) = &shown {
            formatter.print_heading("Samples");
            formatter.print_list(shown)?;
        }
    }

    if let Some(dir) = export {
        info!("Report exported to {:?}", dir);
        if !formatter.is_structured() {
            formatter.print_success(&format!("Report exported to {}", dir.display()))?;
        }
    }

    Ok(())
}
