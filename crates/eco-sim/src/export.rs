use eco_core::{AggregateSummary, AnalyticsReport, ErrorContext, ReportSink, ScoredSample};
use std::path::{Path, PathBuf};

/// Per-sample dataset file
pub const DATASET_FILE: &str = "research_dataset.csv";
/// Per-model summary file
pub const SUMMARY_FILE: &str = "summary.csv";
/// Full report file
pub const REPORT_FILE: &str = "report.json";

/// Writes reports as CSV and JSON files into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_file(&self, name: &str, content: String) -> eco_core::Result<()> {
        let path = self.output_dir.join(name);
        std::fs::write(&path, content).with_context_fn(|| format!("failed to write {:?}", path))
    }
}

impl ReportSink for DirectorySink {
    fn deliver(&mut self, report: &AnalyticsReport) -> eco_core::Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context_fn(|| format!("failed to create {:?}", self.output_dir))?;

        self.write_file(DATASET_FILE, dataset_csv(&report.samples))?;
        self.write_file(SUMMARY_FILE, summary_csv(&report.summary))?;
        self.write_file(REPORT_FILE, report.to_json()?)?;

        tracing::info!(
            "Exported {} samples and {} model summaries to {:?}",
            report.samples.len(),
            report.summary.len(),
            self.output_dir
        );
        Ok(())
    }
}

/// Export enriched samples to CSV format
pub fn dataset_csv(samples: &[ScoredSample]) -> String {
    let mut csv = String::new();
    csv.push_str("ID,Model,Category,Tokens,Energy_kWh,CO2_grams,Efficiency_Score\n");

    for scored in samples {
        let s = &scored.sample;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            s.id(),
            s.model(),
            s.category(),
            s.token_count(),
            s.energy_kwh(),
            s.co2_grams(),
            scored.efficiency_score
        ));
    }

    csv
}

/// Export the per-model summary to CSV format
pub fn summary_csv(summary: &AggregateSummary) -> String {
    let mut csv = String::new();
    csv.push_str("Model,Samples,Energy_kWh,CO2_grams,Tokens\n");

    for model in summary.iter() {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            model.model,
            model.sample_count,
            model.mean_energy_kwh,
            model.mean_co2_grams,
            model.mean_token_count
        ));
    }

    csv
}
