//! Modeled workload energy and CO2 command

use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use eco_core::ModeledEstimate;
use eco_sim::PipelineRunner;
use std::path::PathBuf;

impl Formattable for ModeledEstimate {
    fn table_headers() -> Vec<String> {
        vec![
            "Duration (s)".to_string(),
            "GPU (kWh)".to_string(),
            "CPU (kWh)".to_string(),
            "RAM (kWh)".to_string(),
            "Total (kWh)".to_string(),
            "CO2 (kg)".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            format!("{:.2}", self.duration_seconds),
            format!("{:.4}", self.energy.gpu_kwh),
            format!("{:.4}", self.energy.cpu_kwh),
            format!("{:.4}", self.energy.ram_kwh),
            format!("{:.4}", self.energy.total_kwh),
            format!("{:.4}", self.co2_kg),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Duration (s)".to_string(), self.duration_seconds.to_string()),
            ("GPU Energy (kWh)".to_string(), self.energy.gpu_kwh.to_string()),
            ("CPU Energy (kWh)".to_string(), self.energy.cpu_kwh.to_string()),
            ("RAM Energy (kWh)".to_string(), self.energy.ram_kwh.to_string()),
            ("Total Energy (kWh)".to_string(), self.energy.total_kwh.to_string()),
            ("CO2 (kg)".to_string(), self.co2_kg.to_string()),
        ]
    }
}

/// Estimate explicit durations, or sampled ones when none are given
pub fn run_estimate(
    config_path: Option<PathBuf>,
    durations: Vec<f64>,
    seed: Option<u64>,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);

    let config = super::load_config(config_path.as_deref(), seed)?;
    let runner = PipelineRunner::new(config)?;

    if durations.is_empty() {
        formatter.print_info(&format!(
            "Sampling {} workload durations",
            runner.config().modeled.runs
        ));
    }

    let estimates = runner.run_modeled(&durations)?;
    formatter.print_list(&estimates)?;
    Ok(())
}
