//! Prompt footprint estimate command

use crate::output::{format_grams, Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use eco_core::{CarbonEquivalency, ModelEstimate, PromptEstimate};
use eco_sim::PipelineRunner;
use std::path::PathBuf;

impl Formattable for ModelEstimate {
    fn table_headers() -> Vec<String> {
        vec![
            "Model".to_string(),
            "Base Energy (kWh)".to_string(),
            "Base CO2 (g)".to_string(),
            "Energy (kWh)".to_string(),
            "CO2 (g)".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.model.to_string(),
            format!("{:.4}", self.base.energy_kwh),
            format!("{:.2}", self.base.co2_grams),
            format!("{:.5}", self.estimated.energy_kwh),
            format!("{:.3}", self.estimated.co2_grams),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Model".to_string(), self.model.to_string()),
            ("Multiplier".to_string(), format!("{:.3}", self.multiplier)),
            ("Energy (kWh)".to_string(), self.estimated.energy_kwh.to_string()),
            ("CO2".to_string(), format_grams(self.estimated.co2_grams)),
        ]
    }
}

impl Formattable for CarbonEquivalency {
    fn table_headers() -> Vec<String> {
        vec![
            "CO2".to_string(),
            "Tesla (km)".to_string(),
            "LED Bulb (min)".to_string(),
            "Phone Charges".to_string(),
            "Web Searches".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            format_grams(self.co2_grams),
            format!("{:.3}", self.tesla_km),
            format!("{:.1}", self.led_minutes),
            format!("{:.2}", self.phone_charges),
            format!("{:.1}", self.web_searches),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("CO2".to_string(), format_grams(self.co2_grams)),
            ("Driving a Tesla".to_string(), format!("{:.3} km", self.tesla_km)),
            ("LED bulb on".to_string(), format!("{:.1} minutes", self.led_minutes)),
            ("Phone charges".to_string(), format!("{:.2}", self.phone_charges)),
            ("Web searches".to_string(), format!("{:.1}", self.web_searches)),
        ]
    }
}

fn assessment_pairs(estimate: &PromptEstimate) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Category".to_string(), estimate.assessment.category.to_string()),
        ("Recommended".to_string(), estimate.assessment.recommendation.to_string()),
        ("Why".to_string(), estimate.assessment.explanation.clone()),
        ("Multiplier".to_string(), format!("{:.3}", estimate.multiplier)),
    ];
    if let Some(recommended) = &estimate.recommended {
        pairs.push((
            "Recommended CO2".to_string(),
            format_grams(recommended.estimated.co2_grams),
        ));
    }
    pairs
}

/// Classify a prompt and print per-model estimates with equivalencies
pub fn run_prompt(
    text: String,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);

    let config = super::load_config(config_path.as_deref(), seed)?;
    let runner = PipelineRunner::new(config)?;
    let estimate = runner.run_prompt(&text)?;

    if formatter.is_structured() {
        return formatter.print_value(&estimate);
    }

    formatter.print_heading("Prompt assessment");
    for (key, value) in assessment_pairs(&estimate) {
        println!("{}: {}", key, value);
    }

    formatter.print_heading("Per-model estimate");
    formatter.print_list(&estimate.models)?;

    formatter.print_heading("Carbon equivalency");
    formatter.print_item(&estimate.equivalency)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::prompt;

    #[test]
    fn test_assessment_pairs_with_recommendation() {
        let assessment = prompt::classify("solve this integral");
        let estimate = prompt::estimate(assessment, 2.0).unwrap();
        let pairs = assessment_pairs(&estimate);

        assert_eq!(pairs[1].1, "GPT-4");
        assert_eq!(pairs[4], ("Recommended CO2".to_string(), "6.000 g".to_string()));
    }

    #[test]
    fn test_assessment_pairs_without_recommendation() {
        let assessment = prompt::classify("hello there, tell me the latest news");
        let estimate = prompt::estimate(assessment, 1.0).unwrap();
        assert_eq!(assessment_pairs(&estimate).len(), 4);
    }

    #[test]
    fn test_equivalency_row() {
        let equivalency = CarbonEquivalency::from_grams(6.0).unwrap();
        assert_eq!(
            equivalency.table_row(),
            vec!["6.000 g", "0.120", "12.0", "0.50", "30.0"]
        );
    }
}
