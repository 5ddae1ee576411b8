//! Core type definitions for ecomesh

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Unique identifier for a workload sample
pub type SampleId = u64;

/// Grams of CO2 emitted per kWh in the synthetic sample relation
pub const CO2_GRAMS_PER_KWH: f64 = 500.0;

/// Valid token counts for a workload sample
pub const TOKEN_COUNT_RANGE: Range<u32> = 30..2500;

/// LLM identifiers tracked by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelName {
    #[serde(rename = "GPT-4")]
    Gpt4,
    #[serde(rename = "Claude 3")]
    Claude3,
    #[serde(rename = "Grok 1.5")]
    Grok15,
    #[serde(rename = "Llama-3")]
    Llama3,
}

impl ModelName {
    /// All models, in generator sampling order
    pub const ALL: [ModelName; 4] = [
        ModelName::Gpt4,
        ModelName::Claude3,
        ModelName::Grok15,
        ModelName::Llama3,
    ];

    /// Display name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt4 => "GPT-4",
            ModelName::Claude3 => "Claude 3",
            ModelName::Grok15 => "Grok 1.5",
            ModelName::Llama3 => "Llama-3",
        }
    }

    /// Base CO2 emission per query in grams, before the difficulty multiplier
    pub fn base_emission_grams(&self) -> f64 {
        match self {
            ModelName::Gpt4 => 3.0,
            ModelName::Claude3 => 2.4,
            ModelName::Grok15 => 4.2,
            ModelName::Llama3 => 1.1,
        }
    }

    /// Reference per-query footprint used by the prompt estimator
    pub fn reference_footprint(&self) -> QueryFootprint {
        let (energy_kwh, co2_grams) = match self {
            ModelName::Gpt4 => (0.0008, 3.0),
            ModelName::Grok15 => (0.0012, 3.75),
            ModelName::Claude3 => (0.0009, 2.5),
            ModelName::Llama3 => (0.0003, 1.4),
        };
        QueryFootprint { energy_kwh, co2_grams }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "gpt4" => Ok(ModelName::Gpt4),
            "claude3" => Ok(ModelName::Claude3),
            "grok15" => Ok(ModelName::Grok15),
            "llama3" | "llama370b" => Ok(ModelName::Llama3),
            _ => Err(Error::invalid_parameter(format!("Unknown model: {}", s))),
        }
    }
}

/// Task categories a query can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    General,
    Coding,
    Math,
    Reasoning,
    Physics,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::General,
        TaskCategory::Coding,
        TaskCategory::Math,
        TaskCategory::Reasoning,
        TaskCategory::Physics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::General => "General",
            TaskCategory::Coding => "Coding",
            TaskCategory::Math => "Math",
            TaskCategory::Reasoning => "Reasoning",
            TaskCategory::Physics => "Physics",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_parameter(format!("Unknown category: {}", s)))
    }
}

/// Energy and CO2 of a single query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryFootprint {
    pub energy_kwh: f64,
    pub co2_grams: f64,
}

/// One simulated or measured inference event.
///
/// `energy_kwh` is always derived from `co2_grams` (`co2_grams / 500`), so the
/// fields are private and only reachable through [`WorkloadSample::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct WorkloadSample {
    id: SampleId,
    model: ModelName,
    category: TaskCategory,
    token_count: u32,
    energy_kwh: f64,
    co2_grams: f64,
}

impl WorkloadSample {
    /// Create a sample from its emitted CO2, deriving the energy draw
    pub fn new(
        id: SampleId,
        model: ModelName,
        category: TaskCategory,
        token_count: u32,
        co2_grams: f64,
    ) -> Result<Self> {
        if id == 0 {
            return Err(Error::invalid_parameter("Sample id must be positive"));
        }
        if !TOKEN_COUNT_RANGE.contains(&token_count) {
            return Err(Error::invalid_parameter(format!(
                "token_count must be in [{}, {}), got {}",
                TOKEN_COUNT_RANGE.start, TOKEN_COUNT_RANGE.end, token_count
            )));
        }
        let co2_grams = crate::error::ensure_non_negative("co2_grams", co2_grams)?;

        Ok(Self {
            id,
            model,
            category,
            token_count,
            energy_kwh: co2_grams / CO2_GRAMS_PER_KWH,
            co2_grams,
        })
    }

    pub fn id(&self) -> SampleId {
        self.id
    }

    pub fn model(&self) -> ModelName {
        self.model
    }

    pub fn category(&self) -> TaskCategory {
        self.category
    }

    pub fn token_count(&self) -> u32 {
        self.token_count
    }

    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    pub fn co2_grams(&self) -> f64 {
        self.co2_grams
    }
}

/// Wire shape of a sample; `energy_kwh` is optional and checked if present
#[derive(Debug, Deserialize)]
struct SampleRecord {
    id: SampleId,
    model: ModelName,
    category: TaskCategory,
    token_count: u32,
    #[serde(default)]
    energy_kwh: Option<f64>,
    co2_grams: f64,
}

impl TryFrom<SampleRecord> for WorkloadSample {
    type Error = Error;

    fn try_from(record: SampleRecord) -> Result<Self> {
        let sample = WorkloadSample::new(
            record.id,
            record.model,
            record.category,
            record.token_count,
            record.co2_grams,
        )?;

        if let Some(energy_kwh) = record.energy_kwh {
            let tolerance = 1e-12_f64.max(sample.energy_kwh.abs() * 1e-9);
            if (energy_kwh - sample.energy_kwh).abs() > tolerance {
                return Err(Error::invalid_parameter(format!(
                    "energy_kwh {} is inconsistent with co2_grams {} for sample {}",
                    energy_kwh, record.co2_grams, record.id
                )));
            }
        }

        Ok(sample)
    }
}

/// A sample with its efficiency score attached by the aggregator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSample {
    #[serde(flatten)]
    pub sample: WorkloadSample,
    pub efficiency_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_derives_energy() {
        let sample = WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::Coding, 120, 6.0).unwrap();
        assert_eq!(sample.energy_kwh(), 0.012);
        assert_eq!(sample.co2_grams(), 6.0);
        assert_eq!(sample.model(), ModelName::Gpt4);
        assert_eq!(sample.category(), TaskCategory::Coding);
    }

    #[test]
    fn test_sample_domain_validation() {
        assert!(WorkloadSample::new(0, ModelName::Gpt4, TaskCategory::General, 100, 1.0).is_err());
        assert!(WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::General, 29, 1.0).is_err());
        assert!(WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::General, 2500, 1.0).is_err());
        assert!(WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::General, 2499, 1.0).is_ok());
        assert!(WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::General, 30, -1.0).is_err());
        assert!(WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::General, 30, 0.0).is_ok());
    }

    #[test]
    fn test_model_name_parsing() {
        assert_eq!("GPT-4".parse::<ModelName>().unwrap(), ModelName::Gpt4);
        assert_eq!("claude 3".parse::<ModelName>().unwrap(), ModelName::Claude3);
        assert_eq!("Grok-1.5".parse::<ModelName>().unwrap(), ModelName::Grok15);
        assert_eq!("Llama-3 70B".parse::<ModelName>().unwrap(), ModelName::Llama3);
        assert!("mistral".parse::<ModelName>().is_err());

        for model in ModelName::ALL {
            assert_eq!(model.as_str().parse::<ModelName>().unwrap(), model);
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("math".parse::<TaskCategory>().unwrap(), TaskCategory::Math);
        assert!("poetry".parse::<TaskCategory>().is_err());
    }

    #[test]
    fn test_sample_serde() {
        let sample = WorkloadSample::new(7, ModelName::Llama3, TaskCategory::Physics, 400, 2.5).unwrap();
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"model\":\"Llama-3\""));

        let parsed: WorkloadSample = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample);
    }

    #[test]
    fn test_sample_deserialize_rejects_inconsistent_energy() {
        let json = r#"{"id":1,"model":"GPT-4","category":"General","token_count":100,"energy_kwh":1.0,"co2_grams":5.0}"#;
        assert!(serde_json::from_str::<WorkloadSample>(json).is_err());

        let json = r#"{"id":1,"model":"GPT-4","category":"General","token_count":100,"co2_grams":5.0}"#;
        let sample: WorkloadSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.energy_kwh(), 0.01);
    }
}
