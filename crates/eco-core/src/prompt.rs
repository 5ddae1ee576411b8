//! Keyword-based prompt classification and per-model footprint estimates

use crate::equivalency::CarbonEquivalency;
use crate::error::ensure_positive;
use crate::types::{ModelName, QueryFootprint};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CO2 used for equivalencies when no concrete model is recommended
pub const FALLBACK_PROMPT_CO2_GRAMS: f64 = 3.0;

/// Workload profile of a prompt, in the order categories are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptCategory {
    #[serde(rename = "Coding / Programming")]
    Coding,
    #[serde(rename = "Maths / Physics")]
    MathsPhysics,
    #[serde(rename = "Reasoning / Logic Puzzles")]
    Reasoning,
    #[serde(rename = "General Query")]
    General,
    Unknown,
}

impl PromptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptCategory::Coding => "Coding / Programming",
            PromptCategory::MathsPhysics => "Maths / Physics",
            PromptCategory::Reasoning => "Reasoning / Logic Puzzles",
            PromptCategory::General => "General Query",
            PromptCategory::Unknown => "Unknown",
        }
    }

    /// Multiplier centre and half-width of its jitter band
    pub fn multiplier_band(&self) -> (f64, f64) {
        match self {
            PromptCategory::Coding => (3.0, 0.1),
            PromptCategory::MathsPhysics => (2.0, 0.1),
            PromptCategory::Reasoning => (3.2, 0.15),
            PromptCategory::General | PromptCategory::Unknown => (1.0, 0.05),
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model suggested for a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model")]
pub enum Recommendation {
    Model(ModelName),
    /// Any small, low-footprint model
    EfficientLlm,
}

impl Recommendation {
    pub fn model(&self) -> Option<ModelName> {
        match self {
            Recommendation::Model(model) => Some(*model),
            Recommendation::EfficientLlm => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Model(model) => write!(f, "{}", model),
            Recommendation::EfficientLlm => f.write_str("Efficient LLM"),
        }
    }
}

/// Result of classifying a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAssessment {
    pub category: PromptCategory,
    pub recommendation: Recommendation,
    pub explanation: String,
}

impl PromptAssessment {
    /// Half-open interval the jittered multiplier is drawn from
    pub fn multiplier_range(&self) -> (f64, f64) {
        let (centre, half_width) = self.category.multiplier_band();
        (centre - half_width, centre + half_width)
    }

    /// Multiplier without jitter
    pub fn nominal_multiplier(&self) -> f64 {
        self.category.multiplier_band().0
    }
}

const CODING_KEYWORDS: &[&str] = &[
    "code", "program", "programming", "script", "bug", "function", "loop", "build", "compile",
    "json", "api", "backend", "endpoint", "algorithm", "database",
];

const LEETCODE_KEYWORDS: &[&str] = &[
    "leetcode", "lc", "two sum", "array", "linked list", "tree", "dp", "dynamic programming",
];

const MATHS_KEYWORDS: &[&str] = &[
    "sin", "cos", "tan", "theta", "integral", "derivative", "physics", "calculation", "equation",
    "solve", "sqrt", "power", "x^2", "x2", "numbers", "pi", "radians", "degrees", "vector",
    "matrix", "log",
];

const REASONING_KEYWORDS: &[&str] = &[
    "reason", "logical", "mother", "father", "grandmother", "east", "west", "north", "south",
    "puzzle", "riddle", "who", "which", "why", "relation", "compare", "stronger", "weaker",
    "logic problem",
];

const GENERAL_KEYWORDS: &[&str] = &[
    "hello", "hi", "good morning", "news", "summarize news", "essay", "letter", "explain",
    "write", "story", "latest",
];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

/// Classify a prompt by case-insensitive substring keywords.
///
/// Categories are tried in order: coding, maths/physics, reasoning, general.
pub fn classify(prompt: &str) -> PromptAssessment {
    let lower = prompt.to_lowercase();

    let (category, recommendation, explanation) = if contains_any(&lower, LEETCODE_KEYWORDS) {
        (
            PromptCategory::Coding,
            Recommendation::Model(ModelName::Gpt4),
            "GPT-4 has the largest repository of solved LeetCode-style patterns and answers.",
        )
    } else if contains_any(&lower, CODING_KEYWORDS) {
        (
            PromptCategory::Coding,
            Recommendation::Model(ModelName::Claude3),
            "Claude 3 performs extremely well on code reasoning and analysis.",
        )
    } else if contains_any(&lower, MATHS_KEYWORDS) {
        (
            PromptCategory::MathsPhysics,
            Recommendation::Model(ModelName::Gpt4),
            "GPT-4 excels at mathematical reasoning and physics problem solving.",
        )
    } else if contains_any(&lower, REASONING_KEYWORDS) {
        (
            PromptCategory::Reasoning,
            Recommendation::Model(ModelName::Claude3),
            "Claude 3 offers the best logical consistency for complex reasoning tasks.",
        )
    } else if contains_any(&lower, GENERAL_KEYWORDS) {
        (
            PromptCategory::General,
            Recommendation::EfficientLlm,
            "Optimized for general queries with lower energy footprint and fast response times.",
        )
    } else {
        (
            PromptCategory::Unknown,
            Recommendation::Model(ModelName::Gpt4),
            "No specific keywords detected. GPT-4 is a reliable choice for general tasks.",
        )
    };

    PromptAssessment {
        category,
        recommendation,
        explanation: explanation.to_string(),
    }
}

/// Footprint of one model for an assessed prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelEstimate {
    pub model: ModelName,
    pub base: QueryFootprint,
    pub multiplier: f64,
    pub estimated: QueryFootprint,
}

/// Per-model estimates for a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEstimate {
    pub assessment: PromptAssessment,
    pub multiplier: f64,
    pub models: Vec<ModelEstimate>,
    pub recommended: Option<ModelEstimate>,
    pub equivalency: CarbonEquivalency,
}

/// Order models are reported in
const ESTIMATE_ORDER: [ModelName; 4] = [
    ModelName::Gpt4,
    ModelName::Grok15,
    ModelName::Claude3,
    ModelName::Llama3,
];

/// Scale every model's reference footprint by `multiplier`
pub fn estimate(assessment: PromptAssessment, multiplier: f64) -> Result<PromptEstimate> {
    let multiplier = ensure_positive("multiplier", multiplier)?;

    let models: Vec<ModelEstimate> = ESTIMATE_ORDER
        .iter()
        .map(|&model| {
            let base = model.reference_footprint();
            ModelEstimate {
                model,
                base,
                multiplier,
                estimated: QueryFootprint {
                    energy_kwh: base.energy_kwh * multiplier,
                    co2_grams: base.co2_grams * multiplier,
                },
            }
        })
        .collect();

    let recommended = assessment
        .recommendation
        .model()
        .and_then(|m| models.iter().find(|e| e.model == m).copied());

    let co2_grams = recommended
        .map(|e| e.estimated.co2_grams)
        .unwrap_or(FALLBACK_PROMPT_CO2_GRAMS);

    Ok(PromptEstimate {
        assessment,
        multiplier,
        models,
        recommended,
        equivalency: CarbonEquivalency::from_grams(co2_grams)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_classify_coding() {
        let a = classify("Fix the bug in my backend service");
        assert_eq!(a.category, PromptCategory::Coding);
        assert_eq!(a.recommendation, Recommendation::Model(ModelName::Claude3));

        // "dp" inside "endpoint" is a leetcode keyword
        let a = classify("Fix the bug in my endpoint");
        assert_eq!(a.recommendation, Recommendation::Model(ModelName::Gpt4));

        let a = classify("LeetCode two sum");
        assert_eq!(a.category, PromptCategory::Coding);
        assert_eq!(a.recommendation, Recommendation::Model(ModelName::Gpt4));
    }

    #[test]
    fn test_classify_order() {
        // "solve" is a maths keyword, but "function" matches coding first
        let a = classify("Solve this function");
        assert_eq!(a.category, PromptCategory::Coding);

        let a = classify("Find the derivative of x^2");
        assert_eq!(a.category, PromptCategory::MathsPhysics);

        let a = classify("A riddle about my grandmother");
        assert_eq!(a.category, PromptCategory::Reasoning);
    }

    #[test]
    fn test_classify_general_and_unknown() {
        let a = classify("Write a short story");
        assert_eq!(a.category, PromptCategory::General);
        assert_eq!(a.recommendation, Recommendation::EfficientLlm);

        let a = classify("zzz");
        assert_eq!(a.category, PromptCategory::Unknown);
        assert_eq!(a.recommendation, Recommendation::Model(ModelName::Gpt4));
    }

    #[test]
    fn test_multiplier_range() {
        let a = classify("a riddle");
        let (low, high) = a.multiplier_range();
        assert!((low - 3.05).abs() < 1e-12);
        assert!((high - 3.35).abs() < 1e-12);
        assert_eq!(a.nominal_multiplier(), 3.2);
    }

    #[test]
    fn test_estimate_scales_reference_footprint() {
        let a = classify("Fix the bug in my script");
        let est = estimate(a, 3.0).unwrap();

        assert_eq!(est.models.len(), 4);
        assert_eq!(est.models[0].model, ModelName::Gpt4);

        let claude = est.recommended.unwrap();
        assert_eq!(claude.model, ModelName::Claude3);
        assert!((claude.estimated.co2_grams - 7.5).abs() < 1e-12);
        assert!((claude.estimated.energy_kwh - 0.0027).abs() < 1e-12);
        assert!((est.equivalency.co2_grams - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_fallback_for_efficient_llm() {
        let est = estimate(classify("hello there"), 1.0).unwrap();
        assert!(est.recommended.is_none());
        assert_eq!(est.equivalency.co2_grams, FALLBACK_PROMPT_CO2_GRAMS);
    }

    #[test]
    fn test_estimate_rejects_bad_multiplier() {
        assert!(matches!(estimate(classify("zzz"), 0.0), Err(Error::InvalidParameter(_))));
        assert!(estimate(classify("zzz"), f64::NAN).is_err());
    }
}
