//! # eco-core
//!
//! Energy and emission estimation core for LLM inference workloads.
//!
//! This crate holds the deterministic part of ecomesh. It includes:
//!
//! - Modeled energy draw by device class (GPU, CPU, RAM)
//! - Energy to CO2 conversion under a grid intensity and PUE
//! - Per-model aggregation and efficiency scoring over sample batches
//! - Carbon equivalencies and keyword-based prompt estimates
//! - Configuration schema and error types
//!
//! Nothing in this crate draws random numbers; sample generation lives in
//! `eco-sim`.

pub mod aggregate;
pub mod config;
pub mod emission;
pub mod energy;
pub mod equivalency;
pub mod error;
pub mod estimator;
pub mod prompt;
pub mod report;
pub mod types;

// Re-export commonly used types at the crate root
pub use aggregate::{AggregateSummary, CategoryShare, CorrelationMatrix, ModelSummary, RecordAggregator};
pub use config::{DeviceUtilizationProfile, EmissionConfig, EstimatorConfig};
pub use emission::EmissionModel;
pub use energy::{EnergyBreakdown, EnergyModel};
pub use equivalency::CarbonEquivalency;
pub use error::{Error, ErrorContext, Result};
pub use estimator::{CarbonEstimator, ModeledEstimate};
pub use prompt::{ModelEstimate, PromptAssessment, PromptCategory, PromptEstimate, Recommendation};
pub use report::{AnalyticsReport, ReportSink};
pub use types::{ModelName, QueryFootprint, SampleId, ScoredSample, TaskCategory, WorkloadSample};
