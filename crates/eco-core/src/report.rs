//! Report bundle handed to output sinks

use crate::aggregate::{AggregateSummary, CategoryShare, CorrelationMatrix, RecordAggregator};
use crate::types::{ScoredSample, WorkloadSample};
use crate::Result;
use serde::Serialize;

/// Everything the analytics pipeline produces for one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: AggregateSummary,
    pub samples: Vec<ScoredSample>,
    pub categories: Vec<CategoryShare>,
    pub correlation: CorrelationMatrix,
}

impl AnalyticsReport {
    /// Enrich and aggregate a batch; fails if any sample cannot be scored
    pub fn build(samples: &[WorkloadSample]) -> Result<Self> {
        let scored = RecordAggregator::enrich(samples)?;

        Ok(Self {
            summary: RecordAggregator::summarize(samples),
            samples: scored,
            categories: RecordAggregator::category_distribution(samples),
            correlation: RecordAggregator::correlation_matrix(samples),
        })
    }

    /// Export the report as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Receives finished reports for rendering or export
pub trait ReportSink {
    fn deliver(&mut self, report: &AnalyticsReport) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModelName, TaskCategory};

    struct CollectingSink {
        delivered: Vec<AnalyticsReport>,
    }

    impl ReportSink for CollectingSink {
        fn deliver(&mut self, report: &AnalyticsReport) -> Result<()> {
            self.delivered.push(report.clone());
            Ok(())
        }
    }

    fn samples() -> Vec<WorkloadSample> {
        vec![
            WorkloadSample::new(1, ModelName::Gpt4, TaskCategory::Coding, 500, 5.0).unwrap(),
            WorkloadSample::new(2, ModelName::Llama3, TaskCategory::Math, 250, 1.5).unwrap(),
        ]
    }

    #[test]
    fn test_build_report() {
        let report = AnalyticsReport::build(&samples()).unwrap();
        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.categories.len(), 2);
        assert!((report.samples[0].efficiency_score - 201.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_report_fails_on_zero_co2() {
        let mut batch = samples();
        batch.push(WorkloadSample::new(3, ModelName::Grok15, TaskCategory::General, 100, 0.0).unwrap());
        assert!(AnalyticsReport::build(&batch).is_err());
    }

    #[test]
    fn test_sink_receives_report() {
        let report = AnalyticsReport::build(&samples()).unwrap();
        let mut sink = CollectingSink { delivered: Vec::new() };
        sink.deliver(&report).unwrap();

        assert_eq!(sink.delivered.len(), 1);
        assert_eq!(sink.delivered[0], report);
    }

    #[test]
    fn test_report_json() {
        let json = AnalyticsReport::build(&samples()).unwrap().to_json().unwrap();
        assert!(json.contains("\"efficiency_score\""));
        assert!(json.contains("\"GPT-4\""));
    }
}
