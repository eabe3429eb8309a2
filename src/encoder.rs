//! Report encoding
//!
//! Wraps a stress analysis in a self-describing report envelope carrying
//! producer metadata, the inputs that were scored and the component scores.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ComputeError;
use crate::types::{BehavioralSnapshot, ComponentScores, PhysiologicalSnapshot, StressAnalysis};
use crate::{PRODUCER_NAME, STRESS_VERSION};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Report producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// The snapshots a report was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInputs {
    pub physiological: PhysiologicalSnapshot,
    pub behavioral: BehavioralSnapshot,
}

/// Complete stress report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressReport {
    pub report_version: String,
    pub producer: ReportProducer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_id: Option<String>,
    pub computed_at_utc: String,
    pub inputs: ReportInputs,
    pub components: ComponentScores,
    pub analysis: StressAnalysis,
}

/// Encoder for producing report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Build a report around an analysis
    pub fn encode(
        &self,
        input_id: Option<String>,
        physiological: &PhysiologicalSnapshot,
        behavioral: &BehavioralSnapshot,
        components: ComponentScores,
        analysis: StressAnalysis,
    ) -> StressReport {
        StressReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: STRESS_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            input_id,
            computed_at_utc: Utc::now().to_rfc3339(),
            inputs: ReportInputs {
                physiological: *physiological,
                behavioral: *behavioral,
            },
            components,
            analysis,
        }
    }

    /// Serialize a report to compact JSON
    pub fn encode_to_json(&self, report: &StressReport) -> Result<String, ComputeError> {
        serde_json::to_string(report).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::StressScorer;
    use pretty_assertions::assert_eq;

    fn sample_report(encoder: &ReportEncoder) -> StressReport {
        let phys = PhysiologicalSnapshot::default();
        let behav = BehavioralSnapshot::default();
        let scorer = StressScorer::new();
        let raw = scorer.raw_scores(&phys, &behav);
        let analysis = scorer.analyze(&phys, &behav);
        encoder.encode(Some("day-1".to_string()), &phys, &behav, raw.components, analysis)
    }

    #[test]
    fn test_encode_report_envelope() {
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = sample_report(&encoder);

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.input_id.as_deref(), Some("day-1"));
        assert!(chrono::DateTime::parse_from_rfc3339(&report.computed_at_utc).is_ok());
    }

    #[test]
    fn test_encode_to_json_field_names() {
        let encoder = ReportEncoder::new();
        let report = sample_report(&encoder);
        let json = encoder.encode_to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["reportVersion"], "1.0.0");
        assert_eq!(value["producer"]["instanceId"], encoder.instance_id());
        assert_eq!(value["inputs"]["physiological"]["heartRate"], 75.0);
        assert_eq!(value["analysis"]["stressCategory"], "Low");
        assert!(value["components"]["behavioral"]["screenTime"].as_f64().is_some());

        let back: StressReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_instance_ids_are_unique() {
        assert_ne!(
            ReportEncoder::new().instance_id(),
            ReportEncoder::new().instance_id()
        );
    }
}
