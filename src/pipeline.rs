//! Pipeline orchestration
//!
//! This module provides the public API for StressScore over JSON documents.
//! It wires parsing, validation, scoring and report encoding together.

use tracing::{debug, warn};

use crate::encoder::{ReportEncoder, StressReport};
use crate::error::ComputeError;
use crate::schema::{InputAdapter, StressInput};
use crate::scorer::StressScorer;
use crate::types::{BehavioralSnapshot, PhysiologicalSnapshot, StressAnalysis};

/// Score a pair of snapshots.
///
/// Thin wrapper over [`StressScorer::analyze`]; never fails.
pub fn analyze_stress(
    physiological: &PhysiologicalSnapshot,
    behavioral: &BehavioralSnapshot,
) -> StressAnalysis {
    StressScorer::new().analyze(physiological, behavioral)
}

/// Convert a stress.input.v1 JSON document into a StressAnalysis JSON string.
///
/// # Arguments
/// * `raw_json` - Input document with `physiological` and/or `behavioral`
///
/// # Example
/// ```ignore
/// let analysis_json = stress_json_to_analysis(input_json)?;
/// ```
pub fn stress_json_to_analysis(raw_json: String) -> Result<String, ComputeError> {
    json_to_analysis(&raw_json, StressProcessor::new())
}

/// Like [`stress_json_to_analysis`] but scores negative or non-finite
/// readings instead of rejecting them.
pub fn stress_json_to_analysis_unchecked(raw_json: String) -> Result<String, ComputeError> {
    json_to_analysis(&raw_json, StressProcessor::new().validation(false))
}

fn json_to_analysis(raw_json: &str, processor: StressProcessor) -> Result<String, ComputeError> {
    let input = InputAdapter::parse(raw_json)?;
    let analysis = processor.analyze_input(&input)?;
    Ok(serde_json::to_string(&analysis)?)
}

/// Convert a stress.input.v1 JSON document into a report JSON string.
pub fn stress_json_to_report(raw_json: String) -> Result<String, ComputeError> {
    StressProcessor::new().process_json(&raw_json)
}

/// Processor that keeps a stable report instance id across calls.
pub struct StressProcessor {
    scorer: StressScorer,
    encoder: ReportEncoder,
    validate: bool,
}

impl Default for StressProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl StressProcessor {
    /// Create a new processor with validation enabled
    pub fn new() -> Self {
        Self {
            scorer: StressScorer::new(),
            encoder: ReportEncoder::new(),
            validate: true,
        }
    }

    /// Create a processor with a specific encoder
    pub fn with_encoder(encoder: ReportEncoder) -> Self {
        Self {
            encoder,
            ..Self::new()
        }
    }

    /// Enable or disable snapshot validation before scoring
    pub fn validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Score one input document, returning the bare analysis
    pub fn analyze_input(&self, input: &StressInput) -> Result<StressAnalysis, ComputeError> {
        let (physiological, behavioral) = self.prepare(input)?;
        let analysis = self.scorer.analyze(&physiological, &behavioral);
        log_analysis(input, &analysis);
        Ok(analysis)
    }

    /// Score one input document into a full report
    pub fn process(&self, input: &StressInput) -> Result<StressReport, ComputeError> {
        let (physiological, behavioral) = self.prepare(input)?;
        let raw = self.scorer.raw_scores(&physiological, &behavioral);
        let analysis = self.scorer.analysis_from(&raw, &physiological, &behavioral);
        log_analysis(input, &analysis);

        Ok(self.encoder.encode(
            input.input_id.clone(),
            &physiological,
            &behavioral,
            raw.components,
            analysis,
        ))
    }

    /// Parse, score and encode a single JSON document
    pub fn process_json(&self, raw_json: &str) -> Result<String, ComputeError> {
        let input = InputAdapter::parse(raw_json)?;
        let report = self.process(&input)?;
        self.encoder.encode_to_json(&report)
    }

    /// Score a batch, stopping at the first failing input
    pub fn process_batch(&self, inputs: &[StressInput]) -> Result<Vec<StressReport>, ComputeError> {
        inputs.iter().map(|input| self.process(input)).collect()
    }

    fn prepare(
        &self,
        input: &StressInput,
    ) -> Result<(PhysiologicalSnapshot, BehavioralSnapshot), ComputeError> {
        if !input.has_data() {
            return Err(ComputeError::MissingField(
                "physiological or behavioral".to_string(),
            ));
        }
        if self.validate {
            if let Err(e) = input.validate() {
                warn!(input_id = ?input.input_id, error = %e, "rejecting invalid input");
                return Err(e.into());
            }
        }
        Ok(input.resolved())
    }
}

fn log_analysis(input: &StressInput, analysis: &StressAnalysis) {
    debug!(
        input_id = ?input.input_id,
        overall = analysis.overall_stress_level,
        physiological = analysis.physiological_score,
        behavioral = analysis.behavioral_score,
        category = %analysis.stress_category,
        risk_factors = analysis.risk_factors.len(),
        "scored stress input"
    );
}
