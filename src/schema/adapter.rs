//! Parsing and batch validation of stress.input.v1 documents

use crate::error::ComputeError;
use crate::schema::input::{StressInput, ValidationError};

/// Adapter for reading input documents from JSON text
pub struct InputAdapter;

impl InputAdapter {
    /// Parse a single JSON document
    pub fn parse(json: &str) -> Result<StressInput, ComputeError> {
        let input: StressInput = serde_json::from_str(json)?;
        Ok(input)
    }

    /// Parse a JSON string containing an array of inputs
    pub fn parse_array(json: &str) -> Result<Vec<StressInput>, ComputeError> {
        let inputs: Vec<StressInput> = serde_json::from_str(json)?;
        Ok(inputs)
    }

    /// Parse NDJSON (newline-delimited JSON), one input per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<StressInput>, ComputeError> {
        let mut inputs = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<StressInput>(trimmed) {
                Ok(input) => inputs.push(input),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(inputs)
    }

    /// Validate inputs, returning only the failures
    pub fn validate_inputs(inputs: &[StressInput]) -> Vec<ValidationResult> {
        inputs
            .iter()
            .enumerate()
            .filter_map(|(idx, input)| {
                let error = if input.has_data() {
                    input.validate().err().map(InputProblem::Invalid)
                } else {
                    Some(InputProblem::Empty)
                };
                error.map(|problem| ValidationResult {
                    index: idx,
                    input_id: input.input_id.clone(),
                    problem,
                })
            })
            .collect()
    }
}

/// Why an input was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum InputProblem {
    /// Neither snapshot was supplied
    Empty,
    Invalid(ValidationError),
}

impl std::fmt::Display for InputProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputProblem::Empty => f.write_str("Input has neither physiological nor behavioral data"),
            InputProblem::Invalid(e) => write!(f, "{}", e),
        }
    }
}

/// A rejected input and its position in the batch
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub index: usize,
    pub input_id: Option<String>,
    pub problem: InputProblem,
}
