//! stress.input.v1 document and snapshot validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BehavioralSnapshot, PhysiologicalSnapshot};

/// Input schema identifier
pub const SCHEMA_VERSION: &str = "stress.input.v1";

/// One scoring request: a physiological and a behavioral snapshot.
///
/// Either section may be omitted, in which case it falls back to its default
/// values. A document with neither section is rejected by the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressInput {
    /// Caller-supplied identifier echoed in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_id: Option<String>,
    #[serde(default)]
    pub physiological: Option<PhysiologicalSnapshot>,
    #[serde(default)]
    pub behavioral: Option<BehavioralSnapshot>,
}

impl StressInput {
    pub fn new(physiological: PhysiologicalSnapshot, behavioral: BehavioralSnapshot) -> Self {
        Self {
            input_id: None,
            physiological: Some(physiological),
            behavioral: Some(behavioral),
        }
    }

    /// Whether at least one snapshot is present
    pub fn has_data(&self) -> bool {
        self.physiological.is_some() || self.behavioral.is_some()
    }

    /// Snapshots with missing sections filled from defaults
    pub fn resolved(&self) -> (PhysiologicalSnapshot, BehavioralSnapshot) {
        (
            self.physiological.unwrap_or_default(),
            self.behavioral.unwrap_or_default(),
        )
    }

    /// Validate every present snapshot
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(physiological) = &self.physiological {
            physiological.validate()?;
        }
        if let Some(behavioral) = &self.behavioral {
            behavioral.validate()?;
        }
        Ok(())
    }
}

impl PhysiologicalSnapshot {
    /// Reject non-finite or negative readings.
    ///
    /// Scoring does not require this; it exists for callers that want to
    /// refuse physically meaningless input before scoring.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_field("heartRate", self.heart_rate)?;
        check_field("bloodPressureSystolic", self.blood_pressure_systolic)?;
        check_field("bloodPressureDiastolic", self.blood_pressure_diastolic)?;
        check_field("respiratoryRate", self.respiratory_rate)?;
        check_field("skinConductance", self.skin_conductance)?;
        check_field("bodyTemperature", self.body_temperature)
    }
}

impl BehavioralSnapshot {
    /// Reject non-finite or negative values
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_field("sleepHours", self.sleep_hours)?;
        check_field("sleepQuality", self.sleep_quality)?;
        check_field("activityLevel", self.activity_level)?;
        check_field("screenTime", self.screen_time)?;
        check_field("socialInteractions", self.social_interactions)?;
        check_field("workHours", self.work_hours)
    }
}

fn check_field(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

/// Validation errors for input snapshots
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field {field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("Field {field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}
