//! Core types for StressScore
//!
//! This module defines the records that flow through the scorer: the two
//! input snapshots, the per-metric component scores, and the analysis output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time physiological readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysiologicalSnapshot {
    /// Heart rate (beats per minute)
    pub heart_rate: f64,
    /// Systolic blood pressure (mmHg)
    pub blood_pressure_systolic: f64,
    /// Diastolic blood pressure (mmHg)
    pub blood_pressure_diastolic: f64,
    /// Respiratory rate (breaths per minute)
    pub respiratory_rate: f64,
    /// Skin conductance (0-10, arbitrary unit)
    pub skin_conductance: f64,
    /// Body temperature (°F)
    pub body_temperature: f64,
}

impl Default for PhysiologicalSnapshot {
    fn default() -> Self {
        Self {
            heart_rate: 75.0,
            blood_pressure_systolic: 120.0,
            blood_pressure_diastolic: 80.0,
            respiratory_rate: 16.0,
            skin_conductance: 3.5,
            body_temperature: 98.6,
        }
    }
}

/// Self-reported behavioral metrics for a typical day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralSnapshot {
    /// Hours slept
    pub sleep_hours: f64,
    /// Sleep quality (1-10)
    pub sleep_quality: f64,
    /// Activity level (1-10)
    pub activity_level: f64,
    /// Screen time (hours per day)
    pub screen_time: f64,
    /// Social interactions (1-10)
    pub social_interactions: f64,
    /// Work hours (hours per day)
    pub work_hours: f64,
}

impl Default for BehavioralSnapshot {
    fn default() -> Self {
        Self {
            sleep_hours: 7.5,
            sleep_quality: 7.0,
            activity_level: 6.0,
            screen_time: 6.0,
            social_interactions: 5.0,
            work_hours: 8.0,
        }
    }
}

/// Stress category, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressCategory {
    Low,
    Moderate,
    High,
    Severe,
}

impl StressCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressCategory::Low => "Low",
            StressCategory::Moderate => "Moderate",
            StressCategory::High => "High",
            StressCategory::Severe => "Severe",
        }
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized physiological sub-scores (unrounded)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysiologicalComponents {
    pub heart_rate: f64,
    pub blood_pressure: f64,
    pub respiratory_rate: f64,
    pub skin_conductance: f64,
    pub body_temperature: f64,
}

/// Normalized behavioral sub-scores (unrounded)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralComponents {
    pub sleep_hours: f64,
    pub sleep_quality: f64,
    pub activity_level: f64,
    pub screen_time: f64,
    pub social_interactions: f64,
    pub work_hours: f64,
}

/// Every sub-score that feeds the weighted sums
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub physiological: PhysiologicalComponents,
    pub behavioral: BehavioralComponents,
}

/// Result of a single scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressAnalysis {
    /// Overall stress level (0-1, two decimals)
    pub overall_stress_level: f64,
    /// Category derived from the unrounded overall level
    pub stress_category: StressCategory,
    /// Weighted physiological score (0-1, two decimals)
    pub physiological_score: f64,
    /// Weighted behavioral score (0-1, two decimals)
    pub behavioral_score: f64,
    /// Suggestions in check order; never empty
    pub recommendations: Vec<String>,
    /// Triggered risk labels in check order
    pub risk_factors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_ordering() {
        assert!(StressCategory::Low < StressCategory::Moderate);
        assert!(StressCategory::Moderate < StressCategory::High);
        assert!(StressCategory::High < StressCategory::Severe);
    }

    #[test]
    fn test_snapshot_camel_case_wire_names() {
        let json = serde_json::to_value(PhysiologicalSnapshot::default()).unwrap();
        assert_eq!(json["heartRate"], 75.0);
        assert_eq!(json["bloodPressureSystolic"], 120.0);
        assert_eq!(json["bodyTemperature"], 98.6);

        let json = serde_json::to_value(BehavioralSnapshot::default()).unwrap();
        assert_eq!(json["socialInteractions"], 5.0);
        assert_eq!(json["workHours"], 8.0);
    }

    #[test]
    fn test_analysis_serializes_category_label() {
        let analysis = StressAnalysis {
            overall_stress_level: 0.15,
            stress_category: StressCategory::Low,
            physiological_score: 0.07,
            behavioral_score: 0.27,
            recommendations: vec!["Maintain current healthy lifestyle habits".to_string()],
            risk_factors: vec![],
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["stressCategory"], "Low");
        assert_eq!(json["overallStressLevel"], 0.15);
        assert!(json["riskFactors"].as_array().unwrap().is_empty());

        let back: StressAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(back, analysis);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(StressCategory::Severe.to_string(), "Severe");
        assert_eq!(StressCategory::Moderate.as_str(), "Moderate");
    }
}
