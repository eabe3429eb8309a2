//! Stress scoring
//!
//! Combines normalized component scores through fixed weight tables into a
//! physiological score, a behavioral score and an overall stress level, then
//! derives the category, risk factors and recommendations.
//!
//! The scorer holds no state; every call reads only its arguments.

use crate::advice::{generate_recommendations, identify_risk_factors};
use crate::normalizer::Normalizer;
use crate::types::{
    BehavioralComponents, BehavioralSnapshot, ComponentScores, PhysiologicalComponents,
    PhysiologicalSnapshot, StressAnalysis, StressCategory,
};

/// Share of the overall level taken by the physiological score
pub const PHYSIOLOGICAL_SHARE: f64 = 0.6;

/// Share of the overall level taken by the behavioral score
pub const BEHAVIORAL_SHARE: f64 = 0.4;

/// Weights applied to physiological components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysiologicalWeights {
    pub heart_rate: f64,
    pub blood_pressure: f64,
    pub respiratory_rate: f64,
    pub skin_conductance: f64,
    pub body_temperature: f64,
}

impl PhysiologicalWeights {
    pub fn total(&self) -> f64 {
        self.heart_rate
            + self.blood_pressure
            + self.respiratory_rate
            + self.skin_conductance
            + self.body_temperature
    }

    /// Weighted sum of the components
    pub fn apply(&self, c: &PhysiologicalComponents) -> f64 {
        c.heart_rate * self.heart_rate
            + c.blood_pressure * self.blood_pressure
            + c.respiratory_rate * self.respiratory_rate
            + c.skin_conductance * self.skin_conductance
            + c.body_temperature * self.body_temperature
    }
}

/// Weights applied to behavioral components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehavioralWeights {
    pub sleep_hours: f64,
    pub sleep_quality: f64,
    pub activity_level: f64,
    pub screen_time: f64,
    pub social_interactions: f64,
    pub work_hours: f64,
}

impl BehavioralWeights {
    pub fn total(&self) -> f64 {
        self.sleep_hours
            + self.sleep_quality
            + self.activity_level
            + self.screen_time
            + self.social_interactions
            + self.work_hours
    }

    /// Weighted sum of the components
    pub fn apply(&self, c: &BehavioralComponents) -> f64 {
        c.sleep_hours * self.sleep_hours
            + c.sleep_quality * self.sleep_quality
            + c.activity_level * self.activity_level
            + c.screen_time * self.screen_time
            + c.social_interactions * self.social_interactions
            + c.work_hours * self.work_hours
    }
}

pub const PHYSIOLOGICAL_WEIGHTS: PhysiologicalWeights = PhysiologicalWeights {
    heart_rate: 0.25,
    blood_pressure: 0.20,
    respiratory_rate: 0.15,
    skin_conductance: 0.20,
    body_temperature: 0.20,
};

pub const BEHAVIORAL_WEIGHTS: BehavioralWeights = BehavioralWeights {
    sleep_hours: 0.25,
    sleep_quality: 0.20,
    activity_level: 0.15,
    screen_time: 0.15,
    social_interactions: 0.15,
    work_hours: 0.10,
};

/// Unrounded scores from one scoring pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScores {
    pub components: ComponentScores,
    pub physiological: f64,
    pub behavioral: f64,
    pub overall: f64,
}

/// Rule-based stress scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct StressScorer;

impl StressScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a pair of snapshots.
    ///
    /// Total over finite inputs: out-of-range values produce extreme but
    /// well-defined scores rather than errors. Output scores are rounded to
    /// two decimals; category and recommendations use the unrounded level.
    pub fn analyze(
        &self,
        physiological: &PhysiologicalSnapshot,
        behavioral: &BehavioralSnapshot,
    ) -> StressAnalysis {
        let raw = self.raw_scores(physiological, behavioral);
        self.analysis_from(&raw, physiological, behavioral)
    }

    /// Build the analysis from scores already computed for these snapshots
    pub fn analysis_from(
        &self,
        raw: &RawScores,
        physiological: &PhysiologicalSnapshot,
        behavioral: &BehavioralSnapshot,
    ) -> StressAnalysis {
        let recommendations = generate_recommendations(raw.overall, physiological, behavioral)
            .into_iter()
            .map(|r| r.as_str().to_string())
            .collect();
        let risk_factors = identify_risk_factors(physiological, behavioral)
            .into_iter()
            .map(|r| r.as_str().to_string())
            .collect();

        StressAnalysis {
            overall_stress_level: round2(raw.overall),
            stress_category: categorize(raw.overall),
            physiological_score: round2(raw.physiological),
            behavioral_score: round2(raw.behavioral),
            recommendations,
            risk_factors,
        }
    }

    /// Compute component and aggregate scores without rounding
    pub fn raw_scores(
        &self,
        physiological: &PhysiologicalSnapshot,
        behavioral: &BehavioralSnapshot,
    ) -> RawScores {
        let components = Normalizer::normalize(physiological, behavioral);
        let physiological = PHYSIOLOGICAL_WEIGHTS.apply(&components.physiological);
        let behavioral = BEHAVIORAL_WEIGHTS.apply(&components.behavioral);
        let overall = physiological * PHYSIOLOGICAL_SHARE + behavioral * BEHAVIORAL_SHARE;

        RawScores {
            components,
            physiological,
            behavioral,
            overall,
        }
    }
}

/// Map an overall level onto its category band
pub fn categorize(score: f64) -> StressCategory {
    if score < 0.25 {
        StressCategory::Low
    } else if score < 0.5 {
        StressCategory::Moderate
    } else if score < 0.75 {
        StressCategory::High
    } else {
        StressCategory::Severe
    }
}

/// Round to two decimals, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
