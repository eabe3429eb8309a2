//! Risk factors and recommendations
//!
//! Both lists are derived from raw input values (and, for recommendations,
//! the unrounded overall score). Checks run in a fixed order and each one
//! appends independently, so output order always follows declaration order.

use crate::types::{BehavioralSnapshot, PhysiologicalSnapshot};

/// Overall score above which professional follow-up is suggested
const CONSULT_THRESHOLD: f64 = 0.5;

/// A raw metric past a concerning threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskFactor {
    ElevatedHeartRate,
    HighBloodPressure,
    SleepDeprivation,
    WorkOverload,
    SedentaryLifestyle,
    ExcessiveScreenTime,
}

impl RiskFactor {
    /// All risk factors in check order
    pub const ALL: [RiskFactor; 6] = [
        RiskFactor::ElevatedHeartRate,
        RiskFactor::HighBloodPressure,
        RiskFactor::SleepDeprivation,
        RiskFactor::WorkOverload,
        RiskFactor::SedentaryLifestyle,
        RiskFactor::ExcessiveScreenTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::ElevatedHeartRate => "Elevated heart rate",
            RiskFactor::HighBloodPressure => "High blood pressure",
            RiskFactor::SleepDeprivation => "Sleep deprivation",
            RiskFactor::WorkOverload => "Work overload",
            RiskFactor::SedentaryLifestyle => "Sedentary lifestyle",
            RiskFactor::ExcessiveScreenTime => "Excessive screen time",
        }
    }

    /// Whether this factor fires for the given raw inputs
    pub fn applies(&self, phys: &PhysiologicalSnapshot, behav: &BehavioralSnapshot) -> bool {
        match self {
            RiskFactor::ElevatedHeartRate => phys.heart_rate > 100.0,
            RiskFactor::HighBloodPressure => phys.blood_pressure_systolic > 140.0,
            RiskFactor::SleepDeprivation => behav.sleep_hours < 6.0,
            RiskFactor::WorkOverload => behav.work_hours > 12.0,
            RiskFactor::SedentaryLifestyle => behav.activity_level < 3.0,
            RiskFactor::ExcessiveScreenTime => behav.screen_time > 10.0,
        }
    }
}

/// A textual suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    ConsultProfessional,
    DeepBreathing,
    SleepDuration,
    PhysicalActivity,
    ReduceScreenTime,
    RelaxationTechniques,
    WorkLifeBalance,
    MaintainHabits,
    ContinueRoutine,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::ConsultProfessional => {
                "Consider consulting with a healthcare professional"
            }
            Recommendation::DeepBreathing => {
                "Practice deep breathing exercises for 10 minutes daily"
            }
            Recommendation::SleepDuration => "Aim for 7-9 hours of sleep per night",
            Recommendation::PhysicalActivity => {
                "Increase physical activity - aim for 30 minutes daily"
            }
            Recommendation::ReduceScreenTime => "Reduce screen time, especially before bedtime",
            Recommendation::RelaxationTechniques => {
                "Practice relaxation techniques to lower heart rate"
            }
            Recommendation::WorkLifeBalance => {
                "Consider work-life balance and time management strategies"
            }
            Recommendation::MaintainHabits => "Maintain current healthy lifestyle habits",
            Recommendation::ContinueRoutine => "Continue regular exercise and good sleep hygiene",
        }
    }
}

/// Collect triggered risk factors in check order
pub fn identify_risk_factors(
    phys: &PhysiologicalSnapshot,
    behav: &BehavioralSnapshot,
) -> Vec<RiskFactor> {
    RiskFactor::ALL
        .iter()
        .copied()
        .filter(|risk| risk.applies(phys, behav))
        .collect()
}

/// Collect recommendations in check order, falling back to the maintenance pair
pub fn generate_recommendations(
    overall_score: f64,
    phys: &PhysiologicalSnapshot,
    behav: &BehavioralSnapshot,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if overall_score > CONSULT_THRESHOLD {
        recommendations.push(Recommendation::ConsultProfessional);
        recommendations.push(Recommendation::DeepBreathing);
    }
    if behav.sleep_hours < 7.0 {
        recommendations.push(Recommendation::SleepDuration);
    }
    if behav.activity_level < 5.0 {
        recommendations.push(Recommendation::PhysicalActivity);
    }
    if behav.screen_time > 8.0 {
        recommendations.push(Recommendation::ReduceScreenTime);
    }
    if phys.heart_rate > 100.0 {
        recommendations.push(Recommendation::RelaxationTechniques);
    }
    if behav.work_hours > 10.0 {
        recommendations.push(Recommendation::WorkLifeBalance);
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::MaintainHabits);
        recommendations.push(Recommendation::ContinueRoutine);
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_risk_factors_for_defaults() {
        let risks = identify_risk_factors(
            &PhysiologicalSnapshot::default(),
            &BehavioralSnapshot::default(),
        );
        assert!(risks.is_empty());
    }

    #[test]
    fn test_risk_factor_order_is_fixed() {
        // Trigger a non-contiguous subset; output must keep check order
        let phys = PhysiologicalSnapshot {
            blood_pressure_systolic: 150.0,
            ..Default::default()
        };
        let behav = BehavioralSnapshot {
            screen_time: 11.0,
            sleep_hours: 5.0,
            ..Default::default()
        };

        let risks = identify_risk_factors(&phys, &behav);
        assert_eq!(
            risks,
            vec![
                RiskFactor::HighBloodPressure,
                RiskFactor::SleepDeprivation,
                RiskFactor::ExcessiveScreenTime,
            ]
        );
    }

    #[test]
    fn test_risk_thresholds_are_strict() {
        let phys = PhysiologicalSnapshot {
            heart_rate: 100.0,
            blood_pressure_systolic: 140.0,
            ..Default::default()
        };
        let behav = BehavioralSnapshot {
            sleep_hours: 6.0,
            work_hours: 12.0,
            activity_level: 3.0,
            screen_time: 10.0,
            ..Default::default()
        };
        assert!(identify_risk_factors(&phys, &behav).is_empty());
    }

    #[test]
    fn test_low_heart_rate_is_not_a_risk() {
        let phys = PhysiologicalSnapshot {
            heart_rate: 35.0,
            ..Default::default()
        };
        let risks = identify_risk_factors(&phys, &BehavioralSnapshot::default());
        assert!(risks.is_empty());
    }

    #[test]
    fn test_fallback_recommendations() {
        let recs = generate_recommendations(
            0.15,
            &PhysiologicalSnapshot::default(),
            &BehavioralSnapshot::default(),
        );
        assert_eq!(
            recs,
            vec![Recommendation::MaintainHabits, Recommendation::ContinueRoutine]
        );
    }

    #[test]
    fn test_consult_pair_requires_score_above_half() {
        let phys = PhysiologicalSnapshot::default();
        let behav = BehavioralSnapshot::default();

        let at_threshold = generate_recommendations(0.5, &phys, &behav);
        assert!(!at_threshold.contains(&Recommendation::ConsultProfessional));

        let above = generate_recommendations(0.5001, &phys, &behav);
        assert_eq!(
            above,
            vec![Recommendation::ConsultProfessional, Recommendation::DeepBreathing]
        );
    }

    #[test]
    fn test_single_trigger_suppresses_fallback() {
        let behav = BehavioralSnapshot {
            work_hours: 11.0,
            ..Default::default()
        };
        let recs = generate_recommendations(0.2, &PhysiologicalSnapshot::default(), &behav);
        assert_eq!(recs, vec![Recommendation::WorkLifeBalance]);
    }

    fn at_thresholds() -> (PhysiologicalSnapshot, BehavioralSnapshot) {
        (
            PhysiologicalSnapshot {
                heart_rate: 100.0,
                ..Default::default()
            },
            BehavioralSnapshot {
                sleep_hours: 7.0,
                activity_level: 5.0,
                screen_time: 8.0,
                work_hours: 10.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_recommendation_thresholds_are_strict() {
        let (phys, behav) = at_thresholds();
        let recs = generate_recommendations(0.2, &phys, &behav);
        assert_eq!(
            recs,
            vec![Recommendation::MaintainHabits, Recommendation::ContinueRoutine]
        );
    }

    #[test]
    fn test_each_recommendation_fires_just_past_threshold() {
        let (base_phys, base_behav) = at_thresholds();

        let mut behav = base_behav;
        behav.sleep_hours = 6.99;
        assert_eq!(
            generate_recommendations(0.2, &base_phys, &behav),
            vec![Recommendation::SleepDuration]
        );

        let mut behav = base_behav;
        behav.activity_level = 4.99;
        assert_eq!(
            generate_recommendations(0.2, &base_phys, &behav),
            vec![Recommendation::PhysicalActivity]
        );

        let mut behav = base_behav;
        behav.screen_time = 8.01;
        assert_eq!(
            generate_recommendations(0.2, &base_phys, &behav),
            vec![Recommendation::ReduceScreenTime]
        );

        let mut phys = base_phys;
        phys.heart_rate = 100.01;
        assert_eq!(
            generate_recommendations(0.2, &phys, &base_behav),
            vec![Recommendation::RelaxationTechniques]
        );

        let mut behav = base_behav;
        behav.work_hours = 10.01;
        assert_eq!(
            generate_recommendations(0.2, &base_phys, &behav),
            vec![Recommendation::WorkLifeBalance]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskFactor::WorkOverload.as_str(), "Work overload");
        assert_eq!(
            Recommendation::PhysicalActivity.as_str(),
            "Increase physical activity - aim for 30 minutes daily"
        );
    }
}
