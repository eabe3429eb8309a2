//! Per-metric normalization
//!
//! Each function maps one raw metric to a stress contribution where 0 means
//! the value sits in its healthy range. Clamping is applied per metric, so a
//! few rules are left open at the top end.

use crate::types::{
    BehavioralComponents, BehavioralSnapshot, ComponentScores, PhysiologicalComponents,
    PhysiologicalSnapshot,
};

/// Reference body temperature (°F)
const NORMAL_BODY_TEMP_F: f64 = 98.6;

/// Normalizer for converting raw snapshots into component scores
pub struct Normalizer;

impl Normalizer {
    /// Normalize both snapshots
    pub fn normalize(
        physiological: &PhysiologicalSnapshot,
        behavioral: &BehavioralSnapshot,
    ) -> ComponentScores {
        ComponentScores {
            physiological: Self::normalize_physiological(physiological),
            behavioral: Self::normalize_behavioral(behavioral),
        }
    }

    pub fn normalize_physiological(data: &PhysiologicalSnapshot) -> PhysiologicalComponents {
        PhysiologicalComponents {
            heart_rate: heart_rate(data.heart_rate),
            blood_pressure: blood_pressure(
                data.blood_pressure_systolic,
                data.blood_pressure_diastolic,
            ),
            respiratory_rate: respiratory_rate(data.respiratory_rate),
            skin_conductance: skin_conductance(data.skin_conductance),
            body_temperature: body_temperature(data.body_temperature),
        }
    }

    pub fn normalize_behavioral(data: &BehavioralSnapshot) -> BehavioralComponents {
        BehavioralComponents {
            sleep_hours: sleep_hours(data.sleep_hours),
            sleep_quality: sleep_quality(data.sleep_quality),
            activity_level: activity_level(data.activity_level),
            screen_time: screen_time(data.screen_time),
            social_interactions: social_interactions(data.social_interactions),
            work_hours: work_hours(data.work_hours),
        }
    }
}

/// Healthy range 60-100 bpm
pub fn heart_rate(hr: f64) -> f64 {
    if hr < 60.0 {
        ((60.0 - hr) / 20.0).max(0.0)
    } else if hr > 100.0 {
        ((hr - 100.0) / 50.0).min(1.0)
    } else {
        0.0
    }
}

/// Worst of systolic (above 120) and diastolic (above 80)
pub fn blood_pressure(systolic: f64, diastolic: f64) -> f64 {
    let systolic_score = ((systolic - 120.0) / 40.0).max(0.0);
    let diastolic_score = ((diastolic - 80.0) / 20.0).max(0.0);
    systolic_score.max(diastolic_score).min(1.0)
}

/// Healthy range 12-20 breaths/min
pub fn respiratory_rate(rr: f64) -> f64 {
    if rr < 12.0 {
        (12.0 - rr) / 8.0
    } else if rr > 20.0 {
        (rr - 20.0) / 10.0
    } else {
        0.0
    }
}

pub fn skin_conductance(sc: f64) -> f64 {
    (sc / 10.0).min(1.0)
}

/// Deviation from 98.6°F, saturating at 2 degrees
pub fn body_temperature(temp: f64) -> f64 {
    ((temp - NORMAL_BODY_TEMP_F).abs() / 2.0).min(1.0)
}

/// Healthy range 7-9 hours
pub fn sleep_hours(hours: f64) -> f64 {
    if (7.0..=9.0).contains(&hours) {
        0.0
    } else if hours < 7.0 {
        (7.0 - hours) / 7.0
    } else {
        ((hours - 9.0) / 6.0).min(1.0)
    }
}

/// Lower quality means more stress
pub fn sleep_quality(quality: f64) -> f64 {
    1.0 - quality / 10.0
}

/// Lower activity means more stress
pub fn activity_level(activity: f64) -> f64 {
    1.0 - (activity / 10.0).min(1.0)
}

pub fn screen_time(hours: f64) -> f64 {
    (hours / 12.0).min(1.0)
}

/// Fewer interactions means more stress
pub fn social_interactions(social: f64) -> f64 {
    1.0 - (social / 10.0).min(1.0)
}

/// Anything past an 8 hour day
pub fn work_hours(hours: f64) -> f64 {
    ((hours - 8.0) / 8.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_heart_rate_bands() {
        assert_eq!(heart_rate(60.0), 0.0);
        assert_eq!(heart_rate(100.0), 0.0);
        assert!(approx(heart_rate(50.0), 0.5));
        assert!(approx(heart_rate(125.0), 0.5));
        assert_eq!(heart_rate(250.0), 1.0);
        // Low side is not capped at 1
        assert!(approx(heart_rate(20.0), 2.0));
    }

    #[test]
    fn test_blood_pressure_takes_worst_reading() {
        assert_eq!(blood_pressure(120.0, 80.0), 0.0);
        assert!(approx(blood_pressure(140.0, 80.0), 0.5));
        assert!(approx(blood_pressure(120.0, 95.0), 0.75));
        assert!(approx(blood_pressure(140.0, 95.0), 0.75));
        assert_eq!(blood_pressure(200.0, 130.0), 1.0);
        assert_eq!(blood_pressure(90.0, 60.0), 0.0);
    }

    #[test]
    fn test_respiratory_rate_bands() {
        assert_eq!(respiratory_rate(12.0), 0.0);
        assert_eq!(respiratory_rate(20.0), 0.0);
        assert!(approx(respiratory_rate(8.0), 0.5));
        assert!(approx(respiratory_rate(25.0), 0.5));
    }

    #[test]
    fn test_skin_conductance_and_temperature() {
        assert!(approx(skin_conductance(3.5), 0.35));
        assert_eq!(skin_conductance(15.0), 1.0);
        assert_eq!(body_temperature(98.6), 0.0);
        assert!(approx(body_temperature(99.6), 0.5));
        assert!(approx(body_temperature(97.6), 0.5));
        assert_eq!(body_temperature(104.0), 1.0);
    }

    #[test]
    fn test_sleep_hours_bands() {
        assert_eq!(sleep_hours(7.0), 0.0);
        assert_eq!(sleep_hours(9.0), 0.0);
        assert!(approx(sleep_hours(3.5), 0.5));
        assert!(approx(sleep_hours(12.0), 0.5));
        assert_eq!(sleep_hours(20.0), 1.0);
    }

    #[test]
    fn test_behavioral_inversions() {
        assert!(approx(sleep_quality(7.0), 0.3));
        assert!(approx(activity_level(6.0), 0.4));
        assert_eq!(activity_level(12.0), 0.0);
        assert!(approx(social_interactions(5.0), 0.5));
        assert!(approx(screen_time(6.0), 0.5));
        assert_eq!(screen_time(16.0), 1.0);
        assert_eq!(work_hours(6.0), 0.0);
        assert!(approx(work_hours(12.0), 0.5));
    }

    #[test]
    fn test_normalize_defaults() {
        let components = Normalizer::normalize(
            &PhysiologicalSnapshot::default(),
            &BehavioralSnapshot::default(),
        );

        assert_eq!(components.physiological.heart_rate, 0.0);
        assert_eq!(components.physiological.blood_pressure, 0.0);
        assert!(approx(components.physiological.skin_conductance, 0.35));
        assert_eq!(components.behavioral.sleep_hours, 0.0);
        assert!(approx(components.behavioral.screen_time, 0.5));
        assert_eq!(components.behavioral.work_hours, 0.0);
    }
}
