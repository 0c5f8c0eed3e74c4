use crate::models::{Disease, RiskLevel, Severity};
use serde::Serialize;

/// Score for diseases with no categorical rules
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Severity multiplier for the categorical scorer.
///
/// Intentionally not the same table as
/// [`continuous_severity_weight`](super::continuous::continuous_severity_weight).
pub fn categorical_severity_multiplier(severity: Option<Severity>) -> f64 {
    match severity {
        Some(Severity::Mild) => 0.7,
        Some(Severity::Moderate) | None => 1.0,
        Some(Severity::Severe) => 1.35,
    }
}

/// Points contributed by each weather condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionPoints {
    pub rainfall: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl ConditionPoints {
    pub fn total(&self) -> f64 {
        self.rainfall + self.temperature + self.humidity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoricalScore {
    /// `None` when the disease has no rules and the neutral score was used
    pub points: Option<ConditionPoints>,
    pub multiplier: f64,
    pub score: f64,
    pub level: RiskLevel,
}

/// Confidence reported for a rule-based level.
///
/// Each value falls inside its level's threshold band.
pub fn representative_score(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Low => 0.2,
        RiskLevel::Medium => 0.5,
        RiskLevel::High => 0.75,
        RiskLevel::Critical => 0.92,
    }
}

/// Tri-level condition checks per disease.
///
/// Rainfall is the 7-day total in mm; humidity is the estimated percentage.
pub fn condition_points(
    disease: Disease,
    mean_temp_c: f64,
    rain_7d_mm: f64,
    humidity_pct: f64,
) -> ConditionPoints {
    let (t, r, h) = (mean_temp_c, rain_7d_mm, humidity_pct);
    match disease {
        Disease::Anthracnose => ConditionPoints {
            rainfall: if r > 50.0 {
                0.40
            } else if r > 20.0 {
                0.25
            } else {
                0.05
            },
            temperature: if (24.0..=32.0).contains(&t) {
                0.35
            } else if (20.0..24.0).contains(&t) {
                0.20
            } else {
                0.05
            },
            humidity: if h >= 80.0 {
                0.25
            } else if h >= 65.0 {
                0.15
            } else {
                0.05
            },
        },
        Disease::Mosaic => ConditionPoints {
            rainfall: if r < 10.0 {
                0.40
            } else if r < 30.0 {
                0.25
            } else {
                0.10
            },
            temperature: if (25.0..=35.0).contains(&t) {
                0.35
            } else if t > 35.0 {
                0.20
            } else {
                0.10
            },
            humidity: if h < 60.0 {
                0.25
            } else if h < 75.0 {
                0.15
            } else {
                0.05
            },
        },
        Disease::Mites => ConditionPoints {
            rainfall: if r < 5.0 {
                0.45
            } else if r < 15.0 {
                0.25
            } else {
                0.05
            },
            temperature: if t >= 28.0 {
                0.35
            } else if t >= 24.0 {
                0.20
            } else {
                0.05
            },
            humidity: if h < 55.0 {
                0.20
            } else if h < 70.0 {
                0.10
            } else {
                0.02
            },
        },
        Disease::LeafCurl => ConditionPoints {
            // Moderate rain peaks; both dry and very wet weeks score lower
            rainfall: if (10.0..=40.0).contains(&r) {
                0.35
            } else if r > 40.0 {
                0.20
            } else {
                0.30
            },
            temperature: if (22.0..=33.0).contains(&t) {
                0.35
            } else if t > 33.0 {
                0.20
            } else {
                0.10
            },
            humidity: if (65.0..=85.0).contains(&h) {
                0.30
            } else if h > 85.0 {
                0.15
            } else {
                0.20
            },
        },
    }
}

/// Rule-based fallback classification over aggregate weather.
///
/// Unknown diseases get the fixed neutral score, unscaled by severity.
pub fn categorical_score(
    disease: Option<Disease>,
    severity: Option<Severity>,
    mean_temp_c: f64,
    rain_7d_mm: f64,
    humidity_pct: f64,
) -> CategoricalScore {
    let multiplier = categorical_severity_multiplier(severity);

    let Some(disease) = disease else {
        return CategoricalScore {
            points: None,
            multiplier,
            score: NEUTRAL_SCORE,
            level: RiskLevel::from_score(NEUTRAL_SCORE),
        };
    };

    let points = condition_points(disease, mean_temp_c, rain_7d_mm, humidity_pct);
    let score = (points.total() * multiplier).clamp(0.0, 1.0);

    CategoricalScore {
        points: Some(points),
        multiplier,
        score,
        level: RiskLevel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers() {
        assert_eq!(categorical_severity_multiplier(Some(Severity::Mild)), 0.7);
        assert_eq!(categorical_severity_multiplier(Some(Severity::Moderate)), 1.0);
        assert_eq!(categorical_severity_multiplier(Some(Severity::Severe)), 1.35);
        assert_eq!(categorical_severity_multiplier(None), 1.0);
    }

    #[test]
    fn anthracnose_wet_warm_humid_week_is_critical() {
        let s = categorical_score(
            Some(Disease::Anthracnose),
            Some(Severity::Moderate),
            27.0,
            60.0,
            85.0,
        );
        // 0.40 + 0.35 + 0.25
        assert!((s.score - 1.0).abs() < 1e-9);
        assert_eq!(s.level, RiskLevel::Critical);
    }

    #[test]
    fn anthracnose_dry_cool_week_is_low() {
        let s = categorical_score(Some(Disease::Anthracnose), None, 18.0, 2.0, 50.0);
        assert!((s.score - 0.15).abs() < 1e-9);
        assert_eq!(s.level, RiskLevel::Low);
    }

    #[test]
    fn anthracnose_graded_temperature() {
        let p = condition_points(Disease::Anthracnose, 22.0, 30.0, 70.0);
        assert_eq!(p.temperature, 0.20);
        assert_eq!(p.rainfall, 0.25);
        assert_eq!(p.humidity, 0.15);
    }

    #[test]
    fn mites_hot_week_with_light_rain() {
        // 7 mm total, 32 °C, humidity 95% (no diurnal range)
        let p = condition_points(Disease::Mites, 32.0, 7.0, 95.0);
        assert_eq!(p.rainfall, 0.25);
        assert_eq!(p.temperature, 0.35);
        assert_eq!(p.humidity, 0.02);
        let s = categorical_score(Some(Disease::Mites), Some(Severity::Moderate), 32.0, 7.0, 95.0);
        assert!((s.score - 0.62).abs() < 1e-9);
        assert_eq!(s.level, RiskLevel::High);
    }

    #[test]
    fn mosaic_dry_spell() {
        let p = condition_points(Disease::Mosaic, 30.0, 4.0, 50.0);
        assert!((p.total() - 1.0).abs() < 1e-9);
        let p = condition_points(Disease::Mosaic, 20.0, 45.0, 90.0);
        assert!((p.total() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn leaf_curl_prefers_moderate_rain() {
        let moderate = condition_points(Disease::LeafCurl, 28.0, 25.0, 75.0);
        let dry = condition_points(Disease::LeafCurl, 28.0, 2.0, 75.0);
        let soaked = condition_points(Disease::LeafCurl, 28.0, 80.0, 75.0);
        assert!(moderate.rainfall > dry.rainfall);
        assert!(dry.rainfall > soaked.rainfall);
    }

    #[test]
    fn severe_multiplier_clamps_to_one() {
        let s = categorical_score(
            Some(Disease::Mosaic),
            Some(Severity::Severe),
            30.0,
            4.0,
            50.0,
        );
        assert_eq!(s.score, 1.0);
        assert_eq!(s.level, RiskLevel::Critical);
    }

    #[test]
    fn representative_scores_stay_in_their_band() {
        assert_eq!(representative_score(RiskLevel::Low), 0.2);
        assert_eq!(representative_score(RiskLevel::Medium), 0.5);
        assert_eq!(representative_score(RiskLevel::High), 0.75);
        assert_eq!(representative_score(RiskLevel::Critical), 0.92);
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_score(representative_score(level)), level);
        }
    }

    #[test]
    fn unknown_disease_is_fixed_neutral() {
        for severity in [Some(Severity::Mild), Some(Severity::Severe), None] {
            let s = categorical_score(None, severity, 30.0, 10.0, 70.0);
            assert_eq!(s.score, NEUTRAL_SCORE);
            assert_eq!(s.level, RiskLevel::Medium);
            assert!(s.points.is_none());
        }
    }
}
