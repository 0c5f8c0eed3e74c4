use crate::error::Result;
use crate::logic::aggregator::aggregate;
use crate::logic::alerts::{action_guide, no_data_guide};
use crate::logic::classifier::{Classification, RiskClassifier};
use crate::logic::explanation::{explain, no_data_explanation, outlook, ExplanationInputs};
use crate::logic::profiles;
use crate::logic::rules::{day_score, score_forecast, WeatherIndex};
use crate::model::ModelHandle;
use crate::models::{
    normalize_key, DailyRisk, Disease, DiseaseProfile, ForecastDay, LocalizedText, ModelUsed,
    RiskAssessment, RiskLevel, Severity,
};

/// Score given when there is no forecast to look at
pub const NO_DATA_SCORE: f64 = 0.5;

/// Entry point for risk assessments.
///
/// Holds only the classifier handle, which is read-only after construction,
/// so one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    classifier: RiskClassifier,
}

impl RiskEngine {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            classifier: RiskClassifier::new(model),
        }
    }

    /// Engine with no learned model
    pub fn rules_only() -> Self {
        Self::new(ModelHandle::unavailable("rule-based scoring only"))
    }

    pub fn model(&self) -> &ModelHandle {
        self.classifier.model()
    }

    /// Assess weather-driven risk for a disease over a forecast window.
    ///
    /// Always answers. Unknown diseases get the neutral profile, unknown
    /// severities the neutral multiplier, and an empty forecast the MEDIUM
    /// default.
    pub fn assess(
        &self,
        disease_name: &str,
        severity: &str,
        days: &[ForecastDay],
    ) -> RiskAssessment {
        let disease_key = normalize_key(disease_name);
        let (profile, found) = profiles::profile(&disease_key);
        let disease = profile.disease;
        if !found {
            tracing::warn!("Unknown disease '{}' - using neutral profile", disease_name);
        }

        let severity_parsed = Severity::parse(severity);
        if severity_parsed.is_none() {
            tracing::debug!("Unrecognised severity '{}' - using neutral weight", severity);
        }

        let stats = match aggregate(days) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("{} for {} - returning default assessment", e, disease_key);
                return no_data_assessment(disease, disease_key, severity_parsed, profile);
            }
        };

        let Classification {
            level,
            score,
            model_used,
        } = self.classifier.classify(disease, severity_parsed, &stats);

        let daily_risk = days
            .iter()
            .map(|day| {
                let scored = day_score(profile, day);
                DailyRisk {
                    date: day.date,
                    temp_mean_c: day.temp_mean_c(),
                    rain_mm: day.rain_mm,
                    estimated_humidity_pct: day.estimated_humidity_pct(),
                    day_risk: scored.risk,
                    day_risk_level: RiskLevel::from_score(scored.risk),
                }
            })
            .collect();

        let guide = action_guide(level);
        let inputs = ExplanationInputs {
            mean_temp_c: stats.mean_temp_c,
            rain_7d_mm: stats.total_rain_mm,
            humidity_pct: stats.estimated_humidity_pct,
        };

        RiskAssessment {
            disease,
            disease_key,
            severity: severity_parsed,
            risk_level: level,
            risk_score: score,
            alert_color: guide.alert_color,
            action: guide.action,
            urgency: guide.urgency,
            monitoring_frequency: guide.monitoring_frequency,
            daily_risk,
            model_used,
            weather_summary: Some(stats),
            disease_explanation: disease_text(profile),
            explanation: explain(disease, severity_parsed, &inputs, level, model_used),
            outlook: outlook(disease, level),
        }
    }

    /// Continuous weather index over the forecast window
    pub fn weather_index(
        &self,
        disease_name: &str,
        severity: &str,
        days: &[ForecastDay],
    ) -> Result<WeatherIndex> {
        score_forecast(disease_name, Severity::parse(severity), days)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::rules_only()
    }
}

fn disease_text(profile: &DiseaseProfile) -> LocalizedText {
    if profile.is_neutral() {
        profile.summary
    } else {
        profile.explanation
    }
}

fn no_data_assessment(
    disease: Option<Disease>,
    disease_key: String,
    severity: Option<Severity>,
    profile: &DiseaseProfile,
) -> RiskAssessment {
    let guide = no_data_guide();
    RiskAssessment {
        disease,
        disease_key,
        severity,
        risk_level: RiskLevel::Medium,
        risk_score: NO_DATA_SCORE,
        alert_color: guide.alert_color,
        action: guide.action,
        urgency: guide.urgency,
        monitoring_frequency: guide.monitoring_frequency,
        daily_risk: Vec::new(),
        model_used: ModelUsed::None,
        weather_summary: None,
        disease_explanation: disease_text(profile),
        explanation: no_data_explanation(),
        outlook: outlook(disease, RiskLevel::Medium),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, AlertColor};
    use chrono::{Days, NaiveDate};

    fn week(mean: f64, rain: f64) -> Vec<ForecastDay> {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        (0..7)
            .map(|i| ForecastDay::new(start + Days::new(i), mean, mean, rain))
            .collect()
    }

    #[test]
    fn empty_forecast_is_medium_default() {
        let a = RiskEngine::rules_only().assess("anthracnose", "severe", &[]);
        assert_eq!(a.risk_level, RiskLevel::Medium);
        assert_eq!(a.risk_score, 0.5);
        assert_eq!(a.model_used, ModelUsed::None);
        assert_eq!(a.alert_color, AlertColor::Yellow);
        assert_eq!(a.action, Action::PreventiveSpray);
        assert!(a.daily_risk.is_empty());
        assert!(a.weather_summary.is_none());
        assert!(a.explanation.why_this_risk.en.starts_with("No weather data"));
        assert!(!a.explanation.why_this_risk.si.is_empty());
    }

    #[test]
    fn hot_dry_mites_week_on_rules() {
        let a = RiskEngine::rules_only().assess("mites", "moderate", &week(32.0, 1.0));
        // categorical: rain 7 mm -> 0.25, temp 32 -> 0.35, humidity 95% -> 0.02,
        // sum 0.62 -> HIGH, reported at the HIGH representative score
        assert_eq!(a.model_used, ModelUsed::RuleBased);
        assert_eq!(a.risk_score, 0.75);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.alert_color, AlertColor::Orange);
        assert_eq!(a.daily_risk.len(), 7);
        for day in &a.daily_risk {
            assert!((day.day_risk - 1.0).abs() < 1e-9);
            assert_eq!(day.day_risk_level, RiskLevel::Critical);
            assert_eq!(day.estimated_humidity_pct, 95.0);
        }
    }

    #[test]
    fn unknown_disease_is_neutral_medium() {
        let a = RiskEngine::rules_only().assess("unknown_pest", "mild", &week(28.0, 5.0));
        assert_eq!(a.disease, None);
        assert_eq!(a.disease_key, "unknown_pest");
        assert_eq!(a.risk_level, RiskLevel::Medium);
        assert_eq!(a.risk_score, 0.5);
        assert_eq!(a.daily_risk.len(), 7);
        assert!(a.daily_risk.iter().all(|d| d.day_risk == 0.5));
        assert!(a.outlook.en.starts_with("Monitor closely"));
    }

    #[test]
    fn free_text_names_resolve() {
        let a = RiskEngine::rules_only().assess("  Leaf Curl ", "SEVERE", &week(27.0, 3.0));
        assert_eq!(a.disease, Some(Disease::LeafCurl));
        assert_eq!(a.severity, Some(Severity::Severe));
    }

    #[test]
    fn invalid_severity_uses_neutral_multiplier() {
        let engine = RiskEngine::rules_only();
        let junk = engine.assess("mites", "extreme", &week(32.0, 1.0));
        let moderate = engine.assess("mites", "moderate", &week(32.0, 1.0));
        assert_eq!(junk.severity, None);
        assert_eq!(junk.risk_score, moderate.risk_score);
    }

    #[test]
    fn weather_index_passes_through() {
        let index = RiskEngine::default()
            .weather_index("mites", "mild", &week(32.0, 1.0))
            .unwrap();
        assert!((index.risk_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RiskEngine>();
    }
}
