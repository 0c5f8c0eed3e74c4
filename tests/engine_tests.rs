use chrono::{Days, NaiveDate};
use croprisk::config::Config;
use croprisk::logic::RiskEngine;
use croprisk::model::{FeatureRecord, ModelHandle, RiskModel};
use croprisk::models::{
    Action, AlertColor, Disease, ForecastDay, Language, ModelUsed, RiskLevel,
};
use croprisk::{CropRiskError, Result};
use std::io::Write;
use tempfile::NamedTempFile;

/// Two stumps: 7-day rain at or below 20 mm favours LOW, and the mites
/// one-hot column favours HIGH.
const FOREST: &str = r#"{
    "name": "fixture-forest",
    "classes": ["LOW", "MEDIUM", "HIGH", "CRITICAL"],
    "diseases": ["anthracnose", "mites"],
    "severities": ["mild", "severe"],
    "trees": [
        {
            "feature": [5, -2, -2],
            "threshold": [20.0, -2.0, -2.0],
            "left": [1, -1, -1],
            "right": [2, -1, -1],
            "value": [[0, 0, 0, 0], [8, 2, 0, 0], [0, 0, 3, 7]]
        },
        {
            "feature": [1, -2, -2],
            "threshold": [0.5, -2.0, -2.0],
            "left": [1, -1, -1],
            "right": [2, -1, -1],
            "value": [[0, 0, 0, 0], [0, 10, 0, 0], [0, 0, 10, 0]]
        }
    ]
}"#;

fn week(mean: f64, rain: f64) -> Vec<ForecastDay> {
    let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    (0..7)
        .map(|i| ForecastDay::new(start + Days::new(i), mean, mean, rain))
        .collect()
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

struct AlwaysFails;

impl RiskModel for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }
    fn predict(&self, _: &FeatureRecord) -> Result<RiskLevel> {
        Err(CropRiskError::ModelInference("boom".into()))
    }
    fn predict_proba(&self, _: &FeatureRecord) -> Result<Vec<f64>> {
        Err(CropRiskError::ModelInference("boom".into()))
    }
}

#[test]
fn empty_forecast_returns_medium_default() {
    let a = RiskEngine::rules_only().assess("anthracnose", "severe", &[]);
    assert_eq!(a.risk_level, RiskLevel::Medium);
    assert_eq!(a.risk_score, 0.5);
    assert_eq!(a.model_used, ModelUsed::None);
    assert!(a.daily_risk.is_empty());
    assert_eq!(a.monitoring_frequency.en, "Every 3–5 days");
}

#[test]
fn mites_hot_dry_week_without_model() {
    let a = RiskEngine::rules_only().assess("mites", "moderate", &week(32.0, 1.0));

    // Per-day continuous score: temp 32 °C inside 27-35 -> 1.0; 1 mm is the low
    // bucket, which scores 1.0 for mites. 0.6 + 0.4 = 1.0.
    for day in &a.daily_risk {
        assert!((day.day_risk - 1.0).abs() < 1e-9);
    }

    // Headline from the categorical scorer: 7 mm total -> 0.25, 32 °C -> 0.35,
    // zero diurnal range -> 95% humidity -> 0.02; x1.0 = 0.62 -> HIGH, which
    // reports the representative score 0.75.
    assert_eq!(a.model_used, ModelUsed::RuleBased);
    assert_eq!(a.risk_score, 0.75);
    assert_eq!(a.risk_level, RiskLevel::High);
    assert_eq!(a.alert_color, AlertColor::Orange);
    assert_eq!(a.action, Action::ImmediateTreatment);
    assert!(a.outlook.en.contains("mite"));
}

#[test]
fn unknown_disease_resolves_to_medium() {
    let a = RiskEngine::rules_only().assess("unknown_pest", "mild", &week(29.0, 12.0));
    assert_eq!(a.disease, None);
    assert_eq!(a.risk_level, RiskLevel::Medium);
    assert_eq!(a.risk_score, 0.5);
    assert_eq!(a.alert_color, AlertColor::Yellow);
}

#[test]
fn failing_model_falls_back_to_rules() {
    let engine = RiskEngine::new(ModelHandle::from_model(AlwaysFails));
    let a = engine.assess("mites", "moderate", &week(32.0, 1.0));
    assert_eq!(a.model_used, ModelUsed::RuleBased);
    assert_eq!(a.risk_level, RiskLevel::High);
    assert_eq!(a.risk_score, 0.75);
    assert!(!a.explanation.why_this_risk.en.is_empty());
    assert!(!a.explanation.why_this_risk.si.is_empty());
    assert!(engine.model().is_available());
}

#[test]
fn model_loaded_from_disk_drives_assessment() {
    let file = write_temp(FOREST);
    let handle = ModelHandle::load(Some(file.path()));
    assert!(handle.is_available());

    let a = RiskEngine::new(handle).assess("mites", "moderate", &week(32.0, 1.0));
    // tree 1: 7 mm -> [.8, .2, 0, 0]; tree 2: mites -> [0, 0, 1, 0]
    assert_eq!(a.model_used, ModelUsed::Ml);
    assert_eq!(a.risk_level, RiskLevel::High);
    assert!((a.risk_score - 0.5).abs() < 1e-9);
    assert!(a.explanation.why_this_risk.en.contains("ML model"));
    assert!(a.explanation.why_this_risk.si.contains("ML ආකෘතිය"));
    // the per-day curve still comes from the continuous rules
    assert_eq!(a.daily_risk.len(), 7);
    assert_eq!(a.daily_risk[0].day_risk_level, RiskLevel::Critical);
}

#[test]
fn corrupt_model_file_means_rules_only() {
    let file = write_temp("{ \"classes\": [\"LOW\"], \"trees\": ");
    let handle = ModelHandle::load(Some(file.path()));
    assert!(!handle.is_available());

    let a = RiskEngine::new(handle).assess("anthracnose", "mild", &week(27.0, 8.0));
    assert_eq!(a.model_used, ModelUsed::RuleBased);
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = std::sync::Arc::new(RiskEngine::rules_only());
    let handles: Vec<_> = Disease::ALL
        .into_iter()
        .map(|disease| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.assess(disease.key(), "severe", &week(28.0, 6.0)))
        })
        .collect();

    for handle in handles {
        let a = handle.join().unwrap();
        assert!(a.disease.is_some());
        assert_eq!(a.model_used, ModelUsed::RuleBased);
    }
}

#[test]
fn config_file_points_engine_at_model() {
    let model = write_temp(FOREST);
    let config = write_temp(&format!(
        "model:\n  path: {}\nweather:\n  forecast_days: 10\nlocation:\n  default_district: Galle\n",
        model.path().display()
    ));

    let config = Config::load(Some(config.path().to_path_buf())).unwrap();
    assert_eq!(config.weather.forecast_days, 10);
    assert_eq!(config.location.default_district.as_deref(), Some("Galle"));

    let handle = ModelHandle::load(config.model.artifact_path());
    assert!(handle.is_available());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(Some(dir.path().join("absent.yaml")));
    assert!(matches!(result, Err(CropRiskError::Config(_))));
}

#[test]
fn assessment_serializes_for_clients() {
    let a = RiskEngine::rules_only().assess("leaf_curl", "moderate", &week(27.0, 4.0));
    let json: serde_json::Value = serde_json::to_value(&a).unwrap();
    assert_eq!(json["risk_level"], a.risk_level.as_str());
    assert_eq!(json["model_used"], "rule_based");
    assert_eq!(json["daily_risk"].as_array().map(|d| d.len()), Some(7));
    assert!(json["weather_summary"]["estimated_humidity_pct"].is_number());
    assert!(json["explanation"]["why_this_risk"]["en"].is_string());
    assert!(json["explanation"]["why_this_risk"]["si"].is_string());
}

#[test]
fn why_this_risk_reads_in_sinhala() {
    let a = RiskEngine::rules_only().assess("mites", "severe", &week(32.0, 0.0));
    let why = &a.explanation.why_this_risk;
    assert!(!a.explanation.factors.is_empty());
    assert!(!why.get(Language::Si).is_empty());
    assert_ne!(why.get(Language::Si), why.get(Language::En));
    assert!(why.si.contains("දැනටමත් ඉහළ රෝගී බව (severe)"));
}
