pub mod forest;

pub use forest::RandomForestModel;

use crate::error::Result;
use crate::models::{Disease, RiskLevel, Severity};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Inputs the classifier was trained on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub disease: String,
    pub severity: String,
    pub tmean_c: f64,
    pub rain_7d_mm: f64,
    pub humidity_pct: f64,
}

impl FeatureRecord {
    /// Numeric features are rounded to the precision used at training time.
    pub fn new(
        disease_key: &str,
        severity: Option<Severity>,
        mean_temp_c: f64,
        total_rain_mm: f64,
        humidity_pct: f64,
    ) -> Self {
        Self {
            disease: disease_key.to_string(),
            severity: severity.map(|s| s.key().to_string()).unwrap_or_default(),
            tmean_c: round_to(mean_temp_c, 2),
            rain_7d_mm: round_to(total_rain_mm, 2),
            humidity_pct: round_to(humidity_pct, 1),
        }
    }

    pub fn for_disease(
        disease: Disease,
        severity: Option<Severity>,
        mean_temp_c: f64,
        total_rain_mm: f64,
        humidity_pct: f64,
    ) -> Self {
        Self::new(disease.key(), severity, mean_temp_c, total_rain_mm, humidity_pct)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A trained classifier over the four risk levels
pub trait RiskModel: Send + Sync {
    /// Human-readable identifier, used in logs and explanations
    fn name(&self) -> &str;

    /// Predicted risk level
    fn predict(&self, features: &FeatureRecord) -> Result<RiskLevel>;

    /// Probability per class, in the model's own class order
    fn predict_proba(&self, features: &FeatureRecord) -> Result<Vec<f64>>;
}

/// Outcome of the one-time model load.
///
/// A failed load leaves the handle `Unavailable` for the life of the process;
/// the engine then scores with rules only and never retries the load.
#[derive(Clone)]
pub enum ModelHandle {
    Available(Arc<dyn RiskModel>),
    Unavailable { reason: String },
}

impl ModelHandle {
    /// Load the classifier artifact, logging the outcome once.
    ///
    /// `None` means no model is configured, which is a normal rules-only setup.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No risk model configured - using rule-based scoring");
            return Self::unavailable("no model path configured");
        };

        match RandomForestModel::from_path(path) {
            Ok(model) => {
                tracing::info!(
                    "Loaded risk model '{}' ({} trees) from {}",
                    model.name(),
                    model.n_trees(),
                    path.display()
                );
                Self::Available(Arc::new(model))
            }
            Err(e) => {
                tracing::warn!(
                    "Cannot load risk model from {}: {} - falling back to rule-based scoring",
                    path.display(),
                    e
                );
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn from_model(model: impl RiskModel + 'static) -> Self {
        Self::Available(Arc::new(model))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn model(&self) -> Option<&Arc<dyn RiskModel>> {
        match self {
            Self::Available(model) => Some(model),
            Self::Unavailable { .. } => None,
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(model) => f.debug_tuple("Available").field(&model.name()).finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_record_rounds_like_training_data() {
        let record = FeatureRecord::for_disease(
            Disease::LeafCurl,
            Some(Severity::Severe),
            27.456_78,
            31.234_5,
            76.66,
        );
        assert_eq!(record.disease, "leaf_curl");
        assert_eq!(record.severity, "severe");
        assert!((record.tmean_c - 27.46).abs() < 1e-9);
        assert!((record.rain_7d_mm - 31.23).abs() < 1e-9);
        assert!((record.humidity_pct - 76.7).abs() < 1e-9);
    }

    #[test]
    fn missing_severity_encodes_empty() {
        let record = FeatureRecord::new("mites", None, 30.0, 0.0, 60.0);
        assert_eq!(record.severity, "");
    }

    #[test]
    fn no_path_means_unavailable() {
        let handle = ModelHandle::load(None);
        assert!(!handle.is_available());
        assert!(handle.model().is_none());
    }

    #[test]
    fn missing_file_means_unavailable() {
        let handle = ModelHandle::load(Some(Path::new("/nonexistent/weather_risk_model.json")));
        match handle {
            ModelHandle::Unavailable { reason } => assert!(!reason.is_empty()),
            ModelHandle::Available(_) => panic!("expected unavailable handle"),
        }
    }
}
