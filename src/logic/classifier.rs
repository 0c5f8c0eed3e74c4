use crate::error::{CropRiskError, Result};
use crate::logic::rules::{categorical_score, representative_score};
use crate::model::{FeatureRecord, ModelHandle, RiskModel};
use crate::models::{AggregateWeatherStats, Disease, ModelUsed, RiskLevel, Severity};

/// Headline level and score for one request, with the path that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub level: RiskLevel,
    pub score: f64,
    pub model_used: ModelUsed,
}

/// Two-tier classifier: learned model first, categorical rules second
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    model: ModelHandle,
}

impl RiskClassifier {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Classify aggregate weather for a disease.
    ///
    /// The rule path reports the level's representative score rather than the
    /// raw categorical sum.
    ///
    /// Inference failures are logged and answered by the rule scorer for this
    /// call only; the model stays loaded for later requests. Unrecognised
    /// diseases skip the model since none of its one-hot columns would fire.
    pub fn classify(
        &self,
        disease: Option<Disease>,
        severity: Option<Severity>,
        stats: &AggregateWeatherStats,
    ) -> Classification {
        if let (Some(model), Some(disease)) = (self.model.model(), disease) {
            let features = FeatureRecord::for_disease(
                disease,
                severity,
                stats.mean_temp_c,
                stats.total_rain_mm,
                stats.estimated_humidity_pct,
            );
            match predict_with(model.as_ref(), &features) {
                Ok(classification) => {
                    tracing::debug!(
                        "Model '{}' classified {} as {} ({:.3})",
                        model.name(),
                        disease,
                        classification.level,
                        classification.score
                    );
                    return classification;
                }
                Err(e) => {
                    tracing::warn!(
                        "Model '{}' failed for {}: {} - using rule-based scoring",
                        model.name(),
                        disease,
                        e
                    );
                }
            }
        }

        let rules = categorical_score(
            disease,
            severity,
            stats.mean_temp_c,
            stats.total_rain_mm,
            stats.estimated_humidity_pct,
        );
        tracing::debug!(
            "Rule-based score {:.3} (multiplier {}) -> {}",
            rules.score,
            rules.multiplier,
            rules.level
        );

        Classification {
            level: rules.level,
            score: representative_score(rules.level),
            model_used: ModelUsed::RuleBased,
        }
    }
}

/// Predicted class plus its confidence, the maximum class probability
fn predict_with(model: &dyn RiskModel, features: &FeatureRecord) -> Result<Classification> {
    let level = model.predict(features)?;
    let proba = model.predict_proba(features)?;

    let confidence = proba
        .iter()
        .copied()
        .filter(|p| p.is_finite())
        .fold(None, |best: Option<f64>, p| Some(best.map_or(p, |b| b.max(p))))
        .ok_or_else(|| {
            CropRiskError::ModelInference("model returned no usable probabilities".to_string())
        })?;

    Ok(Classification {
        level,
        score: confidence.clamp(0.0, 1.0),
        model_used: ModelUsed::Ml,
    })
}
