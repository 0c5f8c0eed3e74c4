use crate::error::{CropRiskError, Result};
use crate::logic::profiles;
use crate::models::{
    AlertColor, DiseaseProfile, ForecastDay, LocalizedText, RainfallBehavior, Severity,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Score handed out when no profile applies
pub const NEUTRAL_SCORE: f64 = 0.5;

const TEMP_WEIGHT: f64 = 0.6;
const RAIN_WEIGHT: f64 = 0.4;
/// Degrees outside the optimal band over which the temperature score decays to zero
const TEMP_MARGIN_C: f64 = 10.0;

/// Daily rainfall bucket: <2 mm low, 2-10 mm medium, >10 mm high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RainBucket {
    Low,
    Medium,
    High,
}

impl RainBucket {
    pub fn from_mm(rain_mm: f64) -> Self {
        if rain_mm < 2.0 {
            RainBucket::Low
        } else if rain_mm <= 10.0 {
            RainBucket::Medium
        } else {
            RainBucket::High
        }
    }
}

/// 1.0 inside `[low, high]`, decaying linearly to 0 over 10 °C either side
pub fn temp_score(temp_mean_c: f64, low: f64, high: f64) -> f64 {
    let distance = if temp_mean_c < low {
        low - temp_mean_c
    } else if temp_mean_c > high {
        temp_mean_c - high
    } else {
        return 1.0;
    };
    (1.0 - distance / TEMP_MARGIN_C).clamp(0.0, 1.0)
}

pub fn rain_score(rain_mm: f64, behavior: RainfallBehavior) -> f64 {
    let bucket = RainBucket::from_mm(rain_mm);
    match (behavior, bucket) {
        (RainfallBehavior::HighIncreasesRisk, RainBucket::Low) => 0.2,
        (RainfallBehavior::HighIncreasesRisk, RainBucket::Medium) => 0.6,
        (RainfallBehavior::HighIncreasesRisk, RainBucket::High) => 1.0,
        (RainfallBehavior::AfterRainIncreases, RainBucket::Low) => 0.3,
        (RainfallBehavior::AfterRainIncreases, RainBucket::Medium) => 0.8,
        (RainfallBehavior::AfterRainIncreases, RainBucket::High) => 1.0,
        (RainfallBehavior::HeavyRainDecreases, RainBucket::Low) => 1.0,
        (RainfallBehavior::HeavyRainDecreases, RainBucket::Medium) => 0.6,
        (RainfallBehavior::HeavyRainDecreases, RainBucket::High) => 0.2,
        (RainfallBehavior::DryWorsens, RainBucket::Low) => 1.0,
        (RainfallBehavior::DryWorsens, RainBucket::Medium) => 0.6,
        (RainfallBehavior::DryWorsens, RainBucket::High) => 0.4,
    }
}

/// Severity weight for the continuous index. Calibrated separately from the
/// categorical multiplier; the two tables must stay distinct.
pub fn continuous_severity_weight(severity: Option<Severity>) -> f64 {
    match severity {
        Some(Severity::Mild) => 0.8,
        Some(Severity::Moderate) | None => 1.0,
        Some(Severity::Severe) => 1.2,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayScore {
    pub date: NaiveDate,
    pub temp_score: f64,
    pub rain_score: f64,
    pub risk: f64,
}

/// Score one day from how far its mean temperature sits from the profile's
/// optimal band and which rainfall bucket it falls into.
///
/// Drives the per-day curve whichever scorer produced the headline level. The
/// neutral profile scores every day at 0.5.
pub fn day_score(profile: &DiseaseProfile, day: &ForecastDay) -> DayScore {
    let Some(behavior) = profile.rainfall else {
        return DayScore {
            date: day.date,
            temp_score: NEUTRAL_SCORE,
            rain_score: NEUTRAL_SCORE,
            risk: NEUTRAL_SCORE,
        };
    };

    let ts = temp_score(
        day.temp_mean_c(),
        profile.optimal_temp_low_c,
        profile.optimal_temp_high_c,
    );
    let rs = rain_score(day.rain_mm, behavior);

    DayScore {
        date: day.date,
        temp_score: ts,
        rain_score: rs,
        risk: TEMP_WEIGHT * ts + RAIN_WEIGHT * rs,
    }
}

/// GREEN/YELLOW/RED alert for a continuous index score
pub fn continuous_alert(score: f64, severity: Option<Severity>) -> AlertColor {
    if severity == Some(Severity::Severe) && score >= 0.65 {
        AlertColor::Red
    } else if score >= 0.5 {
        AlertColor::Yellow
    } else {
        AlertColor::Green
    }
}

/// 7-day continuous weather index
#[derive(Debug, Clone, Serialize)]
pub struct WeatherIndex {
    pub risk_score: f64,
    pub alert: AlertColor,
    pub message: LocalizedText,
    pub daily: Vec<DayScore>,
}

/// Mean day risk over the window, scaled by the continuous severity weight.
///
/// Unknown diseases get a neutral index with no daily rows. An empty forecast
/// for a known disease is `InsufficientData`.
pub fn score_forecast(
    disease_name: &str,
    severity: Option<Severity>,
    days: &[ForecastDay],
) -> Result<WeatherIndex> {
    let (profile, found) = profiles::profile(disease_name);
    if !found {
        return Ok(WeatherIndex {
            risk_score: NEUTRAL_SCORE,
            alert: AlertColor::Yellow,
            message: profile.summary,
            daily: Vec::new(),
        });
    }

    if days.is_empty() {
        return Err(CropRiskError::InsufficientData);
    }

    let daily: Vec<DayScore> = days.iter().map(|d| day_score(profile, d)).collect();
    let base = daily.iter().map(|d| d.risk).sum::<f64>() / daily.len() as f64;
    let risk_score = (base * continuous_severity_weight(severity)).clamp(0.0, 1.0);

    Ok(WeatherIndex {
        risk_score,
        alert: continuous_alert(risk_score, severity),
        message: profile.summary,
        daily,
    })
}
