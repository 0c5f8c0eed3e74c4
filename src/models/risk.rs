use super::disease::{Disease, Severity};
use super::localized::{LocalizedString, LocalizedText};
use super::weather::AggregateWeatherStats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub const CRITICAL_THRESHOLD: f64 = 0.80;
    pub const HIGH_THRESHOLD: f64 = 0.58;
    pub const MEDIUM_THRESHOLD: f64 = 0.35;

    /// Fixed threshold table shared by every score-to-level conversion
    pub fn from_score(score: f64) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Some(RiskLevel::Low),
            "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH" => Some(RiskLevel::High),
            "CRITICAL" => Some(RiskLevel::Critical),
            _ => None,
        }
    }

    pub fn label(&self) -> LocalizedText {
        match self {
            RiskLevel::Low => LocalizedText::new("Low risk", "අඩු අවදානම"),
            RiskLevel::Medium => LocalizedText::new("Medium risk", "මධ්‍යම අවදානම"),
            RiskLevel::High => LocalizedText::new("High risk", "ඉහළ අවදානම"),
            RiskLevel::Critical => LocalizedText::new(
                "Critical risk (urgent action required)",
                "අවදානමේ අවසාන අදියර (හදිසි ක්‍රියාව අවශ්‍යයි)",
            ),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl AlertColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertColor::Green => "GREEN",
            AlertColor::Yellow => "YELLOW",
            AlertColor::Orange => "ORANGE",
            AlertColor::Red => "RED",
        }
    }
}

impl std::fmt::Display for AlertColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RoutineMonitoring,
    PreventiveSpray,
    ImmediateTreatment,
    EmergencyIntervention,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RoutineMonitoring => "routine_monitoring",
            Action::PreventiveSpray => "preventive_spray",
            Action::ImmediateTreatment => "immediate_treatment",
            Action::EmergencyIntervention => "emergency_intervention",
        }
    }

    pub fn label(&self) -> LocalizedText {
        match self {
            Action::RoutineMonitoring => {
                LocalizedText::new("Routine monitoring", "සාමාන්‍ය නිරීක්ෂණය")
            }
            Action::PreventiveSpray => {
                LocalizedText::new("Preventive spray", "වැළකීමේ ඖෂධ ඉසීම")
            }
            Action::ImmediateTreatment => {
                LocalizedText::new("Immediate treatment", "ඉක්මන් ප්‍රතිකාරය")
            }
            Action::EmergencyIntervention => {
                LocalizedText::new("Emergency intervention", "හදිසි මැදිහත් වීම")
            }
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which scorer produced the headline risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelUsed {
    Ml,
    RuleBased,
    None,
}

impl ModelUsed {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelUsed::Ml => "ml",
            ModelUsed::RuleBased => "rule_based",
            ModelUsed::None => "none",
        }
    }
}

impl std::fmt::Display for ModelUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the per-day display curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRisk {
    pub date: NaiveDate,
    pub temp_mean_c: f64,
    pub rain_mm: f64,
    pub estimated_humidity_pct: f64,
    pub day_risk: f64,
    pub day_risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Rainfall,
    Temperature,
    Humidity,
    Severity,
}

impl FactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Rainfall => "Rainfall",
            FactorKind::Temperature => "Temperature",
            FactorKind::Humidity => "Humidity",
            FactorKind::Severity => "Severity",
        }
    }
}

/// Whether a factor pushes risk up or holds it down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorEffect {
    Increases,
    Decreases,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub kind: FactorKind,
    pub effect: FactorEffect,
    pub description: String,
    /// Sinhala clause, where one exists for this factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_si: Option<String>,
}

impl RiskFactor {
    pub fn new(kind: FactorKind, effect: FactorEffect, description: impl Into<String>) -> Self {
        Self {
            kind,
            effect,
            description: description.into(),
            description_si: None,
        }
    }

    pub fn with_sinhala(mut self, description: impl Into<String>) -> Self {
        self.description_si = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Explanation {
    pub factors: Vec<RiskFactor>,
    pub why_this_risk: LocalizedString,
}

/// Complete answer for one disease/severity/forecast request
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub disease: Option<Disease>,
    pub disease_key: String,
    pub severity: Option<Severity>,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub alert_color: AlertColor,
    pub action: Action,
    pub urgency: LocalizedText,
    pub monitoring_frequency: LocalizedText,
    pub daily_risk: Vec<DailyRisk>,
    pub model_used: ModelUsed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_summary: Option<AggregateWeatherStats>,
    pub disease_explanation: LocalizedText,
    pub explanation: Explanation,
    pub outlook: LocalizedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_to_levels() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.3499), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.35), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.58), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.7999), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.80), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Critical);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn risk_level_parse() {
        assert_eq!(RiskLevel::parse("critical"), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::parse(" HIGH "), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse("SEVERE"), None);
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn model_used_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModelUsed::RuleBased).unwrap(),
            "\"rule_based\""
        );
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }
}
