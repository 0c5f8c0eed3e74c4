use super::localized::LocalizedText;
use serde::{Deserialize, Serialize};

/// Diseases with a known weather-response profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Anthracnose,
    Mosaic,
    Mites,
    LeafCurl,
}

impl Disease {
    pub const ALL: [Disease; 4] = [
        Disease::Anthracnose,
        Disease::Mosaic,
        Disease::Mites,
        Disease::LeafCurl,
    ];

    /// Canonical key, also used as the model's disease vocabulary
    pub fn key(&self) -> &'static str {
        match self {
            Disease::Anthracnose => "anthracnose",
            Disease::Mosaic => "mosaic",
            Disease::Mites => "mites",
            Disease::LeafCurl => "leaf_curl",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::Anthracnose => "Anthracnose",
            Disease::Mosaic => "Mosaic",
            Disease::Mites => "Mites",
            Disease::LeafCurl => "Leaf Curl",
        }
    }

    /// Resolve free-text disease names ("Leaf Curl", "leaf-curl") to a known disease
    pub fn from_name(name: &str) -> Option<Self> {
        match normalize_key(name).as_str() {
            "anthracnose" => Some(Disease::Anthracnose),
            "mosaic" => Some(Disease::Mosaic),
            "mites" => Some(Disease::Mites),
            "leaf_curl" => Some(Disease::LeafCurl),
            _ => None,
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower-case, and collapse runs of spaces/hyphens/underscores into one underscore.
pub fn normalize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if c == ' ' || c == '-' || c == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !key.is_empty() {
            key.push('_');
        }
        pending_sep = false;
        key.extend(c.to_lowercase());
    }
    key
}

/// How rainfall moves a disease's risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainfallBehavior {
    HighIncreasesRisk,
    DryWorsens,
    HeavyRainDecreases,
    AfterRainIncreases,
}

impl RainfallBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainfallBehavior::HighIncreasesRisk => "High rainfall increases risk",
            RainfallBehavior::DryWorsens => "Dry spells worsen risk",
            RainfallBehavior::HeavyRainDecreases => "Heavy rain decreases risk",
            RainfallBehavior::AfterRainIncreases => "Risk rises after rains",
        }
    }
}

impl std::fmt::Display for RainfallBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observed disease severity on the crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn key(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    /// Case-insensitive; anything else is treated as "no severity information"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Some(Severity::Mild),
            "moderate" => Some(Severity::Moderate),
            "severe" => Some(Severity::Severe),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Static agronomic knowledge for one disease.
///
/// `disease` and `rainfall` are `None` only for the neutral profile handed out
/// for unrecognised disease names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiseaseProfile {
    pub disease: Option<Disease>,
    pub optimal_temp_low_c: f64,
    pub optimal_temp_high_c: f64,
    pub rainfall: Option<RainfallBehavior>,
    pub summary: LocalizedText,
    pub explanation: LocalizedText,
}

impl DiseaseProfile {
    pub fn is_neutral(&self) -> bool {
        self.disease.is_none()
    }
}
