use crate::error::{CropRiskError, Result};
use crate::models::LocalizedText;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgroZone {
    Wet,
    Dry,
}

impl AgroZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgroZone::Wet => "wet",
            AgroZone::Dry => "dry",
        }
    }
}

impl std::fmt::Display for AgroZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported growing districts (Southern Province, Sri Lanka)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum District {
    Galle,
    Matara,
    Hambantota,
}

pub const PROVINCE: LocalizedText = LocalizedText::new("Southern Province", "දකුණු පළාත");

impl District {
    pub const ALL: [District; 3] = [District::Galle, District::Matara, District::Hambantota];

    pub fn key(&self) -> &'static str {
        match self {
            District::Galle => "galle",
            District::Matara => "matara",
            District::Hambantota => "hambantota",
        }
    }

    pub fn name(&self) -> LocalizedText {
        match self {
            District::Galle => LocalizedText::new("Galle", "ගාල්ල"),
            District::Matara => LocalizedText::new("Matara", "මාතර"),
            District::Hambantota => LocalizedText::new("Hambantota", "හම්බන්තොට"),
        }
    }

    /// District centroid as (latitude, longitude)
    pub fn centroid(&self) -> (f64, f64) {
        match self {
            District::Galle => (6.0535, 80.2210),
            District::Matara => (5.9485, 80.5353),
            District::Hambantota => (6.1241, 81.1185),
        }
    }

    pub fn zone(&self) -> AgroZone {
        match self {
            District::Galle | District::Matara => AgroZone::Wet,
            District::Hambantota => AgroZone::Dry,
        }
    }

    pub fn rainfall_note(&self) -> LocalizedText {
        match self {
            District::Galle => LocalizedText::new(
                "Galle receives heavy rainfall year-round (Wet Zone). High humidity significantly increases anthracnose and leaf curl risk.",
                "ගාල්ල දිස්ත්‍රික්කය වර්ෂ පුරාම අධික වර්ෂාපාතයක් ලබයි. ඉහළ ආර්ද්‍රතාව anthracnose සහ leaf curl රෝග ඉතා වේගයෙන් ව්‍යාප්ත කරයි.",
            ),
            District::Matara => LocalizedText::new(
                "Matara is a coastal Wet Zone district. Warm temperatures and moderate-to-high humidity support fungal and vector-borne diseases.",
                "මාතර වෙරළාසන්න ආර්ද්‍ර කලාපීය දිස්ත්‍රික්කයකි. උණුසුම් කාලගුණය සහ මධ්‍යස්ථ-ඉහළ ආර්ද්‍රතාව දිලීර සහ ව්‍යාධිජනක රෝග ව්‍යාප්ත කරයි.",
            ),
            District::Hambantota => LocalizedText::new(
                "Hambantota is a Dry Zone district with low annual rainfall and high temperatures. Spider mite and mosaic virus risks are highest here during dry months.",
                "හම්බන්තොට ශුෂ්ක කලාපීය දිස්ත්‍රික්කයකි. අඩු වර්ෂාපාතය සහ ඉහළ උෂ්ණත්වය හේතුවෙන් spider mite සහ mosaic virus රෝග ඉහළ අවදානමක් බව දැකිය හැකිය.",
            ),
        }
    }

    /// District agriculture office for escalations
    pub fn extension_office(&self) -> LocalizedText {
        match self {
            District::Galle => LocalizedText::new(
                "Galle District Agriculture Office, Galle Fort Road, Galle (Tel: 091-2222247)",
                "ගාල්ල දිස්ත්‍රික් කෘෂිකර්ම කාර්යාලය, ගාල්ල කොටුව පාර, ගාල්ල (දු.අ: 091-2222247)",
            ),
            District::Matara => LocalizedText::new(
                "Matara District Agriculture Office, Rahula Road, Matara (Tel: 041-2222245)",
                "මාතර දිස්ත්‍රික් කෘෂිකර්ම කාර්යාලය, රාහුල මාවත, මාතර (දු.අ: 041-2222245)",
            ),
            District::Hambantota => LocalizedText::new(
                "Hambantota District Agriculture Office, Hambantota Road, Hambantota (Tel: 047-2220045)",
                "හම්බන්තොට දිස්ත්‍රික් කෘෂිකර්ම කාර්යාලය, හම්බන්තොට පාර, හම්බන්තොට (දු.අ: 047-2220045)",
            ),
        }
    }

    /// Resolve a free-text district name.
    ///
    /// Case, spaces and underscores are ignored, and a partial name matches
    /// in either direction ("gal" and "galle district" both resolve to Galle).
    pub fn lookup(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != ' ' && *c != '_')
            .collect();
        if key.is_empty() {
            return None;
        }

        if let Some(exact) = Self::ALL.into_iter().find(|d| d.key() == key) {
            return Some(exact);
        }
        Self::ALL
            .into_iter()
            .find(|d| d.key().contains(key.as_str()) || key.contains(d.key()))
    }

    pub fn resolve(name: &str) -> Result<Self> {
        Self::lookup(name).ok_or_else(|| {
            CropRiskError::NotFound(format!(
                "district '{}' (supported: {})",
                name,
                Self::ALL.map(|d| d.key()).join(", ")
            ))
        })
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().en)
    }
}
