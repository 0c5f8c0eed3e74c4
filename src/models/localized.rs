use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Si,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Si => "si",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "si" | "sinhala" => Some(Language::Si),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// English/Sinhala pair of static advisory text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: &'static str,
    pub si: &'static str,
}

impl LocalizedText {
    pub const fn new(en: &'static str, si: &'static str) -> Self {
        Self { en, si }
    }

    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.en,
            Language::Si => self.si,
        }
    }
}

/// English/Sinhala pair of generated text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedString {
    pub en: String,
    pub si: String,
}

impl LocalizedString {
    pub fn new(en: impl Into<String>, si: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            si: si.into(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Si => &self.si,
        }
    }
}

impl From<LocalizedText> for LocalizedString {
    fn from(text: LocalizedText) -> Self {
        Self::new(text.en, text.si)
    }
}
