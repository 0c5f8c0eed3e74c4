use crate::error::{CropRiskError, Result};
use crate::models::{Disease, DiseaseProfile, LocalizedText, RainfallBehavior};

const ANTHRACNOSE: DiseaseProfile = DiseaseProfile {
    disease: Some(Disease::Anthracnose),
    optimal_temp_low_c: 25.0,
    optimal_temp_high_c: 30.0,
    rainfall: Some(RainfallBehavior::HighIncreasesRisk),
    summary: LocalizedText::new(
        "Anthracnose spreads rapidly in wet conditions; frequent rain and moisture increase infections.",
        "ඇන්ත්‍රැක්නෝස් තෙත් තත්ත්වයන්හි ඉක්මනින් පැතිරේ; නිතර වැසි සහ තෙතමනය ආසාදන වැඩි කරයි.",
    ),
    explanation: LocalizedText::new(
        "Anthracnose (Colletotrichum gloeosporioides) spreads rapidly in warm, humid and rainy \
         conditions. Fruit rot and leaf blight worsen significantly when rain stays above \
         20 mm/week and temperature is 25–30 °C. Improve air circulation and drainage to slow \
         progression.",
        "ඇන්ත්‍රැක්නෝස් (Colletotrichum gloeosporioides) රෝගය උෂ්ණ, තෙත් සහ වැසි \
         කාළගුණයේ ඉක්මනින් පැතිර යයි. සතිය ඇතුළත 20 mm ඉක්මවූ වර්ෂාපතනය සහ \
         උෂ්ණත්වය 25–30 °C ඇත්නම් ගෙඩි කුණු වීම සහ කොළ දිරාපත් වීම තීව්‍ර වේ. \
         වාතය ධාවනය සහ ජල ඉවතලීම වැඩිදියුණු කිරීම රෝගය සෙමෙන් ව්‍යාප්ත කරයි.",
    ),
};

const MOSAIC: DiseaseProfile = DiseaseProfile {
    disease: Some(Disease::Mosaic),
    optimal_temp_low_c: 25.0,
    optimal_temp_high_c: 35.0,
    rainfall: Some(RainfallBehavior::DryWorsens),
    summary: LocalizedText::new(
        "Mosaic is often vector-related; dry spells can worsen outbreaks. Moderate rain may reduce spread in some cases.",
        "මොසේයික් බොහෝවිට කෘමි වාහක හරහා පැතිරේ; වියළි කාලවලදී පැතිරීම වැඩි විය හැකිය.",
    ),
    explanation: LocalizedText::new(
        "Papaya Mosaic Virus (PapMV) is spread by aphid vectors. Dry and warm spells increase \
         aphid activity and virus spread. There is no chemical cure; vector management and \
         removal of infected plants are the most effective control strategies.",
        "පැපෝල් මොසේයික් වයිරසය (PapMV) ඇෆිඩ් කෘමීන් මගින් පැතිරේ. \
         වියළි සහ උෂ්ණ කාළගුණය ඇෆිඩ් ක්‍රියාකාරීත්වය සහ වයිරස් පැතිරීම වැඩි කරයි. \
         රසායනික ප්‍රතිකාරයක් නොමැත — රෝගී ශාක ඉවත් කිරීම සහ කෘමි පාලනය \
         ඵලදායීම ක්‍රමෝපායයන් ය.",
    ),
};

const MITES: DiseaseProfile = DiseaseProfile {
    disease: Some(Disease::Mites),
    optimal_temp_low_c: 27.0,
    optimal_temp_high_c: 35.0,
    rainfall: Some(RainfallBehavior::HeavyRainDecreases),
    summary: LocalizedText::new(
        "Mites prefer warm and dry weather; heavy rain can reduce populations by washing them off leaves.",
        "මකුළුවන් උණුසුම් හා වියළි කාලගුණයට කැමතිය; අධික වැසි ඔවුන් කොළවලින් සෝදා හරියි.",
    ),
    explanation: LocalizedText::new(
        "Spider mites (Tetranychus urticae) thrive in hot, dry weather. Low rainfall \
         (<5 mm/week) and temperatures above 28 °C cause rapid population explosions. Heavy \
         rain naturally reduces mite numbers by dislodging them.",
        "කාළ මකුළුවන් (Tetranychus urticae) උෂ්ණ, වියළි කාළගුණයේ ශීඝ්‍රයෙන් වැඩිවේ. \
         සතිය ඇතුළත 5 mm ට අඩු වර්ෂාව සහ 28 °C ට ඉහළ උෂ්ණත්වය ජනගහනය \
         ඉහළ දැමීමට හේතු වේ. ගිනිවර්ෂාව ස්වාභාවිකව ඒවා ශාකවලින් ඉවත් කරයි.",
    ),
};

const LEAF_CURL: DiseaseProfile = DiseaseProfile {
    disease: Some(Disease::LeafCurl),
    optimal_temp_low_c: 20.0,
    optimal_temp_high_c: 33.0,
    rainfall: Some(RainfallBehavior::AfterRainIncreases),
    summary: LocalizedText::new(
        "Leaf curl often increases after rains due to higher humidity and favorable conditions for vectors/pathogens.",
        "වැසිවලින් පසු ඉහළ ආර්ද්‍රතාව නිසා ලිෆ් කර්ල් රෝගය බොහෝවිට වැඩි වේ.",
    ),
    explanation: LocalizedText::new(
        "Papaya Leaf Curl Virus is transmitted by whiteflies and thrips. Vectors are most \
         active in warm conditions with moderate humidity (after light rains). Dry spells \
         concentrate insect populations near water sources including your plantation.",
        "පැපෝල් ලිෆ් කර්ල් වයිරසය සුදු මැස්සන් (whitefly) සහ ත්‍රිප් (thrips) \
         කෘමීන් මගින් සංක්‍රමණය වේ. මෘදු වර්ෂාවෙන් පසු සාමාන්‍ය ආර්ද්‍රතාව ඇති \
         උෂ්ණ කාළගුණයේ මෙම කෘමීන් වඩාත් ක්‍රියාශීලී වේ. ශාකතල ආවරණ (mulch) \
         සහ කෘමි ජාල කෘමි පාලනයට ඵලදායී ය.",
    ),
};

/// Stand-in for diseases the registry has no rules for
pub const NEUTRAL_PROFILE: DiseaseProfile = DiseaseProfile {
    disease: None,
    optimal_temp_low_c: 0.0,
    optimal_temp_high_c: 0.0,
    rainfall: None,
    summary: LocalizedText::new(
        "Weather-risk rules not available for this disease yet.",
        "මෙම රෝගය සඳහා කාලගුණ අවදානම් නීති තවම නොමැත.",
    ),
    explanation: LocalizedText::new("", ""),
};

/// Every known disease has exactly one compiled-in profile
pub fn profile_for(disease: Disease) -> &'static DiseaseProfile {
    match disease {
        Disease::Anthracnose => &ANTHRACNOSE,
        Disease::Mosaic => &MOSAIC,
        Disease::Mites => &MITES,
        Disease::LeafCurl => &LEAF_CURL,
    }
}

/// Strict lookup by free-text disease name
pub fn lookup(name: &str) -> Result<&'static DiseaseProfile> {
    Disease::from_name(name)
        .map(profile_for)
        .ok_or_else(|| CropRiskError::UnknownDisease(name.trim().to_string()))
}

/// Look up a profile by free-text disease name.
///
/// Returns the neutral profile and `false` when the name is not recognised.
pub fn profile(name: &str) -> (&'static DiseaseProfile, bool) {
    match lookup(name) {
        Ok(profile) => (profile, true),
        Err(_) => (&NEUTRAL_PROFILE, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_disease_has_a_matching_profile() {
        for disease in Disease::ALL {
            let p = profile_for(disease);
            assert_eq!(p.disease, Some(disease));
            assert!(p.rainfall.is_some());
            assert!(p.optimal_temp_low_c < p.optimal_temp_high_c);
            assert!(!p.explanation.en.is_empty());
            assert!(!p.explanation.si.is_empty());
        }
    }

    #[test]
    fn lookup_normalizes_name() {
        let (p, found) = profile("Leaf Curl");
        assert!(found);
        assert_eq!(p.disease, Some(Disease::LeafCurl));
        assert_eq!(p.rainfall, Some(RainfallBehavior::AfterRainIncreases));
    }

    #[test]
    fn unknown_name_gets_neutral_profile() {
        let (p, found) = profile("powdery mildew");
        assert!(!found);
        assert!(p.is_neutral());
        assert!(p.summary.en.contains("not available"));
    }

    #[test]
    fn strict_lookup_reports_unknown_disease() {
        match lookup("  Rust ") {
            Err(CropRiskError::UnknownDisease(name)) => assert_eq!(name, "Rust"),
            other => panic!("unexpected {:?}", other.map(|p| p.disease)),
        }
        assert!(lookup("MOSAIC").is_ok());
    }

    #[test]
    fn mites_band() {
        let p = profile_for(Disease::Mites);
        assert_eq!(p.optimal_temp_low_c, 27.0);
        assert_eq!(p.optimal_temp_high_c, 35.0);
        assert_eq!(p.rainfall, Some(RainfallBehavior::HeavyRainDecreases));
    }
}
