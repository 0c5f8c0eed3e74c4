use crate::models::{
    Disease, Explanation, FactorEffect, FactorKind, LocalizedString, LocalizedText, ModelUsed,
    RiskFactor, RiskLevel, Severity,
};

/// Weather aggregates the explanation is built from.
///
/// These are the same aggregates the classifier saw, so the factors describe
/// the conditions behind the level whichever scorer produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplanationInputs {
    pub mean_temp_c: f64,
    pub rain_7d_mm: f64,
    pub humidity_pct: f64,
}

/// Ordered disease and severity factors that hold for these conditions.
///
/// Factors that push risk up carry a Sinhala clause; mitigating ones are
/// English only.
pub fn risk_factors(
    disease: Option<Disease>,
    severity: Option<Severity>,
    inputs: &ExplanationInputs,
) -> Vec<RiskFactor> {
    use FactorEffect::{Decreases, Increases};
    use FactorKind::{Humidity, Rainfall, Temperature};

    let t = inputs.mean_temp_c;
    let rain = inputs.rain_7d_mm;
    let h = inputs.humidity_pct;
    let mut factors = Vec::new();

    match disease {
        Some(Disease::Anthracnose) => {
            if rain > 20.0 {
                let en = format!(
                    "high 7-day rainfall ({:.0} mm) promotes spore germination and spread",
                    rain
                );
                let si = format!("ඉහළ වර්ෂාව ({:.0} mm) ස්පෝරා ප්‍රජනනයට හිතකරය", rain);
                factors.push(RiskFactor::new(Rainfall, Increases, en).with_sinhala(si));
            }
            if h > 75.0 {
                let en = format!(
                    "estimated humidity ({:.0}%) accelerates fungal colony growth",
                    h
                );
                let si = format!("ආර්ද්‍රතාවය ({:.0}%) දිලීර ව්‍යාප්තිය ත්වරණය කරයි", h);
                factors.push(RiskFactor::new(Humidity, Increases, en).with_sinhala(si));
            }
            if (24.0..=32.0).contains(&t) {
                let en = format!(
                    "mean temperature ({:.1} °C) is ideal for Colletotrichum infection cycles",
                    t
                );
                let si = format!("උෂ්ණත්වය ({:.1} °C) Colletotrichum ශාකාහාරීයට ස්ථාවරය", t);
                factors.push(RiskFactor::new(Temperature, Increases, en).with_sinhala(si));
            } else if t > 32.0 {
                let en = format!(
                    "temperature ({:.1} °C) is slightly above optimal, which may moderate fungal spread",
                    t
                );
                factors.push(RiskFactor::new(Temperature, Decreases, en));
            }
            if rain < 5.0 {
                let en = format!(
                    "very low rainfall ({:.0} mm) is reducing spore dispersal for now",
                    rain
                );
                factors.push(RiskFactor::new(Rainfall, Decreases, en));
            }
        }
        Some(Disease::Mosaic) => {
            if rain < 10.0 {
                let en = format!(
                    "very low rainfall ({:.0} mm) keeps aphid colonies active and mobile",
                    rain
                );
                let si = format!("ඉතා අඩු වර්ෂාව ({:.0} mm) ඇෆිඩ් ක්‍රියාශීලිය", rain);
                factors.push(RiskFactor::new(Rainfall, Increases, en).with_sinhala(si));
            }
            if (25.0..=35.0).contains(&t) {
                let en = format!(
                    "temperature ({:.1} °C) is ideal for aphid vector population growth",
                    t
                );
                let si = format!("උෂ්ණත්වය ({:.1} °C) ඇෆිඩ් ජනගහනයට හිතකරය", t);
                factors.push(RiskFactor::new(Temperature, Increases, en).with_sinhala(si));
            }
            if h < 60.0 {
                let en = format!(
                    "low humidity ({:.0}%) encourages aphid movement between plants",
                    h
                );
                let si = format!("අඩු ආර්ද්‍රතාවය ({:.0}%) ආෆිඩ් ව්‍යාප්තිය ත්වරණය කරයි", h);
                factors.push(RiskFactor::new(Humidity, Increases, en).with_sinhala(si));
            }
            if rain > 40.0 {
                let en = format!(
                    "heavy rains ({:.0} mm) may temporarily slow aphid activity",
                    rain
                );
                factors.push(RiskFactor::new(Rainfall, Decreases, en));
            }
        }
        Some(Disease::Mites) => {
            if rain < 5.0 {
                let en = format!(
                    "very low rainfall ({:.0} mm) gives mites no natural knock-down, allowing rapid build-up",
                    rain
                );
                let si = format!(
                    "ඉතා අඩු වර්ෂාව ({:.0} mm), මකුළු ජනගහනය ස්වාභාවිකව ඉවත් නොවේ",
                    rain
                );
                factors.push(RiskFactor::new(Rainfall, Increases, en).with_sinhala(si));
            }
            if t >= 28.0 {
                let en = format!(
                    "high temperature ({:.1} °C) shortens the mite reproductive cycle",
                    t
                );
                let si = format!("ඉහළ උෂ්ණත්වය ({:.1} °C) මකුළු ප්‍රජනනය ත්වරණය කරයි", t);
                factors.push(RiskFactor::new(Temperature, Increases, en).with_sinhala(si));
            }
            if h < 55.0 {
                let en = format!(
                    "low humidity ({:.0}%) is optimal for spider mite survival and egg hatching",
                    h
                );
                let si = format!("අඩු ආර්ද්‍රතාවය ({:.0}%) මකුළු ජීවිතාශ්‍ය ඉහළ යයි", h);
                factors.push(RiskFactor::new(Humidity, Increases, en).with_sinhala(si));
            }
            if rain > 20.0 {
                let en = format!(
                    "rainfall ({:.0} mm) may help wash mites off leaves, partially controlling numbers",
                    rain
                );
                factors.push(RiskFactor::new(Rainfall, Decreases, en));
            }
        }
        Some(Disease::LeafCurl) => {
            if (10.0..=40.0).contains(&rain) {
                let en = format!(
                    "moderate rainfall ({:.0} mm) maintains vector activity without dispersing insects",
                    rain
                );
                factors.push(RiskFactor::new(Rainfall, Increases, en));
            }
            if (22.0..=33.0).contains(&t) {
                let en = format!(
                    "temperature ({:.1} °C) is favorable for whitefly and thrips reproduction",
                    t
                );
                let si = format!("උෂ්ණත්වය ({:.1} °C) whitefly/thrips ප්‍රජනනයට හිතකරය", t);
                factors.push(RiskFactor::new(Temperature, Increases, en).with_sinhala(si));
            }
            if (65.0..=85.0).contains(&h) {
                let en = format!(
                    "humidity ({:.0}%) is in the range that supports vector breeding cycles",
                    h
                );
                let si = format!("ආර්ද්‍රතාවය ({:.0}%) ශාකාහාරී ශ්‍රේණිකරණය ත්වරණය කරයි", h);
                factors.push(RiskFactor::new(Humidity, Increases, en).with_sinhala(si));
            }
            if rain < 5.0 {
                let en = format!(
                    "dry conditions ({:.0} mm rain) concentrate insect vectors near water sources like your plantation",
                    rain
                );
                let si = format!(
                    "වියළි කාළගුණය ({:.0} mm) ජල ප්‍රභවය අසල ශාකාහාරී සංකේන්ද්‍රණය කරයි",
                    rain
                );
                factors.push(RiskFactor::new(Rainfall, Increases, en).with_sinhala(si));
            }
        }
        None => {}
    }

    let severity_factor = match severity {
        Some(Severity::Severe) => Some(LocalizedText::new(
            "the existing severe disease severity amplifies vulnerability to weather-driven spread",
            "දැනටමත් ඉහළ රෝගී බව (severe) කාළගුණ බලපෑම ඉහළ යයි",
        )),
        Some(Severity::Moderate) => Some(LocalizedText::new(
            "moderate disease severity means the plant's defences are already compromised",
            "මධ්‍යම රෝගී බව (moderate) ශාකය ආරක්ෂාව දුර්වල කරයි",
        )),
        Some(Severity::Mild) | None => None,
    };
    if let Some(text) = severity_factor {
        factors.push(
            RiskFactor::new(FactorKind::Severity, Increases, text.en).with_sinhala(text.si),
        );
    }

    factors
}

fn scorer_name(model_used: ModelUsed) -> LocalizedText {
    match model_used {
        ModelUsed::Ml => LocalizedText::new("ML model", "ML ආකෘතිය"),
        ModelUsed::RuleBased => LocalizedText::new("rule-based scorer", "නීති-පාදක ක්‍රමය"),
        ModelUsed::None => LocalizedText::new("default assessment", "පෙරනිමි තක්සේරුව"),
    }
}

/// Assemble the factor list and the why-this-risk sentence in both languages
pub fn explain(
    disease: Option<Disease>,
    severity: Option<Severity>,
    inputs: &ExplanationInputs,
    level: RiskLevel,
    model_used: ModelUsed,
) -> Explanation {
    let factors = risk_factors(disease, severity, inputs);
    let scorer = scorer_name(model_used);

    let en = if factors.is_empty() {
        format!(
            "The {} assessed {} risk based on the combined weather conditions and disease profile.",
            scorer.en, level
        )
    } else {
        let reasons: Vec<&str> = factors.iter().map(|f| f.description.as_str()).collect();
        let mut sentence = format!(
            "The {} assessed {} risk because: {}.",
            scorer.en,
            level,
            reasons.join("; ")
        );
        if model_used == ModelUsed::Ml {
            sentence.push_str(
                " Model confidence is based on a Random Forest classifier trained on local \
                 disease-weather data.",
            );
        }
        sentence
    };

    let clauses: Vec<&str> = factors
        .iter()
        .filter_map(|f| f.description_si.as_deref())
        .collect();
    let si = if clauses.is_empty() {
        format!(
            "{} {} අවදානමක් ශ්‍රේණිගත කළේ ඒකාබද්ධ කාළගුණ හා රෝග දත්ත මත ය.",
            scorer.si, level
        )
    } else {
        format!(
            "{} {} අවදානම ශ්‍රේණිගත කළේ: {}.",
            scorer.si,
            level,
            clauses.join("; ")
        )
    };

    Explanation {
        factors,
        why_this_risk: LocalizedString::new(en, si),
    }
}

/// Explanation for the empty-forecast default
pub fn no_data_explanation() -> Explanation {
    let text = LocalizedText::new(
        "No weather data was available for detailed analysis. MEDIUM risk applied as a precaution.",
        "කාළගුණ දත්ත නොමැති නිසා MEDIUM අවදානම ස්ව-ක්‍රියාව ලෙස යෙදිණ.",
    );
    Explanation {
        factors: Vec::new(),
        why_this_risk: text.into(),
    }
}

/// What to expect if no action is taken, per disease and level
pub fn outlook(disease: Option<Disease>, level: RiskLevel) -> LocalizedText {
    use RiskLevel::{Critical, High, Low, Medium};

    let Some(disease) = disease else {
        return generic_outlook(level);
    };

    match (disease, level) {
        (Disease::Anthracnose, Low) => LocalizedText::new(
            "Disease progression is likely slow. Minor lesions may remain stable under current conditions. Maintain routine spraying and drainage improvements.",
            "රෝගය සෙමෙන් ව්‍යාප්ත වේ. කුඩා ලප ස්ථාවරව පවතිති. සාමාන්‍ය ඉසීම හා ජල ඉවතලීම දිගටම කරගෙන යන්න.",
        ),
        (Disease::Anthracnose, Medium) => LocalizedText::new(
            "Anthracnose spores can germinate in humid spots. Expect water-soaked spots on fruits within 7–10 days without treatment. Apply preventive mancozeb or copper spray now.",
            "ඇන්ත්‍රැක්නෝස් ස්පෝරා තෙත් ස්ථානවල ප්‍රජනනය විය හැකිය. ප්‍රතිකාරයකින් තොරව දින 7–10 ඇතුළත ගෙඩිවල ජල-ලප ඇතිවිය හැකිය. Mancozeb හෝ තඹ ද්‍රාවණය දැන් ඉසීය යුතුය.",
        ),
        (Disease::Anthracnose, High) => LocalizedText::new(
            "Rapid fungal spread is expected. Fruit rot may appear within 3–5 days. Leaf blight could affect 30–50% of the canopy within a week if untreated. Begin treatment immediately.",
            "දිලීර ව්‍යාප්තිය ඉක්මනින් සිදු විය හැකිය. දින 3–5 ඇතුළත ගෙඩි කුණු වීම ආරම්භ විය හැකිය. දැන්ම ප්‍රතිකාරය ආරම්භ කිරීම ඉතා වැදගත්.",
        ),
        (Disease::Anthracnose, Critical) => LocalizedText::new(
            "Emergency: current weather is ideal for Colletotrichum infection cycles. Without emergency treatment, 50–80% crop loss within 2 weeks is possible. Contact DoA extension officer immediately.",
            "හදිසි තත්ත්වය: දිලීර ආසාදනයට වර්තමාන කාළගුණය ඉතා හිතකරය. හදිසි ප්‍රතිකාරයකින් තොරව සති 2 ඇතුළත අස්වැන්නෙන් 50–80% ක් හානි විය හැකිය. කෘෂිකර්ම නිලධාරියා හමු වන්න.",
        ),
        (Disease::Mosaic, Low) => LocalizedText::new(
            "Aphid vector activity is low. Disease spread is slow. Focus on removing infected plant material and eliminating weed hosts nearby.",
            "ඇෆිඩ් ක්‍රියාකාරීත්වය අඩුයි. රෝගය ස්ථාවරය. රෝගී ශාක ඉවත් කිරීම සහ වල් පැල පාලනය කරන්න.",
        ),
        (Disease::Mosaic, Medium) => LocalizedText::new(
            "Moderate aphid activity expected. Virus could spread to neighbouring plants within 1–2 weeks. Remove infected plants and apply reflective mulch now.",
            "ඇෆිඩ් ක්‍රියාකාරීත්වය සාමාන්‍ය. සති 1–2 ඇතුළත අසල ශාකවලට වයිරසය පැතිරිය හැකිය. රෝගී ශාක ඉවත් කර ආලෝකය පරාවර්තන ආවරණ (mulch) යොදන්න.",
        ),
        (Disease::Mosaic, High) => LocalizedText::new(
            "High aphid pressure expected. Rapid virus spread across the plantation within days. Remove all symptomatic plants immediately; there is no chemical cure for mosaic.",
            "ඇෆිඩ් ජනගහනය ඉහළ. වයිරසය ශීඝ්‍රයෙන් ව්‍යාප්ත වේ. රෝගී ශාක ඉවත් කිරීම ඉතා ඉක්මනින් කළ යුතුය.",
        ),
        (Disease::Mosaic, Critical) => LocalizedText::new(
            "Aphid populations are likely spiking. Uncontrolled spread could affect entire plantation rows within 2 weeks. Emergency vector control and immediate removal of infected plants required.",
            "ඇෆිඩ් ජනගහනය ඉතා ඉහළ. සති 2 ඇතුළත ශාක පේළිවලම රෝගය ව්‍යාප්ත විය හැකිය. රෝගී ශාක වහාම ඉවත් කරන්න.",
        ),
        (Disease::Mites, Low) => LocalizedText::new(
            "Mite population growth is slow under current conditions. Standard spray intervals are sufficient to keep colonies under control.",
            "මකුළු ජනගහනය ක්‍රමෙන් වෙනස් වේ. සාමාන්‍ය ශ්‍රේණිගත ඉසීම ප්‍රමාණවත්.",
        ),
        (Disease::Mites, Medium) => LocalizedText::new(
            "Mite colonies may double within 5–7 days under current warmth and low humidity. Apply neem oil or sulphur dust spray now to slow reproduction.",
            "දින 5–7 ඇතුළත මකුළු ජනගහනය දෙගුණ විය හැකිය. Neem oil හෝ Sulphur dust ඉසී ශාක ආරක්ෂා කරන්න.",
        ),
        (Disease::Mites, High) => LocalizedText::new(
            "Rapid mite population explosion expected within 3–4 days. Leaf bronzing and silvering will spread quickly. Apply abamectin immediately.",
            "දිනකි 3–4 ඇතුළත ශීඝ්‍ර ව්‍යාප්තිය. කොළ රතු-රන්වන් (bronzing) ලකුණු ඉශ්‍රීය ලෙස පැතිරේ. Abamectin ඉසීම දැනම ආරම්භ කරන්න.",
        ),
        (Disease::Mites, Critical) => LocalizedText::new(
            "Extreme mite outbreak conditions. Hot and dry weather allows populations to triple every 3 days. Defoliation of infested branches possible within 1 week without emergency action.",
            "අධිතීව්‍ර මකුළු (mite) අර්බුදය. සෑම දිනකට ජනගහනය 3 ගුණ වේ. සතියක් ඇතුළත ආසාදිත ශාඛාවල කොළ ගැලවී යාම සිදු විය හැකිය.",
        ),
        (Disease::LeafCurl, Low) => LocalizedText::new(
            "Whitefly and thrips activity is low. Minimal new infection risk. Continue monitoring and use yellow sticky traps.",
            "ශාකාහාරී ක්‍රියාකාරිත්වය අඩු. ශාක නිරීක්ෂණය සාමාන්‍ය ලෙස දිගටම කරගෙන යන්න.",
        ),
        (Disease::LeafCurl, Medium) => LocalizedText::new(
            "Moderate vector activity expected. New leaf curl infections may appear on young shoots within 1–2 weeks. Apply spinosad or imidacloprid preventively.",
            "සාමාන්‍ය ශාකාහාරී (whitefly/thrips) ක්‍රියාකාරිත්වය. සති 1–2 ඇතුළත නව කොළ ආසාදනය ඇතිවිය හැකිය. Spinosad හෝ Imidacloprid ඉසීම ආරම්භ කරන්න.",
        ),
        (Disease::LeafCurl, High) => LocalizedText::new(
            "High whitefly/thrips pressure expected. Rapid infection of new shoots within days. Begin immediate insecticide application and remove heavily infected plants.",
            "ශාකාහාරී ජනගහනය ඉහළ. නව ලිස (shoots) ශීඝ්‍රයෙන් ආසාදිත වේ. ක්ෂණිකව කෘමිනාශකය ඉසිය යුතුය.",
        ),
        (Disease::LeafCurl, Critical) => LocalizedText::new(
            "Severe vector outbreak conditions. Within 1–2 weeks, all new growth throughout the plantation may be infected. Emergency insecticide protocol required.",
            "ශාකාහාරී ජනගහනය ශීඝ්‍රයෙන් ඉහළ යයි. සති 1–2 ඇතුළත සියලු නව ලිස ආසාදිත විය හැකිය. හදිසි ක්‍රමෝපාය ක්‍රියාත්මක කළ යුතුය.",
        ),
    }
}

/// Fallback narrative for diseases without an outlook table
pub fn generic_outlook(level: RiskLevel) -> LocalizedText {
    match level {
        RiskLevel::Low => LocalizedText::new(
            "Monitor closely. Risk is LOW.",
            "නිරීක්ෂණය දිගටම කරගෙන යන්න. අවදානම: LOW.",
        ),
        RiskLevel::Medium => LocalizedText::new(
            "Monitor closely. Risk is MEDIUM.",
            "නිරීක්ෂණය දිගටම කරගෙන යන්න. අවදානම: MEDIUM.",
        ),
        RiskLevel::High => LocalizedText::new(
            "Monitor closely. Risk is HIGH.",
            "නිරීක්ෂණය දිගටම කරගෙන යන්න. අවදානම: HIGH.",
        ),
        RiskLevel::Critical => LocalizedText::new(
            "Monitor closely. Risk is CRITICAL.",
            "නිරීක්ෂණය දිගටම කරගෙන යන්න. අවදානම: CRITICAL.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn inputs(t: f64, rain: f64, h: f64) -> ExplanationInputs {
        ExplanationInputs {
            mean_temp_c: t,
            rain_7d_mm: rain,
            humidity_pct: h,
        }
    }

    #[test]
    fn outlook_is_total_over_known_pairs() {
        let mut seen = std::collections::HashSet::new();
        for disease in Disease::ALL {
            for level in RiskLevel::ALL {
                let text = outlook(Some(disease), level);
                assert!(!text.en.is_empty(), "{:?}/{:?}", disease, level);
                assert!(!text.si.is_empty(), "{:?}/{:?}", disease, level);
                assert!(seen.insert(text.en));
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn unknown_disease_outlook_names_level() {
        for level in RiskLevel::ALL {
            let text = outlook(None, level);
            assert!(text.en.starts_with("Monitor closely"));
            assert!(text.en.contains(level.as_str()));
        }
    }

    #[test]
    fn anthracnose_wet_week_factors_in_order() {
        let factors = risk_factors(
            Some(Disease::Anthracnose),
            Some(Severity::Mild),
            &inputs(27.0, 45.0, 82.0),
        );
        let kinds: Vec<_> = factors.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FactorKind::Rainfall, FactorKind::Humidity, FactorKind::Temperature]
        );
        assert!(factors[0].description.contains("45 mm"));
        assert!(factors.iter().all(|f| f.effect == FactorEffect::Increases));
    }

    #[test]
    fn mitigating_factors_are_marked() {
        let factors = risk_factors(Some(Disease::Mites), None, &inputs(22.0, 30.0, 85.0));
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].effect, FactorEffect::Decreases);
    }

    #[test]
    fn severity_adds_a_factor() {
        let factors = risk_factors(None, Some(Severity::Severe), &inputs(20.0, 0.0, 50.0));
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].kind, FactorKind::Severity);
    }

    #[test]
    fn fallback_sentence_names_scorer() {
        let e = explain(
            None,
            Some(Severity::Mild),
            &inputs(20.0, 0.0, 50.0),
            RiskLevel::Medium,
            ModelUsed::RuleBased,
        );
        assert!(e.factors.is_empty());
        assert!(e.why_this_risk.en.contains("rule-based scorer"));
        assert!(e.why_this_risk.en.contains("MEDIUM"));
        assert!(e.why_this_risk.si.contains("නීති-පාදක ක්‍රමය"));
        assert!(e.why_this_risk.si.contains("MEDIUM"));
    }

    #[test]
    fn ml_sentence_mentions_classifier() {
        let e = explain(
            Some(Disease::Mites),
            Some(Severity::Moderate),
            &inputs(32.0, 2.0, 50.0),
            RiskLevel::Critical,
            ModelUsed::Ml,
        );
        assert!(e
            .why_this_risk
            .en
            .starts_with("The ML model assessed CRITICAL risk because:"));
        assert!(e.why_this_risk.en.contains("Random Forest"));
        assert_eq!(e.factors.len(), 4);
    }

    #[test]
    fn why_sentence_is_bilingual() {
        let e = explain(
            Some(Disease::Mites),
            Some(Severity::Moderate),
            &inputs(32.0, 2.0, 50.0),
            RiskLevel::Critical,
            ModelUsed::Ml,
        );
        let why = &e.why_this_risk;
        assert!(!why.si.is_empty());
        assert_ne!(why.si, why.en);
        assert!(why.si.starts_with("ML ආකෘතිය CRITICAL අවදානම ශ්‍රේණිගත කළේ:"));
        assert!(why.si.contains("(2 mm)"));
        assert!(why.si.contains("(32.0 °C)"));
        assert!(why.si.contains("(50%)"));
        assert_eq!(why.get(Language::Si), why.si);
        assert_eq!(e.factors.iter().filter(|f| f.description_si.is_some()).count(), 4);
    }

    #[test]
    fn mitigating_only_factors_give_sinhala_fallback() {
        let e = explain(
            Some(Disease::Mites),
            None,
            &inputs(22.0, 30.0, 85.0),
            RiskLevel::Low,
            ModelUsed::RuleBased,
        );
        assert_eq!(e.factors.len(), 1);
        assert!(e.why_this_risk.en.contains("because:"));
        assert!(e.why_this_risk.si.contains("ඒකාබද්ධ කාළගුණ හා රෝග දත්ත"));
    }

    #[test]
    fn no_data_sentence_is_bilingual() {
        let e = no_data_explanation();
        assert!(e.why_this_risk.en.starts_with("No weather data"));
        assert!(e.why_this_risk.si.starts_with("කාළගුණ දත්ත නොමැති"));
    }
}
