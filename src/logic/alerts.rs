use crate::models::{Action, AlertColor, LocalizedText, RiskLevel};
use serde::Serialize;

/// What a grower should do at a given risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionGuide {
    pub alert_color: AlertColor,
    pub action: Action,
    pub urgency: LocalizedText,
    pub monitoring_frequency: LocalizedText,
}

pub fn action_guide(level: RiskLevel) -> ActionGuide {
    match level {
        RiskLevel::Low => ActionGuide {
            alert_color: AlertColor::Green,
            action: Action::RoutineMonitoring,
            urgency: LocalizedText::new(
                "Low urgency — continue regular farm inspection.",
                "අඩු හදිසියාව — සාමාන්‍ය ගොවිතැන් පරීක්ෂාව දිගටම කරගෙන යන්න.",
            ),
            monitoring_frequency: LocalizedText::new(
                "Check plants every 7 days.",
                "දින 7 කට වරක් ශාක පරීක්ෂා කරන්න.",
            ),
        },
        RiskLevel::Medium => ActionGuide {
            alert_color: AlertColor::Yellow,
            action: Action::PreventiveSpray,
            urgency: LocalizedText::new(
                "Moderate urgency — apply preventive treatment within 3–5 days.",
                "මධ්‍යම හදිසියාව — දින 3–5 ඇතුළත වැළකීමේ ප්‍රතිකාරය ආරම්භ කරන්න.",
            ),
            monitoring_frequency: LocalizedText::new(
                "Increase inspection to every 3–4 days.",
                "දින 3–4 කට වරක් ශාක පරීක්ෂා කරන්න.",
            ),
        },
        RiskLevel::High => ActionGuide {
            alert_color: AlertColor::Orange,
            action: Action::ImmediateTreatment,
            urgency: LocalizedText::new(
                "High urgency — begin treatment within 24–48 hours.",
                "ඉහළ හදිසියාව — පැය 24–48 ඇතුළත ප්‍රතිකාරය ආරම්භ කරන්න.",
            ),
            monitoring_frequency: LocalizedText::new(
                "Daily monitoring required.",
                "දෛනිකව නිරීක්ෂණය අවශ්‍යයි.",
            ),
        },
        RiskLevel::Critical => ActionGuide {
            alert_color: AlertColor::Red,
            action: Action::EmergencyIntervention,
            urgency: LocalizedText::new(
                "CRITICAL — contact your nearest DoA extension officer immediately. \
                 Emergency treatment and potentially quarantine of affected area needed.",
                "හදිසි තත්ත්වය — ළඟම කෘෂිකර්ම සම්ප්‍රසාරණ නිලධාරියා හමු වන්න. \
                 හදිසි ප්‍රතිකාරය සහ ප්‍රදේශ හුදෙකලා කිරීම අවශ්‍ය විය හැකිය.",
            ),
            monitoring_frequency: LocalizedText::new(
                "Twice-daily monitoring. Do not delay.",
                "දිනකට දෙවරක් නිරීක්ෂණය කරන්න. ප්‍රමාද නොකරන්න.",
            ),
        },
    }
}

/// Guide used when no forecast was available: MEDIUM handling with
/// no-data wording.
pub fn no_data_guide() -> ActionGuide {
    ActionGuide {
        urgency: LocalizedText::new(
            "No weather data available. Apply standard preventive measures.",
            "කාළගුණ දත්ත නොමැත. සාමාන්‍ය වැළකීමේ ක්‍රමවේද යොදන්න.",
        ),
        monitoring_frequency: LocalizedText::new("Every 3–5 days", "දින 3–5 කට වරක්"),
        ..action_guide(RiskLevel::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_guide() {
        for level in RiskLevel::ALL {
            let guide = action_guide(level);
            assert!(!guide.alert_color.as_str().is_empty());
            assert!(!guide.action.as_str().is_empty());
            assert!(!guide.urgency.en.is_empty());
            assert!(!guide.urgency.si.is_empty());
            assert!(!guide.monitoring_frequency.en.is_empty());
        }
    }

    #[test]
    fn colors_escalate_with_level() {
        assert_eq!(action_guide(RiskLevel::Low).alert_color, AlertColor::Green);
        assert_eq!(action_guide(RiskLevel::Medium).alert_color, AlertColor::Yellow);
        assert_eq!(action_guide(RiskLevel::High).alert_color, AlertColor::Orange);
        assert_eq!(action_guide(RiskLevel::Critical).alert_color, AlertColor::Red);
    }

    #[test]
    fn actions_match_levels() {
        assert_eq!(action_guide(RiskLevel::Low).action, Action::RoutineMonitoring);
        assert_eq!(action_guide(RiskLevel::Medium).action, Action::PreventiveSpray);
        assert_eq!(action_guide(RiskLevel::High).action, Action::ImmediateTreatment);
        assert_eq!(
            action_guide(RiskLevel::Critical).action,
            Action::EmergencyIntervention
        );
    }

    #[test]
    fn no_data_guide_is_medium_preventive() {
        let guide = no_data_guide();
        assert_eq!(guide.alert_color, AlertColor::Yellow);
        assert_eq!(guide.action, Action::PreventiveSpray);
        assert!(guide.urgency.en.starts_with("No weather data"));
    }
}
