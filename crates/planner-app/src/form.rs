//! Strategy form: field focus and edits applied to a [`StrategyConfig`].

use planner_core::strategy::cycle_option;
use planner_core::{AiPersona, Budget, ContentType, Platform, StrategyConfig, StrategyGoal, Timeframe};

pub const REGIONS: &[&str] = &[
    "Global",
    "North America",
    "Europe",
    "Asia Pacific",
    "Latin America",
    "Middle East & Africa",
];

pub const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Portuguese",
    "Japanese",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultiSelect,
    Choice,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Niche,
    TargetAudience,
    Goals,
    Platforms,
    ContentTypes,
    Timeframe,
    Budget,
    AiPersona,
    CompetitorAnalysis,
    IndustryFocus,
    GeographicFocus,
    LanguagePreferences,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Niche,
        FormField::TargetAudience,
        FormField::Goals,
        FormField::Platforms,
        FormField::ContentTypes,
        FormField::Timeframe,
        FormField::Budget,
        FormField::AiPersona,
        FormField::CompetitorAnalysis,
        FormField::IndustryFocus,
        FormField::GeographicFocus,
        FormField::LanguagePreferences,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Niche => "Niche",
            FormField::TargetAudience => "Target audience",
            FormField::Goals => "Goals",
            FormField::Platforms => "Platforms",
            FormField::ContentTypes => "Content types",
            FormField::Timeframe => "Timeframe",
            FormField::Budget => "Budget",
            FormField::AiPersona => "AI persona",
            FormField::CompetitorAnalysis => "Competitor analysis",
            FormField::IndustryFocus => "Industry focus",
            FormField::GeographicFocus => "Regions",
            FormField::LanguagePreferences => "Languages",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::Niche | FormField::TargetAudience | FormField::IndustryFocus => FieldKind::Text,
            FormField::Goals
            | FormField::Platforms
            | FormField::ContentTypes
            | FormField::GeographicFocus
            | FormField::LanguagePreferences => FieldKind::MultiSelect,
            FormField::Timeframe | FormField::Budget | FormField::AiPersona => FieldKind::Choice,
            FormField::CompetitorAnalysis => FieldKind::Toggle,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FormField::Niche | FormField::TargetAudience)
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> FormField {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> FormField {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Labels of the selectable options, empty for text and toggle fields.
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            FormField::Goals => StrategyGoal::ALL.iter().map(|g| g.label()).collect(),
            FormField::Platforms => Platform::ALL.iter().map(|p| p.label()).collect(),
            FormField::ContentTypes => ContentType::ALL.iter().map(|c| c.label()).collect(),
            FormField::Timeframe => Timeframe::ALL.iter().map(|t| t.label()).collect(),
            FormField::Budget => Budget::ALL.iter().map(|b| b.label()).collect(),
            FormField::AiPersona => AiPersona::ALL.iter().map(|p| p.label()).collect(),
            FormField::GeographicFocus => REGIONS.to_vec(),
            FormField::LanguagePreferences => LANGUAGES.to_vec(),
            _ => Vec::new(),
        }
    }

    /// Whether option `index` is currently selected in `config`.
    pub fn is_selected(&self, config: &StrategyConfig, index: usize) -> bool {
        match self {
            FormField::Goals => StrategyGoal::ALL.get(index).is_some_and(|g| config.has_goal(*g)),
            FormField::Platforms => Platform::ALL
                .get(index)
                .is_some_and(|p| config.platforms.contains(p)),
            FormField::ContentTypes => ContentType::ALL
                .get(index)
                .is_some_and(|c| config.content_types.contains(c)),
            FormField::Timeframe => Timeframe::ALL.get(index) == Some(&config.timeframe),
            FormField::Budget => Budget::ALL.get(index) == Some(&config.budget),
            FormField::AiPersona => AiPersona::ALL.get(index) == Some(&config.ai_persona),
            FormField::GeographicFocus => REGIONS
                .get(index)
                .is_some_and(|r| config.geographic_focus.iter().any(|g| g == r)),
            FormField::LanguagePreferences => LANGUAGES
                .get(index)
                .is_some_and(|l| config.language_preferences.iter().any(|g| g == l)),
            _ => false,
        }
    }

    /// Current value as a single line.
    pub fn display_value(&self, config: &StrategyConfig) -> String {
        match self {
            FormField::Niche => config.niche.clone(),
            FormField::TargetAudience => config.target_audience.clone(),
            FormField::IndustryFocus => config.industry_focus.clone(),
            FormField::CompetitorAnalysis => if config.competitor_analysis { "On" } else { "Off" }.to_string(),
            FormField::GeographicFocus => config.geographic_focus.join(", "),
            FormField::LanguagePreferences => config.language_preferences.join(", "),
            other => {
                let options = other.options();
                (0..options.len())
                    .filter(|i| other.is_selected(config, *i))
                    .map(|i| options[i])
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }

    fn text_mut<'a>(&self, config: &'a mut StrategyConfig) -> Option<&'a mut String> {
        match self {
            FormField::Niche => Some(&mut config.niche),
            FormField::TargetAudience => Some(&mut config.target_audience),
            FormField::IndustryFocus => Some(&mut config.industry_focus),
            _ => None,
        }
    }

    /// Append to a text field. Returns `false` for non-text fields.
    pub fn push_char(&self, config: &mut StrategyConfig, c: char) -> bool {
        match self.text_mut(config) {
            Some(text) => {
                text.push(c);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&self, config: &mut StrategyConfig) -> bool {
        self.text_mut(config).is_some_and(|text| text.pop().is_some())
    }

    pub fn clear(&self, config: &mut StrategyConfig) -> bool {
        match self.text_mut(config) {
            Some(text) if !text.is_empty() => {
                text.clear();
                true
            }
            _ => false,
        }
    }

    /// Toggle option `index` of a multi-select, or flip a toggle field.
    ///
    /// Returns `false` when nothing changed, which for goals means the cap
    /// was reached.
    pub fn toggle_option(&self, config: &mut StrategyConfig, index: usize) -> bool {
        match self {
            FormField::Goals => StrategyGoal::ALL
                .get(index)
                .is_some_and(|g| config.toggle_goal(*g)),
            FormField::Platforms => match Platform::ALL.get(index) {
                Some(p) => {
                    config.toggle_platform(*p);
                    true
                }
                None => false,
            },
            FormField::ContentTypes => match ContentType::ALL.get(index) {
                Some(c) => {
                    config.toggle_content_type(*c);
                    true
                }
                None => false,
            },
            FormField::GeographicFocus => REGIONS
                .get(index)
                .is_some_and(|r| toggle_label(&mut config.geographic_focus, r)),
            FormField::LanguagePreferences => LANGUAGES
                .get(index)
                .is_some_and(|l| toggle_label(&mut config.language_preferences, l)),
            FormField::CompetitorAnalysis => {
                config.competitor_analysis = !config.competitor_analysis;
                true
            }
            _ => false,
        }
    }

    /// Step a single-choice field to its next or previous value.
    pub fn cycle(&self, config: &mut StrategyConfig, forward: bool) -> bool {
        match self {
            FormField::Timeframe => {
                config.timeframe = cycle_option(&Timeframe::ALL, config.timeframe, forward);
                true
            }
            FormField::Budget => {
                config.budget = cycle_option(&Budget::ALL, config.budget, forward);
                true
            }
            FormField::AiPersona => {
                config.ai_persona = cycle_option(&AiPersona::ALL, config.ai_persona, forward);
                true
            }
            _ => false,
        }
    }
}

fn toggle_label(list: &mut Vec<String>, label: &str) -> bool {
    if let Some(pos) = list.iter().position(|v| v == label) {
        list.remove(pos);
    } else {
        list.push(label.to_string());
    }
    true
}

/// Which field has focus, and the highlighted option inside a multi-select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormState {
    pub focus: FormField,
    pub option_cursor: usize,
}

impl FormState {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.option_cursor = 0;
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.option_cursor = 0;
    }

    pub fn move_option(&mut self, forward: bool) {
        let len = self.focus.options().len();
        if len == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % len
        } else {
            (self.option_cursor + len - 1) % len
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        let mut form = FormState::default();
        form.focus_previous();
        assert_eq!(form.focus, FormField::LanguagePreferences);
        form.focus_next();
        assert_eq!(form.focus, FormField::Niche);
    }

    #[test]
    fn test_text_editing() {
        let mut config = StrategyConfig::default();
        assert!(FormField::Niche.push_char(&mut config, 'a'));
        assert!(FormField::Niche.push_char(&mut config, 'b'));
        assert!(FormField::Niche.backspace(&mut config));
        assert_eq!(config.niche, "a");
        assert!(!FormField::Goals.push_char(&mut config, 'x'));
        assert!(FormField::Niche.clear(&mut config));
        assert!(!FormField::Niche.clear(&mut config));
    }

    #[test]
    fn test_goal_toggle_respects_cap() {
        let mut config = StrategyConfig {
            goals: Vec::new(),
            ..Default::default()
        };
        for i in 0..4 {
            assert!(FormField::Goals.toggle_option(&mut config, i));
        }
        assert!(!FormField::Goals.toggle_option(&mut config, 4));
        assert_eq!(config.goals.len(), 4);
        // removing still works at the cap
        assert!(FormField::Goals.toggle_option(&mut config, 0));
        assert_eq!(config.goals.len(), 3);
    }

    #[test]
    fn test_region_toggle_and_display() {
        let mut config = StrategyConfig::default();
        FormField::GeographicFocus.toggle_option(&mut config, 2);
        assert_eq!(FormField::GeographicFocus.display_value(&config), "Global, Europe");
        assert!(FormField::GeographicFocus.is_selected(&config, 2));
        FormField::GeographicFocus.toggle_option(&mut config, 0);
        assert_eq!(config.geographic_focus, vec!["Europe"]);
    }

    #[test]
    fn test_cycle_choice() {
        let mut config = StrategyConfig::default();
        let before = config.budget;
        assert!(FormField::Budget.cycle(&mut config, true));
        assert_ne!(config.budget, before);
        assert!(FormField::Budget.cycle(&mut config, false));
        assert_eq!(config.budget, before);
        assert!(!FormField::Niche.cycle(&mut config, true));
    }

    #[test]
    fn test_option_cursor_wraps_within_field() {
        let mut form = FormState {
            focus: FormField::LanguagePreferences,
            option_cursor: 0,
        };
        form.move_option(false);
        assert_eq!(form.option_cursor, LANGUAGES.len() - 1);
        form.focus_next();
        assert_eq!(form.option_cursor, 0);
    }
}
