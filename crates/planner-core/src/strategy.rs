//! Strategy configuration: the inputs a user fills in before generation.

use serde::{Deserialize, Serialize};

/// Maximum number of goals a strategy can target at once.
pub const MAX_GOALS: usize = 4;

/// Business goal a strategy is optimized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyGoal {
    BrandAwareness,
    LeadGeneration,
    CommunityBuilding,
    Sales,
    ThoughtLeadership,
    Engagement,
    WebsiteTraffic,
    CustomerRetention,
}

impl StrategyGoal {
    pub const ALL: [StrategyGoal; 8] = [
        StrategyGoal::BrandAwareness,
        StrategyGoal::LeadGeneration,
        StrategyGoal::CommunityBuilding,
        StrategyGoal::Sales,
        StrategyGoal::ThoughtLeadership,
        StrategyGoal::Engagement,
        StrategyGoal::WebsiteTraffic,
        StrategyGoal::CustomerRetention,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyGoal::BrandAwareness => "Brand Awareness",
            StrategyGoal::LeadGeneration => "Lead Generation",
            StrategyGoal::CommunityBuilding => "Community Building",
            StrategyGoal::Sales => "Sales & Conversions",
            StrategyGoal::ThoughtLeadership => "Thought Leadership",
            StrategyGoal::Engagement => "Audience Engagement",
            StrategyGoal::WebsiteTraffic => "Website Traffic",
            StrategyGoal::CustomerRetention => "Customer Retention",
        }
    }
}

/// Distribution platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    LinkedIn,
    Twitter,
    Facebook,
    Pinterest,
    Blog,
    Podcast,
    Newsletter,
}

impl Platform {
    pub const ALL: [Platform; 10] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::YouTube,
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::Facebook,
        Platform::Pinterest,
        Platform::Blog,
        Platform::Podcast,
        Platform::Newsletter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::YouTube => "YouTube",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "X / Twitter",
            Platform::Facebook => "Facebook",
            Platform::Pinterest => "Pinterest",
            Platform::Blog => "Blog",
            Platform::Podcast => "Podcast",
            Platform::Newsletter => "Newsletter",
        }
    }
}

impl Platform {
    /// Loose lookup from free text such as "Instagram Reels" or "x".
    pub fn from_name(name: &str) -> Option<Platform> {
        let lower = name.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower == "x" || lower.contains("twitter") {
            return Some(Platform::Twitter);
        }
        Platform::ALL
            .iter()
            .copied()
            .find(|p| lower.contains(&p.label().to_lowercase()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Content format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    ShortVideo,
    LongVideo,
    Carousel,
    BlogPost,
    Podcast,
    Newsletter,
    Infographic,
    LiveStream,
    Stories,
    CaseStudy,
}

impl ContentType {
    pub const ALL: [ContentType; 10] = [
        ContentType::ShortVideo,
        ContentType::LongVideo,
        ContentType::Carousel,
        ContentType::BlogPost,
        ContentType::Podcast,
        ContentType::Newsletter,
        ContentType::Infographic,
        ContentType::LiveStream,
        ContentType::Stories,
        ContentType::CaseStudy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::ShortVideo => "Short-form Video",
            ContentType::LongVideo => "Long-form Video",
            ContentType::Carousel => "Carousel",
            ContentType::BlogPost => "Blog Post",
            ContentType::Podcast => "Podcast Episode",
            ContentType::Newsletter => "Newsletter",
            ContentType::Infographic => "Infographic",
            ContentType::LiveStream => "Live Stream",
            ContentType::Stories => "Stories",
            ContentType::CaseStudy => "Case Study",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    OneMonth,
    #[default]
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::OneMonth,
        Timeframe::ThreeMonths,
        Timeframe::SixMonths,
        Timeframe::OneYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneMonth => "1 month",
            Timeframe::ThreeMonths => "3 months",
            Timeframe::SixMonths => "6 months",
            Timeframe::OneYear => "12 months",
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            Timeframe::OneMonth => 1,
            Timeframe::ThreeMonths => 3,
            Timeframe::SixMonths => 6,
            Timeframe::OneYear => 12,
        }
    }
}

/// Monthly content budget band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Budget {
    Bootstrap,
    #[default]
    Moderate,
    Growth,
    Enterprise,
}

impl Budget {
    pub const ALL: [Budget; 4] = [
        Budget::Bootstrap,
        Budget::Moderate,
        Budget::Growth,
        Budget::Enterprise,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Bootstrap => "Under $500/mo",
            Budget::Moderate => "$500-2,000/mo",
            Budget::Growth => "$2,000-10,000/mo",
            Budget::Enterprise => "$10,000+/mo",
        }
    }
}

/// Voice the generator writes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiPersona {
    #[default]
    Strategist,
    Creative,
    DataDriven,
    GrowthHacker,
    BrandStoryteller,
}

impl AiPersona {
    pub const ALL: [AiPersona; 5] = [
        AiPersona::Strategist,
        AiPersona::Creative,
        AiPersona::DataDriven,
        AiPersona::GrowthHacker,
        AiPersona::BrandStoryteller,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AiPersona::Strategist => "Strategist",
            AiPersona::Creative => "Creative Director",
            AiPersona::DataDriven => "Data Analyst",
            AiPersona::GrowthHacker => "Growth Hacker",
            AiPersona::BrandStoryteller => "Brand Storyteller",
        }
    }
}

/// Step to the next value in a fixed option list, wrapping around.
pub fn cycle_option<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    if len == 0 {
        return current;
    }
    let pos = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    options[next]
}

/// The user's generation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub niche: String,
    pub target_audience: String,
    #[serde(default)]
    pub goals: Vec<StrategyGoal>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub competitor_analysis: bool,
    #[serde(default)]
    pub ai_persona: AiPersona,
    #[serde(default)]
    pub industry_focus: String,
    #[serde(default)]
    pub geographic_focus: Vec<String>,
    #[serde(default)]
    pub language_preferences: Vec<String>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            niche: String::new(),
            target_audience: String::new(),
            goals: vec![StrategyGoal::BrandAwareness],
            platforms: vec![Platform::Instagram, Platform::LinkedIn],
            timeframe: Timeframe::default(),
            budget: Budget::default(),
            content_types: vec![ContentType::ShortVideo, ContentType::BlogPost],
            competitor_analysis: true,
            ai_persona: AiPersona::default(),
            industry_focus: String::new(),
            geographic_focus: vec!["Global".to_string()],
            language_preferences: vec!["English".to_string()],
        }
    }
}

impl StrategyConfig {
    /// Generation is allowed once both niche and audience are filled in.
    pub fn can_generate(&self) -> bool {
        !self.niche.trim().is_empty() && !self.target_audience.trim().is_empty()
    }

    /// Names of the required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.niche.trim().is_empty() {
            missing.push("niche");
        }
        if self.target_audience.trim().is_empty() {
            missing.push("target audience");
        }
        missing
    }

    /// Toggle a goal. Adding is a no-op once [`MAX_GOALS`] are selected.
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle_goal(&mut self, goal: StrategyGoal) -> bool {
        if let Some(pos) = self.goals.iter().position(|g| *g == goal) {
            self.goals.remove(pos);
            return true;
        }
        if self.goals.len() >= MAX_GOALS {
            return false;
        }
        self.goals.push(goal);
        true
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        toggle(&mut self.platforms, platform);
    }

    pub fn toggle_content_type(&mut self, content_type: ContentType) {
        toggle(&mut self.content_types, content_type);
    }

    pub fn has_goal(&self, goal: StrategyGoal) -> bool {
        self.goals.contains(&goal)
    }

    /// Short one-line description used in exports and headers.
    pub fn summary_line(&self) -> String {
        let niche = if self.niche.trim().is_empty() {
            "(no niche)"
        } else {
            self.niche.trim()
        };
        format!(
            "{} for {} over {}",
            niche,
            self.target_audience.trim(),
            self.timeframe.label()
        )
    }
}

fn toggle<T: PartialEq>(list: &mut Vec<T>, value: T) {
    if let Some(pos) = list.iter().position(|v| *v == value) {
        list.remove(pos);
    } else {
        list.push(value);
    }
}

/// A partial configuration; `None` fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<StrategyGoal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Platform>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_types: Option<Vec<ContentType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_analysis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_persona: Option<AiPersona>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_focus: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_preferences: Option<Vec<String>>,
}

impl StrategyConfigPatch {
    /// Merge this patch into `config`.
    ///
    /// Goal lists longer than [`MAX_GOALS`] are truncated so a patch can
    /// never break the selection cap.
    pub fn apply_to(&self, config: &mut StrategyConfig) {
        if let Some(niche) = &self.niche {
            config.niche = niche.clone();
        }
        if let Some(audience) = &self.target_audience {
            config.target_audience = audience.clone();
        }
        if let Some(goals) = &self.goals {
            config.goals = goals.iter().copied().take(MAX_GOALS).collect();
        }
        if let Some(platforms) = &self.platforms {
            config.platforms = platforms.clone();
        }
        if let Some(timeframe) = self.timeframe {
            config.timeframe = timeframe;
        }
        if let Some(budget) = self.budget {
            config.budget = budget;
        }
        if let Some(content_types) = &self.content_types {
            config.content_types = content_types.clone();
        }
        if let Some(competitor_analysis) = self.competitor_analysis {
            config.competitor_analysis = competitor_analysis;
        }
        if let Some(persona) = self.ai_persona {
            config.ai_persona = persona;
        }
        if let Some(industry) = &self.industry_focus {
            config.industry_focus = industry.clone();
        }
        if let Some(geo) = &self.geographic_focus {
            config.geographic_focus = geo.clone();
        }
        if let Some(languages) = &self.language_preferences {
            config.language_preferences = languages.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_cannot_generate() {
        let config = StrategyConfig::default();
        assert!(!config.can_generate());
        assert_eq!(config.missing_fields(), vec!["niche", "target audience"]);
    }

    #[test]
    fn test_whitespace_only_fields_cannot_generate() {
        let config = StrategyConfig {
            niche: "   ".to_string(),
            target_audience: "founders".to_string(),
            ..Default::default()
        };
        assert!(!config.can_generate());
        assert_eq!(config.missing_fields(), vec!["niche"]);
    }

    #[test]
    fn test_filled_config_can_generate() {
        let config = StrategyConfig {
            niche: "Plant-based cooking".to_string(),
            target_audience: "Busy parents".to_string(),
            ..Default::default()
        };
        assert!(config.can_generate());
        assert!(config.missing_fields().is_empty());
    }

    #[test]
    fn test_toggle_goal_caps_at_four() {
        let mut config = StrategyConfig {
            goals: Vec::new(),
            ..Default::default()
        };
        for goal in StrategyGoal::ALL.iter().take(4) {
            assert!(config.toggle_goal(*goal));
        }
        assert_eq!(config.goals.len(), MAX_GOALS);

        assert!(!config.toggle_goal(StrategyGoal::WebsiteTraffic));
        assert_eq!(config.goals.len(), MAX_GOALS);
        assert!(!config.has_goal(StrategyGoal::WebsiteTraffic));
    }

    #[test]
    fn test_toggle_goal_removes_selected() {
        let mut config = StrategyConfig::default();
        assert!(config.has_goal(StrategyGoal::BrandAwareness));
        assert!(config.toggle_goal(StrategyGoal::BrandAwareness));
        assert!(!config.has_goal(StrategyGoal::BrandAwareness));
    }

    #[test]
    fn test_toggle_platform() {
        let mut config = StrategyConfig::default();
        config.toggle_platform(Platform::TikTok);
        assert!(config.platforms.contains(&Platform::TikTok));
        config.toggle_platform(Platform::TikTok);
        assert!(!config.platforms.contains(&Platform::TikTok));
    }

    #[test]
    fn test_platform_from_name() {
        assert_eq!(Platform::from_name("Instagram Reels"), Some(Platform::Instagram));
        assert_eq!(Platform::from_name("X"), Some(Platform::Twitter));
        assert_eq!(Platform::from_name("linkedin"), Some(Platform::LinkedIn));
        assert_eq!(Platform::from_name("Mastodon"), None);
    }

    #[test]
    fn test_cycle_option_wraps() {
        assert_eq!(
            cycle_option(&Timeframe::ALL, Timeframe::OneYear, true),
            Timeframe::OneMonth
        );
        assert_eq!(
            cycle_option(&Timeframe::ALL, Timeframe::OneMonth, false),
            Timeframe::OneYear
        );
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut config = StrategyConfig {
            niche: "Fitness".to_string(),
            target_audience: "Runners".to_string(),
            ..Default::default()
        };
        let patch = StrategyConfigPatch {
            niche: Some("Trail running".to_string()),
            budget: Some(Budget::Growth),
            ..Default::default()
        };
        patch.apply_to(&mut config);

        assert_eq!(config.niche, "Trail running");
        assert_eq!(config.target_audience, "Runners");
        assert_eq!(config.budget, Budget::Growth);
    }

    #[test]
    fn test_patch_truncates_goals() {
        let mut config = StrategyConfig::default();
        let patch = StrategyConfigPatch {
            goals: Some(StrategyGoal::ALL.to_vec()),
            ..Default::default()
        };
        patch.apply_to(&mut config);
        assert_eq!(config.goals.len(), MAX_GOALS);
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let config = StrategyConfig {
            niche: "SaaS".to_string(),
            target_audience: "CTOs".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["targetAudience"], "CTOs");
        assert_eq!(json["timeframe"], "three-months");
        assert!(json.get("aiPersona").is_some());
    }

    #[test]
    fn test_empty_patch() {
        assert!(StrategyConfigPatch::default().is_empty());
    }
}
