//! Static strategy template catalog.
//!
//! The gallery entries and their configurations are two parallel tables
//! keyed by template id: [`TEMPLATES`] describes what the gallery shows,
//! [`template_config`] returns what applying a template changes.

use serde::Serialize;

use crate::strategy::{
    AiPersona, Budget, ContentType, Platform, StrategyConfigPatch, StrategyGoal, Timeframe,
};

/// Subscription tier a template (or feature) requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateTier {
    Free,
    Premium,
    Ultimate,
}

impl TemplateTier {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateTier::Free => "Free",
            TemplateTier::Premium => "Premium",
            TemplateTier::Ultimate => "Ultimate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    pub posting_frequency: &'static str,
    pub content_mix: &'static str,
    pub automation_level: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub pillars: &'static [&'static str],
    pub platforms: &'static [Platform],
    pub advanced: AdvancedSettings,
    pub tier: TemplateTier,
}

impl StrategyTemplate {
    pub fn is_premium(&self) -> bool {
        self.tier >= TemplateTier::Premium
    }

    pub fn is_ultimate(&self) -> bool {
        self.tier == TemplateTier::Ultimate
    }

    /// Case-insensitive match on name, description, category or pillars.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
            || self.category.to_lowercase().contains(&q)
            || self.pillars.iter().any(|p| p.to_lowercase().contains(&q))
    }
}

const fn adv(
    posting_frequency: &'static str,
    content_mix: &'static str,
    automation_level: &'static str,
) -> AdvancedSettings {
    AdvancedSettings {
        posting_frequency,
        content_mix,
        automation_level,
    }
}

use Platform::*;
use TemplateTier::*;

pub const TEMPLATES: &[StrategyTemplate] = &[
    // ── Free ──────────────────────────────────────────────────────
    StrategyTemplate {
        id: "small-business-starter",
        name: "Small Business Starter",
        description: "Build local awareness with a simple, sustainable posting rhythm.",
        category: "Business",
        pillars: &["Behind the Scenes", "Customer Stories", "Offers"],
        platforms: &[Instagram, Facebook],
        advanced: adv("3x per week", "60% value / 40% promo", "Low"),
        tier: Free,
    },
    StrategyTemplate {
        id: "personal-brand",
        name: "Personal Brand Builder",
        description: "Grow a recognizable voice around your expertise.",
        category: "Personal Brand",
        pillars: &["Expertise", "Story", "Opinions"],
        platforms: &[LinkedIn, Twitter],
        advanced: adv("Daily", "70% insight / 30% personal", "Low"),
        tier: Free,
    },
    StrategyTemplate {
        id: "blog-seo-basics",
        name: "Blog & SEO Basics",
        description: "Search-driven articles that compound traffic over time.",
        category: "SEO",
        pillars: &["How-to Guides", "Comparisons", "Glossary"],
        platforms: &[Blog, Newsletter],
        advanced: adv("2 articles per week", "80% evergreen / 20% timely", "Low"),
        tier: Free,
    },
    StrategyTemplate {
        id: "local-restaurant",
        name: "Local Restaurant",
        description: "Fill tables with menu highlights and community moments.",
        category: "Food & Beverage",
        pillars: &["Menu Highlights", "Kitchen Stories", "Events"],
        platforms: &[Instagram, TikTok, Facebook],
        advanced: adv("5x per week", "Visual first", "Low"),
        tier: Free,
    },
    StrategyTemplate {
        id: "fitness-coach",
        name: "Fitness Coach",
        description: "Attract clients with workouts, transformations and tips.",
        category: "Health & Fitness",
        pillars: &["Workouts", "Nutrition", "Transformations"],
        platforms: &[Instagram, YouTube],
        advanced: adv("Daily stories, 3 reels per week", "Education heavy", "Low"),
        tier: Free,
    },
    StrategyTemplate {
        id: "nonprofit-awareness",
        name: "Nonprofit Awareness",
        description: "Turn supporters into advocates with impact storytelling.",
        category: "Nonprofit",
        pillars: &["Impact Stories", "Volunteer Spotlights", "Calls to Action"],
        platforms: &[Facebook, Instagram, Newsletter],
        advanced: adv("3x per week", "Story driven", "Low"),
        tier: Free,
    },
    StrategyTemplate {
        id: "podcast-launch",
        name: "Podcast Launch",
        description: "Launch a show and grow listeners with clips and guests.",
        category: "Media",
        pillars: &["Episode Clips", "Guest Features", "Listener Q&A"],
        platforms: &[Podcast, YouTube, Instagram],
        advanced: adv("Weekly episode, daily clips", "Repurpose first", "Medium"),
        tier: Free,
    },
    StrategyTemplate {
        id: "newsletter-growth",
        name: "Newsletter Growth",
        description: "Grow subscribers with a lead magnet and social teasers.",
        category: "Email",
        pillars: &["Curated Picks", "Original Essays", "Teasers"],
        platforms: &[Newsletter, Twitter, LinkedIn],
        advanced: adv("Weekly issue", "Depth over breadth", "Low"),
        tier: Free,
    },
    // ── Premium ───────────────────────────────────────────────────
    StrategyTemplate {
        id: "ecommerce-growth",
        name: "E-commerce Growth Engine",
        description: "Drive product discovery and repeat purchases across channels.",
        category: "E-commerce",
        pillars: &["Product Education", "UGC", "Launches", "Retention"],
        platforms: &[Instagram, TikTok, Pinterest, Newsletter],
        advanced: adv("Daily", "40% product / 40% UGC / 20% promo", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "saas-thought-leadership",
        name: "SaaS Thought Leadership",
        description: "Earn trust with buyers through research and point of view.",
        category: "B2B SaaS",
        pillars: &["Industry Research", "Product Vision", "Customer Outcomes"],
        platforms: &[LinkedIn, Blog, Newsletter, Podcast],
        advanced: adv("4x per week", "Insight led", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "b2b-lead-gen",
        name: "B2B Lead Generation",
        description: "Convert attention into pipeline with gated assets and webinars.",
        category: "B2B",
        pillars: &["Pain Points", "Case Studies", "Webinars"],
        platforms: &[LinkedIn, Blog, YouTube],
        advanced: adv("5x per week", "Funnel mapped", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "creator-monetization",
        name: "Creator Monetization",
        description: "Turn an engaged audience into products, sponsors and members.",
        category: "Creator Economy",
        pillars: &["Signature Series", "Community", "Offers"],
        platforms: &[YouTube, Instagram, TikTok, Newsletter],
        advanced: adv("Daily short, weekly long", "Entertain then convert", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "course-launch",
        name: "Online Course Launch",
        description: "Pre-sell a course with a waitlist and launch sequence.",
        category: "Education",
        pillars: &["Free Lessons", "Student Wins", "Launch Content"],
        platforms: &[YouTube, Instagram, Newsletter],
        advanced: adv("Launch sprint", "Teach to sell", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "real-estate-agent",
        name: "Real Estate Agent",
        description: "Own your local market with listings, tours and market updates.",
        category: "Real Estate",
        pillars: &["Listings", "Neighborhood Guides", "Market Updates"],
        platforms: &[Instagram, YouTube, Facebook],
        advanced: adv("4x per week", "Local authority", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "wellness-brand",
        name: "Wellness Brand",
        description: "Grow a mindful community with rituals and expert voices.",
        category: "Wellness",
        pillars: &["Rituals", "Expert Advice", "Community Stories"],
        platforms: &[Instagram, Pinterest, Podcast],
        advanced: adv("Daily", "Calm and consistent", "Medium"),
        tier: Premium,
    },
    StrategyTemplate {
        id: "agency-portfolio",
        name: "Agency Portfolio",
        description: "Win clients by showing process and results.",
        category: "Agency",
        pillars: &["Case Studies", "Process", "Team Culture"],
        platforms: &[LinkedIn, Instagram, Blog],
        advanced: adv("3x per week", "Proof driven", "Medium"),
        tier: Premium,
    },
    // ── Ultimate ──────────────────────────────────────────────────
    StrategyTemplate {
        id: "ultimate-omnichannel",
        name: "Omnichannel Domination",
        description: "Coordinated campaigns across every major channel.",
        category: "Enterprise",
        pillars: &["Flagship Campaigns", "Always-on Social", "Owned Media", "Partnerships"],
        platforms: &[Instagram, TikTok, YouTube, LinkedIn, Twitter, Newsletter],
        advanced: adv("Multiple daily", "Campaign calendar", "High"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-viral-growth",
        name: "Viral Growth Playbook",
        description: "Engineer shareable formats and ride trends fast.",
        category: "Growth",
        pillars: &["Trend Jacking", "Challenges", "Collabs"],
        platforms: &[TikTok, Instagram, YouTube],
        advanced: adv("3x daily", "Experiment heavy", "High"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-enterprise-brand",
        name: "Enterprise Brand System",
        description: "Governed brand voice across regions and business units.",
        category: "Enterprise",
        pillars: &["Brand Narrative", "Executive Voices", "Regional Content"],
        platforms: &[LinkedIn, YouTube, Blog, Newsletter],
        advanced: adv("Daily per region", "Governed", "High"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-product-launch",
        name: "Product Launch War Room",
        description: "A 90-day launch plan from teaser to scale.",
        category: "Product",
        pillars: &["Teasers", "Launch Day", "Social Proof", "Scale"],
        platforms: &[Twitter, LinkedIn, YouTube, Instagram],
        advanced: adv("Phase based", "Launch mapped", "High"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-community-flywheel",
        name: "Community Flywheel",
        description: "Turn members into creators and advocates.",
        category: "Community",
        pillars: &["Member Spotlights", "Events", "Co-created Content"],
        platforms: &[Instagram, YouTube, Podcast, Newsletter],
        advanced: adv("Daily", "Member generated", "High"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-ai-content-factory",
        name: "AI Content Factory",
        description: "Scale output with AI-assisted repurposing pipelines.",
        category: "Automation",
        pillars: &["Pillar Content", "Repurposed Clips", "Personalized Emails"],
        platforms: &[YouTube, TikTok, LinkedIn, Blog, Newsletter],
        advanced: adv("5x daily", "Repurpose everything", "Very high"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-global-expansion",
        name: "Global Expansion",
        description: "Localize content for new markets and languages.",
        category: "International",
        pillars: &["Localized Stories", "Market Education", "Local Partners"],
        platforms: &[Instagram, Facebook, YouTube, LinkedIn],
        advanced: adv("Daily per market", "Localized", "High"),
        tier: Ultimate,
    },
    StrategyTemplate {
        id: "ultimate-investor-relations",
        name: "Investor & Executive Presence",
        description: "Build credibility with investors, press and talent.",
        category: "Corporate",
        pillars: &["Vision", "Milestones", "Leadership POV"],
        platforms: &[LinkedIn, Twitter, Podcast, Blog],
        advanced: adv("3x per week", "Executive led", "High"),
        tier: Ultimate,
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static StrategyTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates visible in the gallery for a tier filter and search query.
pub fn filter_templates(tier: Option<TemplateTier>, query: &str) -> Vec<&'static StrategyTemplate> {
    TEMPLATES
        .iter()
        .filter(|t| tier.map_or(true, |tier| t.tier == tier))
        .filter(|t| t.matches(query))
        .collect()
}

struct TemplateConfig {
    niche: &'static str,
    audience: &'static str,
    goals: &'static [StrategyGoal],
    content_types: &'static [ContentType],
    timeframe: Timeframe,
    budget: Budget,
    persona: AiPersona,
    industry: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    niche: &'static str,
    audience: &'static str,
    goals: &'static [StrategyGoal],
    content_types: &'static [ContentType],
    timeframe: Timeframe,
    budget: Budget,
    persona: AiPersona,
    industry: &'static str,
) -> TemplateConfig {
    TemplateConfig {
        niche,
        audience,
        goals,
        content_types,
        timeframe,
        budget,
        persona,
        industry,
    }
}

fn config_entry(id: &str) -> Option<TemplateConfig> {
    use AiPersona as P;
    use Budget as B;
    use ContentType as C;
    use StrategyGoal as G;
    use Timeframe as T;

    let config = match id {
        "small-business-starter" => entry(
            "Local small business",
            "Nearby customers aged 25-55",
            &[G::BrandAwareness, G::Sales],
            &[C::Carousel, C::Stories],
            T::ThreeMonths,
            B::Bootstrap,
            P::Strategist,
            "Retail",
        ),
        "personal-brand" => entry(
            "Professional expertise",
            "Peers, recruiters and potential clients",
            &[G::ThoughtLeadership, G::CommunityBuilding],
            &[C::BlogPost, C::Carousel],
            T::SixMonths,
            B::Bootstrap,
            P::BrandStoryteller,
            "Professional Services",
        ),
        "blog-seo-basics" => entry(
            "Search-driven blogging",
            "People searching for practical answers",
            &[G::WebsiteTraffic, G::LeadGeneration],
            &[C::BlogPost, C::Newsletter],
            T::SixMonths,
            B::Bootstrap,
            P::DataDriven,
            "Publishing",
        ),
        "local-restaurant" => entry(
            "Neighborhood restaurant",
            "Local diners and food lovers",
            &[G::BrandAwareness, G::Sales, G::Engagement],
            &[C::ShortVideo, C::Stories],
            T::ThreeMonths,
            B::Bootstrap,
            P::Creative,
            "Food & Beverage",
        ),
        "fitness-coach" => entry(
            "Online fitness coaching",
            "Busy professionals who want to get fit",
            &[G::LeadGeneration, G::CommunityBuilding],
            &[C::ShortVideo, C::LongVideo],
            T::ThreeMonths,
            B::Moderate,
            P::Creative,
            "Health & Fitness",
        ),
        "nonprofit-awareness" => entry(
            "Nonprofit cause awareness",
            "Donors, volunteers and local community",
            &[G::BrandAwareness, G::CommunityBuilding],
            &[C::Stories, C::Newsletter],
            T::SixMonths,
            B::Bootstrap,
            P::BrandStoryteller,
            "Nonprofit",
        ),
        "podcast-launch" => entry(
            "Interview podcast",
            "Curious listeners in the show's niche",
            &[G::BrandAwareness, G::Engagement],
            &[C::Podcast, C::ShortVideo],
            T::ThreeMonths,
            B::Moderate,
            P::Creative,
            "Media",
        ),
        "newsletter-growth" => entry(
            "Independent newsletter",
            "Readers who want curated expertise",
            &[G::LeadGeneration, G::CustomerRetention],
            &[C::Newsletter, C::BlogPost],
            T::SixMonths,
            B::Bootstrap,
            P::Strategist,
            "Publishing",
        ),
        "ecommerce-growth" => entry(
            "Direct-to-consumer e-commerce",
            "Online shoppers aged 18-40",
            &[G::Sales, G::CustomerRetention, G::BrandAwareness],
            &[C::ShortVideo, C::Carousel, C::Newsletter],
            T::SixMonths,
            B::Growth,
            P::GrowthHacker,
            "E-commerce",
        ),
        "saas-thought-leadership" => entry(
            "B2B software",
            "Technical buyers and decision makers",
            &[G::ThoughtLeadership, G::LeadGeneration],
            &[C::BlogPost, C::CaseStudy, C::Podcast],
            T::OneYear,
            B::Growth,
            P::DataDriven,
            "Software",
        ),
        "b2b-lead-gen" => entry(
            "B2B services",
            "Operations and marketing leaders",
            &[G::LeadGeneration, G::Sales],
            &[C::CaseStudy, C::LongVideo, C::BlogPost],
            T::SixMonths,
            B::Growth,
            P::Strategist,
            "Professional Services",
        ),
        "creator-monetization" => entry(
            "Independent creator business",
            "Engaged fans of the creator",
            &[G::Sales, G::CommunityBuilding, G::Engagement],
            &[C::LongVideo, C::ShortVideo, C::LiveStream],
            T::SixMonths,
            B::Moderate,
            P::GrowthHacker,
            "Creator Economy",
        ),
        "course-launch" => entry(
            "Online course",
            "Learners ready to invest in a skill",
            &[G::LeadGeneration, G::Sales],
            &[C::LongVideo, C::Newsletter, C::LiveStream],
            T::ThreeMonths,
            B::Moderate,
            P::Strategist,
            "Education",
        ),
        "real-estate-agent" => entry(
            "Residential real estate",
            "Home buyers and sellers in the local market",
            &[G::LeadGeneration, G::BrandAwareness],
            &[C::ShortVideo, C::LongVideo, C::Carousel],
            T::SixMonths,
            B::Moderate,
            P::Strategist,
            "Real Estate",
        ),
        "wellness-brand" => entry(
            "Wellness products",
            "Health-conscious adults",
            &[G::CommunityBuilding, G::Sales],
            &[C::Infographic, C::Podcast, C::Stories],
            T::SixMonths,
            B::Growth,
            P::BrandStoryteller,
            "Wellness",
        ),
        "agency-portfolio" => entry(
            "Creative agency",
            "Marketing directors at growing companies",
            &[G::LeadGeneration, G::ThoughtLeadership],
            &[C::CaseStudy, C::Carousel, C::BlogPost],
            T::SixMonths,
            B::Moderate,
            P::Creative,
            "Agency",
        ),
        "ultimate-omnichannel" => entry(
            "Multi-channel brand",
            "Broad consumer audience across demographics",
            &[G::BrandAwareness, G::Sales, G::Engagement, G::CustomerRetention],
            &[C::ShortVideo, C::LongVideo, C::Carousel, C::Newsletter, C::LiveStream],
            T::OneYear,
            B::Enterprise,
            P::Strategist,
            "Consumer Brands",
        ),
        "ultimate-viral-growth" => entry(
            "Trend-driven consumer brand",
            "Gen Z and young millennials",
            &[G::BrandAwareness, G::Engagement],
            &[C::ShortVideo, C::Stories, C::LiveStream],
            T::ThreeMonths,
            B::Growth,
            P::GrowthHacker,
            "Consumer Brands",
        ),
        "ultimate-enterprise-brand" => entry(
            "Enterprise brand",
            "Global customers, partners and employees",
            &[G::BrandAwareness, G::ThoughtLeadership],
            &[C::LongVideo, C::BlogPost, C::CaseStudy, C::Newsletter],
            T::OneYear,
            B::Enterprise,
            P::Strategist,
            "Enterprise",
        ),
        "ultimate-product-launch" => entry(
            "New product launch",
            "Early adopters and industry press",
            &[G::BrandAwareness, G::LeadGeneration, G::Sales],
            &[C::ShortVideo, C::LongVideo, C::BlogPost, C::LiveStream],
            T::ThreeMonths,
            B::Enterprise,
            P::GrowthHacker,
            "Technology",
        ),
        "ultimate-community-flywheel" => entry(
            "Membership community",
            "Members and prospective members",
            &[G::CommunityBuilding, G::CustomerRetention, G::Engagement],
            &[C::LiveStream, C::Podcast, C::Newsletter],
            T::OneYear,
            B::Growth,
            P::BrandStoryteller,
            "Community",
        ),
        "ultimate-ai-content-factory" => entry(
            "High-volume content operation",
            "Multiple audience segments",
            &[G::WebsiteTraffic, G::LeadGeneration, G::BrandAwareness],
            &[C::LongVideo, C::ShortVideo, C::BlogPost, C::Newsletter],
            T::SixMonths,
            B::Enterprise,
            P::DataDriven,
            "Media",
        ),
        "ultimate-global-expansion" => entry(
            "International expansion",
            "Customers in new regional markets",
            &[G::BrandAwareness, G::LeadGeneration],
            &[C::ShortVideo, C::Carousel, C::BlogPost],
            T::OneYear,
            B::Enterprise,
            P::Strategist,
            "International",
        ),
        "ultimate-investor-relations" => entry(
            "Executive and company presence",
            "Investors, press and senior talent",
            &[G::ThoughtLeadership, G::BrandAwareness],
            &[C::BlogPost, C::Podcast, C::CaseStudy],
            T::OneYear,
            B::Growth,
            P::BrandStoryteller,
            "Corporate",
        ),
        _ => return None,
    };
    Some(config)
}

/// Config changes applied when a template is loaded.
pub fn template_config(id: &str) -> Option<StrategyConfigPatch> {
    let template = find_template(id)?;
    let config = config_entry(id)?;
    Some(StrategyConfigPatch {
        niche: Some(config.niche.to_string()),
        target_audience: Some(config.audience.to_string()),
        goals: Some(config.goals.to_vec()),
        platforms: Some(template.platforms.to_vec()),
        timeframe: Some(config.timeframe),
        budget: Some(config.budget),
        content_types: Some(config.content_types.to_vec()),
        ai_persona: Some(config.persona),
        industry_focus: Some(config.industry.to_string()),
        ..Default::default()
    })
}
