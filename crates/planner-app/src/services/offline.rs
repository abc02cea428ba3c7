//! Offline backend: composes plans from the configuration alone.
//!
//! This stands in for a remote generation service. Output is
//! deterministic for a given configuration; regenerations cycle through
//! alternate angles so consecutive results differ.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use planner_core::plan::{
    AnalyticsAndKpis, CampaignIdea, ComplianceItem, CompetitorInsight, ContentPillar, Goal,
    JourneyStage, KeyMetric, MonetizationStrategy, PlatformStrategy, ResourceAllocation,
    RevenueStream, Risk, RiskMitigation, ScalabilityPlanning, ScalingPhase, WeeklyScheduleEntry,
};
use planner_core::prelude::*;
use planner_core::{
    Budget, ContentStrategyPlanOutput, PlanItem, Platform, StrategyConfig, StrategyGoal,
};

use super::store::{PlannerStore, TabRecord};
use super::{
    GeneratesStrategies, PillarRecord, PlanItemRecord, RegeneratesPlanItems, RegenerationRequest,
    SavesContentPillars, SavesPlanItems, SavesStrategies, StrategyRecord,
};

const ANGLES: &[&str] = &[
    "data-backed",
    "community-led",
    "story-driven",
    "experiment-first",
    "evergreen",
];

const WEEKDAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

pub struct OfflineBackend {
    store: Arc<PlannerStore>,
    latency: Duration,
    regenerations: AtomicU64,
}

impl OfflineBackend {
    pub fn new(store: Arc<PlannerStore>) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
            regenerations: AtomicU64::new(0),
        }
    }

    /// Delay every call, to make the loading state visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn next_angle(&self) -> &'static str {
        let n = self.regenerations.fetch_add(1, Ordering::Relaxed) as usize;
        ANGLES[n % ANGLES.len()]
    }

    fn append(&self, kind: &str, user_id: &str, payload: serde_json::Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.store.append_record(TabRecord {
            id: id.clone(),
            kind: kind.to_string(),
            user_id: user_id.to_string(),
            saved_at: Utc::now(),
            payload,
        })?;
        Ok(id)
    }
}

// ─────────────────────────────────────────────────────────────────
// Plan composition
// ─────────────────────────────────────────────────────────────────

fn goal_for(goal: StrategyGoal, config: &StrategyConfig) -> Goal {
    let (description, kpis): (String, &[&str]) = match goal {
        StrategyGoal::BrandAwareness => (
            format!("Make {} a recognizable name among {}.", config.niche, config.target_audience),
            &["Reach", "Follower growth", "Share of voice"],
        ),
        StrategyGoal::LeadGeneration => (
            format!("Turn {} interest into qualified leads.", config.niche),
            &["Email sign-ups", "Lead magnet downloads", "Cost per lead"],
        ),
        StrategyGoal::CommunityBuilding => (
            format!("Give {} a place to talk to each other.", config.target_audience),
            &["Comments per post", "Returning members", "UGC submissions"],
        ),
        StrategyGoal::Sales => (
            "Convert engaged followers into paying customers.".to_string(),
            &["Conversion rate", "Revenue from content", "Average order value"],
        ),
        StrategyGoal::ThoughtLeadership => (
            format!("Own the conversation on {}.", config.niche),
            &["Media mentions", "Speaking invites", "Saves and shares"],
        ),
        StrategyGoal::Engagement => (
            "Lift interaction on every post.".to_string(),
            &["Engagement rate", "Replies", "Watch time"],
        ),
        StrategyGoal::WebsiteTraffic => (
            "Send consistent traffic from social to owned pages.".to_string(),
            &["Sessions from social", "Click-through rate", "Pages per session"],
        ),
        StrategyGoal::CustomerRetention => (
            "Keep existing customers engaged and buying again.".to_string(),
            &["Repeat purchase rate", "Churn", "Newsletter open rate"],
        ),
    };
    Goal {
        title: goal.label().to_string(),
        description,
        kpis: kpis.iter().map(|k| k.to_string()).collect(),
        timeframe: config.timeframe.label().to_string(),
    }
}

fn pillars_for(config: &StrategyConfig) -> Vec<ContentPillar> {
    let formats: Vec<String> = config.content_types.iter().map(|c| c.label().to_string()).collect();
    let frequency = match config.budget {
        Budget::Bootstrap => "2x per week",
        Budget::Moderate => "3x per week",
        Budget::Growth => "5x per week",
        Budget::Enterprise => "Daily",
    };
    [
        ("Education", "Teach the fundamentals", "Beginner mistakes in"),
        ("Inspiration", "Show what is possible", "Success stories from"),
        ("Community", "Spotlight the audience", "Questions from"),
        ("Behind the Scenes", "Build trust through transparency", "How we approach"),
    ]
    .iter()
    .map(|(name, what, idea)| ContentPillar {
        name: format!("{} {}", config.niche, name),
        description: format!("{} of {} for {}.", what, config.niche, config.target_audience),
        content_ideas: vec![
            format!("{} {}", idea, config.niche),
            format!("Top 5 {} tips", config.niche),
            format!("{} myths, busted", config.niche),
        ],
        formats: formats.clone(),
        posting_frequency: frequency.to_string(),
    })
    .collect()
}

fn revenue_for(config: &StrategyConfig) -> Vec<RevenueStream> {
    let mut streams = vec![
        RevenueStream {
            name: "Affiliate partnerships".to_string(),
            description: format!("Recommend tools {} already use.", config.target_audience),
            potential_revenue: "$200-1,000/mo".to_string(),
            timeline: "Month 2".to_string(),
        },
        RevenueStream {
            name: "Digital products".to_string(),
            description: format!("Templates and guides on {}.", config.niche),
            potential_revenue: "$500-3,000/mo".to_string(),
            timeline: "Month 3".to_string(),
        },
    ];
    if matches!(config.budget, Budget::Growth | Budget::Enterprise) {
        streams.push(RevenueStream {
            name: "Sponsorships".to_string(),
            description: "Sell placements once reach is consistent.".to_string(),
            potential_revenue: "$2,000-10,000/mo".to_string(),
            timeline: "Month 4".to_string(),
        });
    }
    streams
}

fn phases_for(config: &StrategyConfig) -> Vec<ScalingPhase> {
    let months = config.timeframe.months();
    let third = (months / 3).max(1);
    vec![
        ScalingPhase {
            name: "Foundation".to_string(),
            duration: format!("{} month(s)", third),
            focus: "Consistency and voice".to_string(),
            milestones: vec!["Posting cadence locked".to_string(), "First 3 pillars live".to_string()],
        },
        ScalingPhase {
            name: "Growth".to_string(),
            duration: format!("{} month(s)", third),
            focus: "Double down on winning formats".to_string(),
            milestones: vec!["2x baseline reach".to_string()],
        },
        ScalingPhase {
            name: "Scale".to_string(),
            duration: format!("{} month(s)", months.saturating_sub(2 * third).max(1)),
            focus: "Delegate and automate".to_string(),
            milestones: vec!["Repeatable production workflow".to_string()],
        },
    ]
}

fn schedule_for(config: &StrategyConfig) -> Vec<WeeklyScheduleEntry> {
    let platforms: Vec<Platform> = if config.platforms.is_empty() {
        vec![Platform::Instagram]
    } else {
        config.platforms.clone()
    };
    let content_types = if config.content_types.is_empty() {
        vec![planner_core::ContentType::ShortVideo]
    } else {
        config.content_types.clone()
    };
    WEEKDAYS
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, day)| WeeklyScheduleEntry {
            day: day.to_string(),
            platform: platforms[i % platforms.len()].label().to_string(),
            content_type: content_types[i % content_types.len()].label().to_string(),
            topic: format!("{} insight #{}", config.niche, i + 1),
            time: if i % 2 == 0 { "09:00" } else { "18:30" }.to_string(),
        })
        .collect()
}

/// Compose a full plan from a configuration.
pub fn compose_plan(config: &StrategyConfig) -> ContentStrategyPlanOutput {
    let goals = if config.goals.is_empty() {
        vec![StrategyGoal::BrandAwareness]
    } else {
        config.goals.clone()
    };

    ContentStrategyPlanOutput {
        executive_summary: format!(
            "A {} plan to grow {} with {} over {}, written as a {}.",
            config.budget.label(),
            config.niche,
            config.target_audience,
            config.timeframe.label(),
            config.ai_persona.label().to_lowercase()
        ),
        target_audience_overview: format!(
            "{} interested in {}. Primary languages: {}. Regions: {}.",
            config.target_audience,
            config.niche,
            config.language_preferences.join(", "),
            config.geographic_focus.join(", ")
        ),
        goals: goals.iter().map(|g| goal_for(*g, config)).collect(),
        content_pillars: pillars_for(config),
        analytics_and_kpis: AnalyticsAndKpis {
            key_metrics: vec![
                KeyMetric {
                    name: "Engagement rate".to_string(),
                    target: "4%+".to_string(),
                    measurement: "Interactions / reach, weekly".to_string(),
                },
                KeyMetric {
                    name: "Audience growth".to_string(),
                    target: "+10% per month".to_string(),
                    measurement: "Net new followers across platforms".to_string(),
                },
                KeyMetric {
                    name: "Conversions".to_string(),
                    target: "2% of link clicks".to_string(),
                    measurement: "UTM-tagged sign-ups".to_string(),
                },
            ],
            reporting_cadence: "Weekly snapshot, monthly review".to_string(),
            tools: vec!["Native platform analytics".to_string(), "GA4".to_string()],
        },
        monetization_strategy: MonetizationStrategy {
            revenue_streams: revenue_for(config),
            pricing_notes: format!("Price against what {} already pay for.", config.target_audience),
        },
        scalability_planning: ScalabilityPlanning {
            phases: phases_for(config),
            automation_opportunities: vec![
                "Batch-produce one week of posts at a time".to_string(),
                "Repurpose long-form into short clips".to_string(),
            ],
        },
        risk_mitigation: RiskMitigation {
            risks: vec![
                Risk {
                    risk: "Creator burnout".to_string(),
                    likelihood: "Medium".to_string(),
                    impact: "High".to_string(),
                    mitigation: "Keep a two-week content buffer.".to_string(),
                },
                Risk {
                    risk: "Platform algorithm change".to_string(),
                    likelihood: "High".to_string(),
                    impact: "Medium".to_string(),
                    mitigation: "Grow an owned email list in parallel.".to_string(),
                },
            ],
        },
        suggested_weekly_schedule: schedule_for(config),
        platform_strategies: config
            .platforms
            .iter()
            .map(|p| PlatformStrategy {
                platform: p.label().to_string(),
                approach: format!("Native {} formats first", p.label()),
                posting_frequency: "3x per week".to_string(),
                best_times: vec!["09:00".to_string(), "18:30".to_string()],
            })
            .collect(),
        campaign_ideas: vec![CampaignIdea {
            name: format!("30 days of {}", config.niche),
            objective: "Build a daily habit with the audience".to_string(),
            duration: "30 days".to_string(),
            channels: config.platforms.iter().map(|p| p.label().to_string()).collect(),
        }],
        competitor_insights: if config.competitor_analysis {
            vec![CompetitorInsight {
                competitor: format!("Leading {} accounts", config.niche),
                strengths: "Consistent posting".to_string(),
                gaps: "Little direct interaction".to_string(),
                opportunity: "Win on replies and community".to_string(),
            }]
        } else {
            Vec::new()
        },
        customer_journey: vec![
            JourneyStage {
                stage: "Awareness".to_string(),
                objective: "Get discovered".to_string(),
                content: vec!["Short video".to_string()],
                metric: "Reach".to_string(),
            },
            JourneyStage {
                stage: "Consideration".to_string(),
                objective: "Earn trust".to_string(),
                content: vec!["Case studies".to_string(), "Tutorials".to_string()],
                metric: "Saves".to_string(),
            },
            JourneyStage {
                stage: "Conversion".to_string(),
                objective: "Ask for the sale".to_string(),
                content: vec!["Offers".to_string()],
                metric: "Conversions".to_string(),
            },
        ],
        resource_allocation: vec![
            ResourceAllocation {
                area: "Content production".to_string(),
                percentage: 50,
                notes: config.budget.label().to_string(),
            },
            ResourceAllocation {
                area: "Distribution".to_string(),
                percentage: 30,
                notes: "Boost top performers".to_string(),
            },
            ResourceAllocation {
                area: "Community".to_string(),
                percentage: 20,
                notes: "Replies and DMs".to_string(),
            },
        ],
        compliance: vec![ComplianceItem {
            area: "Disclosures".to_string(),
            requirement: "Label sponsored and affiliate content".to_string(),
            action: "Add #ad / paid partnership tags".to_string(),
        }],
    }
}

/// Produce a fresh take on a single item.
pub fn regenerate(request: &RegenerationRequest, angle: &str) -> PlanItem {
    let niche = &request.config.niche;
    match &request.current {
        PlanItem::Goal(g) => PlanItem::Goal(Goal {
            description: format!("{} ({} approach for {})", g.description, angle, niche),
            ..g.clone()
        }),
        PlanItem::Pillar(p) => {
            let mut ideas = p.content_ideas.clone();
            ideas.insert(0, format!("A {} series on {}", angle, niche));
            PlanItem::Pillar(ContentPillar {
                description: format!("{} Reframed as {}.", p.description, angle),
                content_ideas: ideas,
                ..p.clone()
            })
        }
        PlanItem::Metric(m) => PlanItem::Metric(KeyMetric {
            measurement: format!("{} ({} tracking)", m.measurement, angle),
            ..m.clone()
        }),
        PlanItem::RevenueStream(r) => PlanItem::RevenueStream(RevenueStream {
            description: format!("{} Positioned as {}.", r.description, angle),
            ..r.clone()
        }),
        PlanItem::Risk(r) => PlanItem::Risk(Risk {
            mitigation: format!("{} Add a {} review.", r.mitigation, angle),
            ..r.clone()
        }),
    }
}

impl GeneratesStrategies for OfflineBackend {
    async fn generate_strategy(&self, config: &StrategyConfig) -> Result<ContentStrategyPlanOutput> {
        self.simulate_latency().await;
        if !config.can_generate() {
            return Err(Error::invalid_config("niche and target audience are required"));
        }
        info!("Composing offline strategy for \"{}\"", config.niche);
        Ok(compose_plan(config))
    }
}

impl RegeneratesPlanItems for OfflineBackend {
    async fn regenerate_item(&self, request: RegenerationRequest) -> Result<PlanItem> {
        self.simulate_latency().await;
        let angle = self.next_angle();
        debug!("Regenerating {} with a {} angle", request.target, angle);
        Ok(regenerate(&request, angle))
    }
}

impl SavesStrategies for OfflineBackend {
    async fn save_strategy(&self, user_id: &str, record: StrategyRecord) -> Result<String> {
        self.simulate_latency().await;
        self.append("strategy", user_id, serde_json::to_value(&record)?)
    }
}

impl SavesContentPillars for OfflineBackend {
    async fn save_pillar(&self, user_id: &str, record: PillarRecord) -> Result<String> {
        self.simulate_latency().await;
        self.append("content_pillar", user_id, serde_json::to_value(&record)?)
    }
}

impl SavesPlanItems for OfflineBackend {
    async fn save_plan_item(&self, user_id: &str, record: PlanItemRecord) -> Result<String> {
        self.simulate_latency().await;
        let kind = record.kind.replace(' ', "_");
        self.append(&kind, user_id, serde_json::to_value(&record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{PlanItemRef, PlanSection};

    fn config() -> StrategyConfig {
        StrategyConfig {
            niche: "Urban gardening".to_string(),
            target_audience: "Apartment renters".to_string(),
            ..Default::default()
        }
    }

    fn backend() -> OfflineBackend {
        OfflineBackend::new(Arc::new(PlannerStore::in_memory(10)))
    }

    #[test]
    fn test_compose_plan_fills_every_section() {
        let plan = compose_plan(&config());
        for section in PlanSection::ALL {
            assert!(!section.is_empty(&plan), "{:?} is empty", section);
        }
        assert_eq!(plan.goals.len(), config().goals.len());
        assert_eq!(plan.suggested_weekly_schedule.len(), 5);
    }

    #[test]
    fn test_compose_plan_is_deterministic() {
        assert_eq!(compose_plan(&config()), compose_plan(&config()));
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_config() {
        let result = GeneratesStrategies::generate_strategy(&backend(), &StrategyConfig::default()).await;
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[tokio::test]
    async fn test_regenerate_keeps_kind_and_changes_content() {
        let backend = backend();
        let plan = compose_plan(&config());
        let target = PlanItemRef::Pillar(1);
        let current = plan.item(target).unwrap();

        let request = RegenerationRequest {
            plan: plan.clone(),
            target,
            current: current.clone(),
            config: config(),
        };
        let first = RegeneratesPlanItems::regenerate_item(&backend, request.clone()).await.unwrap();
        let second = RegeneratesPlanItems::regenerate_item(&backend, request).await.unwrap();

        assert_eq!(first.kind(), current.kind());
        assert_ne!(first, current);
        assert_ne!(first, second);
        assert!(plan.with_item(target, first).is_ok());
    }

    #[tokio::test]
    async fn test_saves_append_records() {
        let store = Arc::new(PlannerStore::in_memory(10));
        let backend = OfflineBackend::new(store.clone());
        let record = PlanItemRecord {
            kind: "revenue stream".to_string(),
            title: "Ads".to_string(),
            content: String::new(),
            niche: String::new(),
            source: String::new(),
            priority: "medium".to_string(),
            status: "draft".to_string(),
            created_at: Utc::now(),
        };
        let a = SavesPlanItems::save_plan_item(&backend, "u1", record.clone()).await.unwrap();
        let b = SavesPlanItems::save_plan_item(&backend, "u1", record).await.unwrap();

        assert_ne!(a, b);
        let records = store.tab_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "revenue_stream");
    }
}
