//! Service layer: the typed boundary between the planner and its host.
//!
//! Async capabilities (generation, regeneration, saving) are defined with
//! `trait_variant`. Backends implement the `Send` form because the action
//! executor spawns their futures onto the runtime. Synchronous collaborators
//! (credits, host callbacks) are plain object-safe traits.

pub mod access;
pub mod credits;
pub mod host;
pub mod offline;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use planner_core::prelude::*;
use planner_core::{
    ContentStrategyPlanOutput, PlanItem, PlanItemRef, StrategyConfig,
};

pub use access::AccessPolicy;
pub use credits::{CreditAction, CreditLedger, LocalCreditLedger, ReservationId};
pub use host::{HostBridge, HostCall, RecordingHost};
pub use offline::OfflineBackend;
pub use store::{PlannerStore, SavedStrategy};

// ─────────────────────────────────────────────────────────────────
// Records sent to save services
// ─────────────────────────────────────────────────────────────────

/// A whole strategy saved to the strategies tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRecord {
    pub title: String,
    pub niche: String,
    pub target_audience: String,
    pub summary: String,
    pub config: StrategyConfig,
    pub plan: ContentStrategyPlanOutput,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl StrategyRecord {
    pub fn build(config: &StrategyConfig, plan: &ContentStrategyPlanOutput, now: DateTime<Utc>) -> Self {
        let niche = non_blank(&config.niche, "Untitled niche");
        let summary = if plan.executive_summary.trim().is_empty() {
            plan.target_audience_overview.clone()
        } else {
            plan.executive_summary.clone()
        };
        Self {
            title: format!("{} content strategy", niche),
            niche,
            target_audience: non_blank(&config.target_audience, "General audience"),
            summary,
            config: config.clone(),
            plan: plan.clone(),
            tags: config
                .goals
                .iter()
                .map(|g| g.label().to_lowercase())
                .collect(),
            created_at: now,
        }
    }
}

/// A content pillar saved to the pillars tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarRecord {
    pub name: String,
    pub description: String,
    pub content_ideas: Vec<String>,
    pub formats: Vec<String>,
    pub posting_frequency: String,
    pub niche: String,
    pub platforms: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Any other plan item saved to its tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItemRecord {
    pub kind: String,
    pub title: String,
    pub content: String,
    pub niche: String,
    pub source: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

fn non_blank(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Denormalized payload for a save-to-tab action.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRecord {
    Pillar(PillarRecord),
    Item(PlanItemRecord),
}

impl SaveRecord {
    /// Build the record for a displayed item, filling every optional field.
    pub fn build(item: &PlanItem, config: &StrategyConfig, now: DateTime<Utc>) -> Self {
        let niche = non_blank(&config.niche, "General");
        match item {
            PlanItem::Pillar(p) => SaveRecord::Pillar(PillarRecord {
                name: non_blank(&p.name, "Untitled pillar"),
                description: p.description.clone(),
                content_ideas: p.content_ideas.clone(),
                formats: if p.formats.is_empty() {
                    config.content_types.iter().map(|c| c.label().to_string()).collect()
                } else {
                    p.formats.clone()
                },
                posting_frequency: non_blank(&p.posting_frequency, "Weekly"),
                niche,
                platforms: config.platforms.iter().map(|p| p.label().to_string()).collect(),
                status: "active".to_string(),
                created_at: now,
            }),
            other => {
                let priority = match other {
                    PlanItem::Risk(r) if r.impact.eq_ignore_ascii_case("high") => "high",
                    PlanItem::Goal(_) => "high",
                    _ => "medium",
                };
                SaveRecord::Item(PlanItemRecord {
                    kind: other.kind().to_string(),
                    title: non_blank(other.title(), "Untitled"),
                    content: other.to_text(),
                    niche,
                    source: "content-strategy".to_string(),
                    priority: priority.to_string(),
                    status: "draft".to_string(),
                    created_at: now,
                })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Capability traits
// ─────────────────────────────────────────────────────────────────

/// Produces a full strategy from a configuration.
#[trait_variant::make(GeneratesStrategies: Send)]
pub trait LocalGeneratesStrategies {
    async fn generate_strategy(&self, config: &StrategyConfig) -> Result<ContentStrategyPlanOutput>;
}

/// Everything a regeneration call needs to know.
#[derive(Debug, Clone)]
pub struct RegenerationRequest {
    pub plan: ContentStrategyPlanOutput,
    pub target: PlanItemRef,
    pub current: PlanItem,
    pub config: StrategyConfig,
}

/// Produces a replacement for a single plan item.
#[trait_variant::make(RegeneratesPlanItems: Send)]
pub trait LocalRegeneratesPlanItems {
    async fn regenerate_item(&self, request: RegenerationRequest) -> Result<PlanItem>;
}

#[trait_variant::make(SavesStrategies: Send)]
pub trait LocalSavesStrategies {
    /// Returns the new record id.
    async fn save_strategy(&self, user_id: &str, record: StrategyRecord) -> Result<String>;
}

#[trait_variant::make(SavesContentPillars: Send)]
pub trait LocalSavesContentPillars {
    /// Returns the new record id.
    async fn save_pillar(&self, user_id: &str, record: PillarRecord) -> Result<String>;
}

#[trait_variant::make(SavesPlanItems: Send)]
pub trait LocalSavesPlanItems {
    /// Returns the new record id.
    async fn save_plan_item(&self, user_id: &str, record: PlanItemRecord) -> Result<String>;
}

/// Every capability the action executor needs, as one bound.
pub trait PlannerBackend:
    GeneratesStrategies
    + RegeneratesPlanItems
    + SavesStrategies
    + SavesContentPillars
    + SavesPlanItems
    + Send
    + Sync
    + 'static
{
}

impl<T> PlannerBackend for T where
    T: GeneratesStrategies
        + RegeneratesPlanItems
        + SavesStrategies
        + SavesContentPillars
        + SavesPlanItems
        + Send
        + Sync
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::plan::{ContentPillar, Goal, Risk};
    use planner_core::Platform;

    fn config() -> StrategyConfig {
        StrategyConfig {
            niche: "Vegan baking".to_string(),
            target_audience: "Home bakers".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pillar_record_fills_defaults() {
        let item = PlanItem::Pillar(ContentPillar {
            name: "Recipes".to_string(),
            ..Default::default()
        });
        let SaveRecord::Pillar(record) = SaveRecord::build(&item, &config(), Utc::now()) else {
            panic!("expected pillar record");
        };
        assert_eq!(record.posting_frequency, "Weekly");
        assert_eq!(record.niche, "Vegan baking");
        assert!(record.platforms.contains(&Platform::Instagram.label().to_string()));
        assert!(!record.formats.is_empty());
    }

    #[test]
    fn test_item_record_priority() {
        let risk = PlanItem::Risk(Risk {
            risk: "Algorithm change".to_string(),
            impact: "High".to_string(),
            ..Default::default()
        });
        let SaveRecord::Item(record) = SaveRecord::build(&risk, &config(), Utc::now()) else {
            panic!("expected item record");
        };
        assert_eq!(record.priority, "high");
        assert_eq!(record.kind, "risk");

        let goal = PlanItem::Goal(Goal::default());
        let SaveRecord::Item(record) = SaveRecord::build(&goal, &config(), Utc::now()) else {
            panic!("expected item record");
        };
        assert_eq!(record.title, "Untitled");
    }

    #[test]
    fn test_strategy_record_title() {
        let record = StrategyRecord::build(&config(), &ContentStrategyPlanOutput::default(), Utc::now());
        assert_eq!(record.title, "Vegan baking content strategy");
        assert_eq!(record.tags, vec!["brand awareness"]);
    }
}
