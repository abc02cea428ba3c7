//! # planner-core - Core Domain Types
//!
//! Foundation crate for Strategy Planner. Provides the strategy and plan
//! value types, the versioned plan document, the local analytics
//! simulation, the content calendar, the template catalog, bus events,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, rand, uuid, tracing).
//!
//! ## Public API
//!
//! ### Strategy inputs (`strategy`)
//! - [`StrategyConfig`] - Niche, audience, goals, platforms and the rest of the form
//! - [`StrategyConfigPatch`] - Partial config applied by templates
//!
//! ### Plans (`plan`, `document`)
//! - [`ContentStrategyPlanOutput`] - A generated strategy
//! - [`PlanItemRef`], [`PlanItem`] - Typed addressing of actionable list items
//! - [`PlanSection`] - The display sections of a plan
//! - [`PlanDocument`], [`PlanCommand`] - Versioned plan value with conflict detection
//!
//! ### Analytics (`topic`, `analytics`)
//! - [`TrackedTopic`], [`TopicMetrics`] - Simulated analytics subjects
//! - [`generate_advanced_metrics()`], [`generate_realistic_historical_data()`],
//!   [`simulate_realtime_metric_updates()`] - Seedable simulation functions
//! - [`update_analytics_data()`] - Rollups across all tracked topics
//!
//! ### Calendar and templates
//! - [`ContentCalendar`] - In-memory scheduled items and ideas
//! - [`StrategyTemplate`], [`TEMPLATES`] - Static template catalog
//!
//! ### Events (`events`)
//! - [`PlannerEvent`], [`EventEnvelope`] - Versioned bus events
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use planner_core::prelude::*;
//! ```

pub mod analytics;
pub mod calendar;
pub mod document;
pub mod error;
pub mod events;
pub mod logging;
pub mod plan;
pub mod strategy;
pub mod templates;
pub mod topic;

/// Prelude for common imports used throughout all Strategy Planner crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use analytics::{
    calculate_category_diversity, calculate_sentiment_impact, calculate_weighted_engagement,
    generate_advanced_metrics, generate_insights, generate_realistic_historical_data,
    popularity_score, simulate_realtime_metric_updates, track_topic, update_analytics_data,
    AnalyticsSummary, Insight, InsightKind,
};
pub use calendar::{ContentCalendar, ContentIdea, ContentPerformance, ContentStatus, ScheduledContentItem};
pub use document::{ItemStamp, PlanCommand, PlanDocument};
pub use error::{Error, Result, ResultExt};
pub use events::{EventEnvelope, ExportFormat, PlannerEvent, SavedKind, EVENT_SCHEMA_VERSION};
pub use plan::{ContentStrategyPlanOutput, PlanItem, PlanItemRef, PlanSection};
pub use strategy::{
    AiPersona, Budget, ContentType, Platform, StrategyConfig, StrategyConfigPatch, StrategyGoal,
    Timeframe, MAX_GOALS,
};
pub use templates::{
    filter_templates, find_template, template_config, StrategyTemplate, TemplateTier, TEMPLATES,
};
pub use topic::{HistoricalPoint, TopicCategory, TopicMetrics, TrackedTopic};
