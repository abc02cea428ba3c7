//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per view
//! - `form`: Strategy form edits and the generation trigger
//! - `plan`: Plan navigation, item menus, regeneration, saving, host hand-offs
//! - `export`: Export gate and dispatch
//! - `analytics`: Topic tracker and refresh ticker
//! - `calendar`: Content calendar edits
//! - `templates`: Template gallery and template loading

pub(crate) mod analytics;
pub(crate) mod calendar;
pub(crate) mod export;
pub(crate) mod form;
pub(crate) mod keys;
pub(crate) mod plan;
pub(crate) mod templates;
pub(crate) mod update;


use planner_core::{
    ContentStrategyPlanOutput, ExportFormat, ItemStamp, PlanItemRef, StrategyConfig,
};

use crate::message::Message;
use crate::services::{RegenerationRequest, ReservationId, SaveRecord, StrategyRecord};

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions the event loop performs after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Call the generation service with a config snapshot
    GenerateStrategy { config: Box<StrategyConfig> },

    /// Call the regeneration service. Credits are already reserved.
    RegenerateItem {
        request: Box<RegenerationRequest>,
        reservation: ReservationId,
        expected: ItemStamp,
    },

    SaveStrategy {
        user_id: String,
        record: Box<StrategyRecord>,
    },

    SaveItem {
        user_id: String,
        target: PlanItemRef,
        record: Box<SaveRecord>,
    },

    /// Keep a copy of the plan in the local store
    StoreStrategyLocally {
        config: Box<StrategyConfig>,
        plan: Box<ContentStrategyPlanOutput>,
    },

    CopyToClipboard { title: String, text: String },

    /// Write a rendered export, count it, and open it if configured
    ExportStrategy {
        format: ExportFormat,
        file_name: String,
        contents: String,
    },

    StartAnalyticsTicker { interval_secs: u64 },

    StopAnalyticsTicker,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
