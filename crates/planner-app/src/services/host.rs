//! Fire-and-forget callbacks into the host application.

use std::sync::Mutex;

use planner_core::prelude::*;
use planner_core::{ContentStrategyPlanOutput, ScheduledContentItem};

/// Callbacks the host provides. None of them return a value.
#[cfg_attr(test, mockall::automock)]
pub trait HostBridge: Send + Sync {
    fn send_to_canvas(&self, content: &str, title: &str);

    fn send_strategy_mind_map(&self, content: &str, plan: &ContentStrategyPlanOutput);

    fn add_to_calendar(&self, items: &[ScheduledContentItem]);

    /// Show the host's upgrade flow.
    fn upgrade(&self);
}

/// A host call as observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SendToCanvas { title: String, content: String },
    SendStrategyMindMap { content: String },
    AddToCalendar { count: usize },
    Upgrade,
}

/// Host used by the terminal and headless front ends: logs each call and
/// keeps a history for display.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().clone()
    }

    pub fn upgrade_count(&self) -> usize {
        self.lock().iter().filter(|c| **c == HostCall::Upgrade).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HostCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: HostCall) {
        self.lock().push(call);
    }
}

impl HostBridge for RecordingHost {
    fn send_to_canvas(&self, content: &str, title: &str) {
        info!("Host: send to canvas \"{}\" ({} chars)", title, content.len());
        self.record(HostCall::SendToCanvas {
            title: title.to_string(),
            content: content.to_string(),
        });
    }

    fn send_strategy_mind_map(&self, content: &str, plan: &ContentStrategyPlanOutput) {
        info!(
            "Host: send mind map ({} goals, {} pillars)",
            plan.goals.len(),
            plan.content_pillars.len()
        );
        self.record(HostCall::SendStrategyMindMap {
            content: content.to_string(),
        });
    }

    fn add_to_calendar(&self, items: &[ScheduledContentItem]) {
        info!("Host: add {} item(s) to calendar", items.len());
        self.record(HostCall::AddToCalendar { count: items.len() });
    }

    fn upgrade(&self) {
        info!("Host: upgrade requested");
        self.record(HostCall::Upgrade);
    }
}
