//! Headless mode - NDJSON output instead of the TUI
//!
//! Applies the CLI fields or a template, generates one strategy, optionally
//! exports it, and writes one JSON object per line to stdout. Bus events
//! are written as their [`EventEnvelope`](planner_core::EventEnvelope);
//! runner-level lines use [`HeadlessEvent`].
//!
//! # Example Output
//!
//! ```json
//! {"event":"started","project":".","timestamp":1704700001000}
//! {"schema_version":1,"sequence":1,"emitted_at":"2026-01-08T09:00:02Z","event":"config_changed"}
//! {"schema_version":1,"sequence":2,"emitted_at":"2026-01-08T09:00:02Z","event":"plan_generated","generation":1}
//! {"event":"notice","category":"success","message":"Strategy exported","timestamp":1704700003000}
//! ```

pub mod runner;

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use planner_app::{Notice, NoticeCategory};
use planner_core::prelude::*;

pub use runner::{run_headless, HeadlessOptions, HeadlessOutcome};

/// Runner-level lines emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    Started {
        project: String,
        timestamp: i64,
    },

    /// A notice the TUI would have shown as a modal
    Notice {
        category: &'static str,
        message: String,
        timestamp: i64,
    },

    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn started(project: &str) -> Self {
        Self::Started {
            project: project.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn notice(notice: &Notice) -> Self {
        let category = match notice.category {
            NoticeCategory::Precondition => "precondition",
            NoticeCategory::OperationFailed => "operation_failed",
            NoticeCategory::Success => "success",
            NoticeCategory::Info => "info",
        };
        Self::Notice {
            category,
            message: notice.message.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

/// Writes one JSON value per line and flushes after each.
pub struct NdjsonWriter<W: Write> {
    out: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Serialization or write failures are logged and the line dropped.
    pub fn emit<T: Serialize>(&mut self, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(self.out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        if let Err(e) = self.out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
