//! Typed events published to other parts of the host application.
//!
//! Every event travels inside an [`EventEnvelope`] that carries a schema
//! version and a monotonically increasing sequence number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::PlanItemRef;

/// Bump when an event payload changes shape.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

/// Kind of record created by a save-to-tab action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedKind {
    Strategy,
    Goal,
    ContentPillar,
    Metric,
    RevenueStream,
    Risk,
}

impl SavedKind {
    pub fn for_item(target: PlanItemRef) -> Self {
        match target {
            PlanItemRef::Goal(_) => SavedKind::Goal,
            PlanItemRef::Pillar(_) => SavedKind::ContentPillar,
            PlanItemRef::Metric(_) => SavedKind::Metric,
            PlanItemRef::RevenueStream(_) => SavedKind::RevenueStream,
            PlanItemRef::Risk(_) => SavedKind::Risk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "html",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlannerEvent {
    StrategySaved {
        kind: SavedKind,
        record_id: String,
    },
    ContentPillarSaved {
        record_id: String,
        pillar_name: String,
    },
    /// A single item of the displayed plan was replaced.
    StrategyContentUpdate {
        target: PlanItemRef,
        generation: u64,
    },
    PlanGenerated {
        generation: u64,
    },
    ConfigChanged,
    TemplateApplied {
        template_id: String,
    },
    ExportCompleted {
        format: ExportFormat,
        path: String,
    },
    Shutdown,
}

impl PlannerEvent {
    /// Event name as it appears on the wire.
    pub fn event_type(&self) -> &'static str {
        match self {
            PlannerEvent::StrategySaved { .. } => "strategy_saved",
            PlannerEvent::ContentPillarSaved { .. } => "content_pillar_saved",
            PlannerEvent::StrategyContentUpdate { .. } => "strategy_content_update",
            PlannerEvent::PlanGenerated { .. } => "plan_generated",
            PlannerEvent::ConfigChanged => "config_changed",
            PlannerEvent::TemplateApplied { .. } => "template_applied",
            PlannerEvent::ExportCompleted { .. } => "export_completed",
            PlannerEvent::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub schema_version: u32,
    pub sequence: u64,
    pub emitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: PlannerEvent,
}

impl EventEnvelope {
    pub fn new(sequence: u64, event: PlannerEvent) -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            sequence,
            emitted_at: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_flat_with_tag() {
        let envelope = EventEnvelope::new(
            7,
            PlannerEvent::StrategySaved {
                kind: SavedKind::ContentPillar,
                record_id: "rec-1".to_string(),
            },
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event"], "strategy_saved");
        assert_eq!(json["schema_version"], EVENT_SCHEMA_VERSION);
        assert_eq!(json["sequence"], 7);
        assert_eq!(json["kind"], "content_pillar");
        assert_eq!(json["record_id"], "rec-1");
    }

    #[test]
    fn test_event_type_matches_tag() {
        let events = vec![
            PlannerEvent::ConfigChanged,
            PlannerEvent::Shutdown,
            PlannerEvent::StrategyContentUpdate {
                target: PlanItemRef::Pillar(2),
                generation: 3,
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.event_type());
        }
    }

    #[test]
    fn test_saved_kind_for_item() {
        assert_eq!(SavedKind::for_item(PlanItemRef::Pillar(0)), SavedKind::ContentPillar);
        assert_eq!(SavedKind::for_item(PlanItemRef::Risk(4)), SavedKind::Risk);
    }
}
