//! End-to-end scenarios for Strategy Planner, driven through the Engine
//!
//! Run with: cargo test --test e2e

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use planner_app::config::Settings;
use planner_app::services::{LocalCreditLedger, PlannerStore, RecordingHost};
use planner_app::test_utils::FakeBackend;
use planner_app::{AppState, Engine, Message, NoticeCategory, Services};
use planner_core::{ExportFormat, PlanItemRef, PlannerEvent};
use strategy_planner::{run_headless, HeadlessOptions};

// ─────────────────────────────────────────────────────────
// Test Data Helpers
// ─────────────────────────────────────────────────────────

struct Harness {
    engine: Engine<FakeBackend>,
    host: Arc<RecordingHost>,
    store: Arc<PlannerStore>,
    _dir: tempfile::TempDir,
}

fn settings_in(dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.export.output_dir = Some(dir.join("exports"));
    settings.export.open_in_browser = false;
    settings.export.print_delay_ms = 0;
    settings.analytics.seed = Some(7);
    settings
}

fn harness(configure: impl FnOnce(&mut Settings)) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_in(dir.path());
    configure(&mut settings);

    let host = Arc::new(RecordingHost::new());
    let store = Arc::new(PlannerStore::in_memory(settings.storage.max_saved_strategies));
    let services = Services {
        credits: Arc::new(LocalCreditLedger::new(settings.credits.starting_balance)),
        host: host.clone(),
        store: store.clone(),
    };
    let state = AppState::with_services(settings, services);
    let engine = Engine::with_backend(state, Arc::new(FakeBackend::new()), PathBuf::from("."));

    Harness {
        engine,
        host,
        store,
        _dir: dir,
    }
}

fn signed_in(settings: &mut Settings) {
    settings.account.user_id = "user-1".to_string();
}

/// Process background results until `done` holds.
async fn settle<F>(engine: &mut Engine<FakeBackend>, done: F)
where
    F: Fn(&Engine<FakeBackend>) -> bool,
{
    while !done(engine) {
        let msg = tokio::time::timeout(Duration::from_secs(5), engine.msg_rx.recv())
            .await
            .expect("timed out waiting for a background result")
            .expect("message channel closed");
        engine.process_message(msg);
    }
}

async fn generate(engine: &mut Engine<FakeBackend>) {
    engine.process_message(Message::SetStrategyConfig(Box::new(
        planner_app::test_utils::ready_config(),
    )));
    engine.process_message(Message::GenerateStrategy);
    settle(engine, |e| !e.state.is_loading).await;
    assert!(engine.state.plan().is_some());
}

fn ndjson(buf: Vec<u8>) -> Vec<serde_json::Value> {
    String::from_utf8(buf)
        .expect("utf-8 output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("every line is JSON"))
        .collect()
}

fn event_names(lines: &[serde_json::Value]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|v| v["event"].as_str().map(str::to_string))
        .collect()
}

// ─────────────────────────────────────────────────────────
// Headless runs
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn headless_generates_and_exports_json() {
    let mut h = harness(|_| {});
    let options = HeadlessOptions {
        niche: Some("Home coffee roasting".to_string()),
        audience: Some("Coffee hobbyists".to_string()),
        export: Some(ExportFormat::Json),
        ..Default::default()
    };

    let mut out = Vec::new();
    let outcome = run_headless(&mut h.engine, options, &mut out).await.unwrap();

    assert!(outcome.generated);
    assert!(outcome.exported);
    assert_eq!(h.engine.backend().generate_calls().len(), 1);
    assert_eq!(h.store.export_count(), 1);

    let lines = ndjson(out);
    let names = event_names(&lines);
    assert_eq!(names.first().map(String::as_str), Some("started"));
    assert!(names.contains(&"config_changed".to_string()));
    assert!(names.contains(&"plan_generated".to_string()));
    assert_eq!(names.last().map(String::as_str), Some("shutdown"));

    let export = lines
        .iter()
        .find(|v| v["event"] == "export_completed")
        .expect("export_completed line");
    let path = PathBuf::from(export["path"].as_str().unwrap());
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

    // Bus sequence numbers are strictly increasing
    let sequences: Vec<u64> = lines.iter().filter_map(|v| v["sequence"].as_u64()).collect();
    assert!(sequences.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn headless_free_template_fills_the_form() {
    let mut h = harness(|_| {});
    let options = HeadlessOptions {
        template: Some("small-business-starter".to_string()),
        ..Default::default()
    };

    let mut out = Vec::new();
    let outcome = run_headless(&mut h.engine, options, &mut out).await.unwrap();

    assert!(outcome.generated);
    assert!(!outcome.exported);
    let lines = ndjson(out);
    assert!(lines
        .iter()
        .any(|v| v["event"] == "template_applied" && v["template_id"] == "small-business-starter"));
}

#[tokio::test]
async fn headless_locked_template_requests_upgrade_without_generating() {
    let mut h = harness(|_| {});
    let options = HeadlessOptions {
        template: Some("ultimate-omnichannel".to_string()),
        ..Default::default()
    };

    let mut out = Vec::new();
    let outcome = run_headless(&mut h.engine, options, &mut out).await.unwrap();

    assert!(!outcome.generated);
    assert_eq!(h.host.upgrade_count(), 1);
    assert!(h.engine.backend().generate_calls().is_empty());
    assert!(h.engine.state.config.niche.is_empty());

    let lines = ndjson(out);
    assert!(lines
        .iter()
        .any(|v| v["event"] == "notice" && v["category"] == "precondition"));
    assert!(!event_names(&lines).contains(&"template_applied".to_string()));
}

// ─────────────────────────────────────────────────────────
// Interactive flows through the engine
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn regeneration_replaces_item_and_charges_once() {
    let mut h = harness(signed_in);
    generate(&mut h.engine).await;
    let mut events = h.engine.subscribe();
    let before = h.engine.state.credits.available();
    let target = PlanItemRef::Goal(0);

    h.engine.process_message(Message::RegenerateItem { target });
    // A second request while the first is in flight is ignored
    h.engine.process_message(Message::RegenerateItem { target });
    settle(&mut h.engine, |e| e.state.regenerating.is_empty()).await;

    assert_eq!(h.engine.backend().regenerate_calls(), vec![target]);
    assert_eq!(h.engine.state.credits.available(), before - 1);

    let envelope = events.recv().await.unwrap();
    assert!(matches!(
        envelope.event,
        PlannerEvent::StrategyContentUpdate { target: t, generation: 1 } if t == target
    ));
}

#[tokio::test]
async fn regeneration_without_credits_never_calls_the_service() {
    let mut h = harness(|s| {
        signed_in(s);
        s.credits.starting_balance = 0;
    });
    generate(&mut h.engine).await;

    h.engine.process_message(Message::RegenerateItem {
        target: PlanItemRef::Pillar(0),
    });

    assert!(h.engine.state.regenerating.is_empty());
    assert!(h.engine.backend().regenerate_calls().is_empty());
    assert!(h
        .engine
        .state
        .notices
        .iter()
        .any(|n| n.category == NoticeCategory::Precondition));
}

#[tokio::test]
async fn saving_the_strategy_publishes_strategy_saved() {
    let mut h = harness(signed_in);
    generate(&mut h.engine).await;
    let mut events = h.engine.subscribe();

    h.engine.process_message(Message::SaveStrategy);
    settle(&mut h.engine, |e| e.state.saving.is_empty()).await;

    assert_eq!(h.engine.backend().save_calls().len(), 1);
    let envelope = events.recv().await.unwrap();
    assert!(matches!(envelope.event, PlannerEvent::StrategySaved { .. }));
}

#[tokio::test]
async fn free_user_at_export_limit_gets_a_notice_each_time() {
    let mut h = harness(|_| {});
    for _ in 0..5 {
        h.store.record_export().unwrap();
    }
    generate(&mut h.engine).await;

    h.engine.process_message(Message::Export(ExportFormat::Pdf));
    h.engine.process_message(Message::Export(ExportFormat::Pdf));

    assert!(!h.engine.state.exporting);
    assert_eq!(h.store.export_count(), 5);
    let limit_notices = h
        .engine
        .state
        .notices
        .iter()
        .filter(|n| n.category == NoticeCategory::Precondition)
        .count();
    assert_eq!(limit_notices, 2);
}
