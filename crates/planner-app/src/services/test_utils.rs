//! In-memory fakes of the service traits for tests.
//!
//! `FakeBackend` records every call and can be told to fail or stall.

use std::sync::Mutex;
use std::time::Duration;

use planner_core::prelude::*;
use planner_core::{ContentStrategyPlanOutput, PlanItem, PlanItemRef, StrategyConfig};

use super::offline::{compose_plan, regenerate};
use super::{
    GeneratesStrategies, PillarRecord, PlanItemRecord, RegeneratesPlanItems, RegenerationRequest,
    SavesContentPillars, SavesPlanItems, SavesStrategies, StrategyRecord,
};

/// A recorded save call.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveCall {
    pub kind: String,
    pub user_id: String,
    pub title: String,
}

#[derive(Debug, Default)]
struct FakeInner {
    generate_calls: Vec<StrategyConfig>,
    regenerate_calls: Vec<PlanItemRef>,
    save_calls: Vec<SaveCall>,
    fail_generate: Option<String>,
    fail_regenerate: Option<String>,
    fail_save: Option<String>,
    delay: Duration,
    next_id: u32,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    inner: Mutex<FakeInner>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_generate(self, message: &str) -> Self {
        self.lock().fail_generate = Some(message.to_string());
        self
    }

    pub fn failing_regenerate(self, message: &str) -> Self {
        self.lock().fail_regenerate = Some(message.to_string());
        self
    }

    pub fn failing_save(self, message: &str) -> Self {
        self.lock().fail_save = Some(message.to_string());
        self
    }

    /// Sleep before answering every call.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.lock().delay = delay;
        self
    }

    pub fn generate_calls(&self) -> Vec<StrategyConfig> {
        self.lock().generate_calls.clone()
    }

    pub fn regenerate_calls(&self) -> Vec<PlanItemRef> {
        self.lock().regenerate_calls.clone()
    }

    pub fn save_calls(&self) -> Vec<SaveCall> {
        self.lock().save_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn delay(&self) -> Duration {
        self.lock().delay
    }

    fn record_save(&self, kind: &str, user_id: &str, title: &str) -> Result<String> {
        let mut inner = self.lock();
        if let Some(message) = &inner.fail_save {
            return Err(Error::service("save", message.clone()));
        }
        inner.save_calls.push(SaveCall {
            kind: kind.to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
        });
        inner.next_id += 1;
        Ok(format!("rec-{}", inner.next_id))
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl GeneratesStrategies for FakeBackend {
    async fn generate_strategy(&self, config: &StrategyConfig) -> Result<ContentStrategyPlanOutput> {
        let failure = {
            let mut inner = self.lock();
            inner.generate_calls.push(config.clone());
            inner.fail_generate.clone()
        };
        pause(self.delay()).await;
        match failure {
            Some(message) => Err(Error::service("generate", message)),
            None => Ok(compose_plan(config)),
        }
    }
}

impl RegeneratesPlanItems for FakeBackend {
    async fn regenerate_item(&self, request: RegenerationRequest) -> Result<PlanItem> {
        let failure = {
            let mut inner = self.lock();
            inner.regenerate_calls.push(request.target);
            inner.fail_regenerate.clone()
        };
        pause(self.delay()).await;
        match failure {
            Some(message) => Err(Error::service("regenerate", message)),
            None => Ok(regenerate(&request, "fresh")),
        }
    }
}

impl SavesStrategies for FakeBackend {
    async fn save_strategy(&self, user_id: &str, record: StrategyRecord) -> Result<String> {
        pause(self.delay()).await;
        self.record_save("strategy", user_id, &record.title)
    }
}

impl SavesContentPillars for FakeBackend {
    async fn save_pillar(&self, user_id: &str, record: PillarRecord) -> Result<String> {
        pause(self.delay()).await;
        self.record_save("content pillar", user_id, &record.name)
    }
}

impl SavesPlanItems for FakeBackend {
    async fn save_plan_item(&self, user_id: &str, record: PlanItemRecord) -> Result<String> {
        pause(self.delay()).await;
        self.record_save(&record.kind, user_id, &record.title)
    }
}

/// A config that passes `can_generate`.
pub fn ready_config() -> StrategyConfig {
    StrategyConfig {
        niche: "Home coffee roasting".to_string(),
        target_audience: "Coffee hobbyists".to_string(),
        ..Default::default()
    }
}

/// A fully populated plan for `ready_config`.
pub fn test_plan() -> ContentStrategyPlanOutput {
    compose_plan(&ready_config())
}
