//! Planner state (Model in TEA pattern)

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use planner_core::prelude::*;
use planner_core::{
    ContentStrategyPlanOutput, PlanDocument, PlanItemRef, PlannerEvent, StrategyConfig,
};

use crate::calendar_view::CalendarViewState;
use crate::config::Settings;
use crate::form::FormState;
use crate::gallery::GalleryState;
use crate::menu::ActionMenuState;
use crate::message::SaveTarget;
use crate::notice::{Notice, NoticeQueue};
use crate::services::{
    AccessPolicy, CreditLedger, HostBridge, LocalCreditLedger, PlannerStore, RecordingHost,
    ReservationId,
};
use crate::tracker::TrackerState;

/// Top-level view (tab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Strategy,
    Analytics,
    Calendar,
    Templates,
}

impl View {
    pub const ALL: [View; 4] = [View::Strategy, View::Analytics, View::Calendar, View::Templates];

    pub fn title(&self) -> &'static str {
        match self {
            View::Strategy => "Strategy",
            View::Analytics => "Analytics",
            View::Calendar => "Calendar",
            View::Templates => "Templates",
        }
    }

    pub fn next(&self) -> View {
        let pos = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

/// Which half of the strategy view receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyFocus {
    #[default]
    Form,
    Plan,
}

/// Cursor over the actionable items of the displayed plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanViewState {
    pub selected: usize,
}

/// Collaborators the state calls synchronously from `update()`.
#[derive(Clone)]
pub struct Services {
    pub credits: Arc<dyn CreditLedger>,
    pub host: Arc<dyn HostBridge>,
    pub store: Arc<PlannerStore>,
}

impl Services {
    /// In-process ledger, recording host and in-memory store.
    pub fn local(settings: &Settings) -> Self {
        Self {
            credits: Arc::new(LocalCreditLedger::new(settings.credits.starting_balance)),
            host: Arc::new(RecordingHost::new()),
            store: Arc::new(PlannerStore::in_memory(settings.storage.max_saved_strategies)),
        }
    }
}

pub struct AppState {
    pub view: View,
    pub focus: StrategyFocus,

    pub config: StrategyConfig,
    pub form: FormState,

    /// The displayed plan with its version counters
    pub document: Option<PlanDocument>,
    pub is_loading: bool,
    /// Last generation error
    pub error: Option<String>,

    pub plan_view: PlanViewState,
    pub action_menu: Option<ActionMenuState>,

    /// Items with a regeneration in flight, keyed to the reservation that
    /// pays for it
    pub regenerating: HashMap<PlanItemRef, ReservationId>,
    /// Saves in flight
    pub saving: HashSet<SaveTarget>,
    pub exporting: bool,

    pub tracker: TrackerState,
    pub calendar: CalendarViewState,
    pub gallery: GalleryState,
    pub notices: NoticeQueue,

    pub access: AccessPolicy,
    pub credits: Arc<dyn CreditLedger>,
    pub host: Arc<dyn HostBridge>,
    pub store: Arc<PlannerStore>,
    pub settings: Settings,
    pub rng: StdRng,

    /// Bus events produced by the last update, drained by the engine
    pub(crate) pending_events: Vec<PlannerEvent>,
    should_quit: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("view", &self.view)
            .field("config", &self.config)
            .field("generation", &self.document.as_ref().map(|d| d.generation()))
            .field("is_loading", &self.is_loading)
            .field("regenerating", &self.regenerating)
            .field("saving", &self.saving)
            .field("notices", &self.notices.len())
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State with default settings and local services.
    pub fn new() -> Self {
        let settings = Settings::default();
        let services = Services::local(&settings);
        Self::with_services(settings, services)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let services = Services::local(&settings);
        Self::with_services(settings, services)
    }

    pub fn with_services(settings: Settings, services: Services) -> Self {
        let rng = match settings.analytics.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            view: View::default(),
            focus: StrategyFocus::default(),
            config: StrategyConfig::default(),
            form: FormState::default(),
            document: None,
            is_loading: false,
            error: None,
            plan_view: PlanViewState::default(),
            action_menu: None,
            regenerating: HashMap::new(),
            saving: HashSet::new(),
            exporting: false,
            tracker: TrackerState::new(),
            calendar: CalendarViewState::new(Utc::now().date_naive()),
            gallery: GalleryState::default(),
            notices: NoticeQueue::new(),
            access: AccessPolicy::new(&settings.account, settings.flags),
            credits: services.credits,
            host: services.host,
            store: services.store,
            settings,
            rng,
            pending_events: Vec::new(),
            should_quit: false,
        }
    }

    pub fn plan(&self) -> Option<&ContentStrategyPlanOutput> {
        self.document.as_ref().map(|d| d.plan())
    }

    /// Signed-in user id, if any.
    pub fn user_id(&self) -> Option<String> {
        self.settings.account.signed_in_user().map(str::to_string)
    }

    /// Item under the plan cursor.
    pub fn selected_item(&self) -> Option<PlanItemRef> {
        let refs = self.plan()?.item_refs();
        refs.get(self.plan_view.selected.min(refs.len().saturating_sub(1)))
            .copied()
    }

    pub fn is_regenerating(&self, target: PlanItemRef) -> bool {
        self.regenerating.contains_key(&target)
    }

    /// Clear the in-flight flag for `target` if it still belongs to
    /// `reservation`. A flag set by a later dispatch is left alone.
    pub fn finish_regeneration(&mut self, target: PlanItemRef, reservation: ReservationId) {
        if self.regenerating.get(&target) == Some(&reservation) {
            self.regenerating.remove(&target);
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn notify_error(&mut self, error: &Error) {
        self.notices.push(Notice::from_error(error));
    }

    pub fn emit(&mut self, event: PlannerEvent) {
        self.pending_events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<PlannerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Templates.next(), View::Strategy);
        assert_eq!(View::Strategy.next(), View::Analytics);
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = AppState::new();
        assert!(state.plan().is_none());
        assert!(state.selected_item().is_none());
        assert!(!state.is_loading);
        assert!(state.user_id().is_none());
        assert_eq!(state.credits.available(), 25);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let mut settings = Settings::default();
        settings.analytics.seed = Some(9);
        let mut a = AppState::with_settings(settings.clone());
        let mut b = AppState::with_settings(settings);
        assert_eq!(a.rng.gen::<u64>(), b.rng.gen::<u64>());
    }
}
