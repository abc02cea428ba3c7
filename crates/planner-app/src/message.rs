//! Message types for the planner (TEA pattern)

use planner_core::{
    ContentStrategyPlanOutput, ExportFormat, ItemStamp, PlanItem, PlanItemRef, SavedKind,
    StrategyConfig,
};
use uuid::Uuid;

use crate::input_key::InputKey;
use crate::menu::ItemAction;
use crate::services::ReservationId;
use crate::state::View;

/// What a save-to-tab action is saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveTarget {
    Strategy,
    Item(PlanItemRef),
}

impl SaveTarget {
    pub fn saved_kind(&self) -> SavedKind {
        match self {
            SaveTarget::Strategy => SavedKind::Strategy,
            SaveTarget::Item(target) => SavedKind::for_item(*target),
        }
    }
}

/// All possible messages in the planner
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from the front end
    Key(InputKey),

    Quit,

    SwitchView(View),
    NextView,

    /// Dismiss the notice currently shown
    DismissNotice,

    // ─────────────────────────────────────────────────────────
    // Strategy form
    // ─────────────────────────────────────────────────────────
    /// Host replaced the whole config
    SetStrategyConfig(Box<StrategyConfig>),
    FormFocusNext,
    FormFocusPrevious,
    /// Move the highlighted option, or cycle a single-choice field
    FormOptionNext,
    FormOptionPrevious,
    /// Toggle the highlighted option or flip a toggle field
    FormToggle,
    FormInput(char),
    FormBackspace,
    FormClearField,
    FocusPlan,
    FocusForm,

    // ─────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────
    GenerateStrategy,
    StrategyGenerated {
        plan: Box<ContentStrategyPlanOutput>,
    },
    StrategyGenerationFailed {
        error: String,
    },
    /// Host pushed a new plan
    SetStrategyPlan(Box<ContentStrategyPlanOutput>),

    // ─────────────────────────────────────────────────────────
    // Plan view and item menus
    // ─────────────────────────────────────────────────────────
    PlanSelectNext,
    PlanSelectPrevious,
    PlanSectionNext,
    PlanSectionPrevious,
    OpenActionMenu {
        target: PlanItemRef,
    },
    CloseActionMenu,
    MenuSelectNext,
    MenuSelectPrevious,
    /// Run the highlighted menu entry
    MenuActivate,
    /// Run an item action directly
    ItemAction {
        target: PlanItemRef,
        action: ItemAction,
    },

    // ─────────────────────────────────────────────────────────
    // Regeneration
    // ─────────────────────────────────────────────────────────
    RegenerateItem {
        target: PlanItemRef,
    },
    ItemRegenerated {
        target: PlanItemRef,
        reservation: ReservationId,
        expected: ItemStamp,
        item: Box<PlanItem>,
    },
    ItemRegenerationFailed {
        target: PlanItemRef,
        reservation: ReservationId,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Saving and host hand-offs
    // ─────────────────────────────────────────────────────────
    SaveItem {
        target: PlanItemRef,
    },
    SaveStrategy,
    Saved {
        target: SaveTarget,
        record_id: String,
        title: String,
    },
    SaveFailed {
        target: SaveTarget,
        error: String,
    },
    /// Keep a copy of the plan in the local store
    StoreStrategyLocally,
    StrategyStoredLocally {
        saved_count: usize,
    },
    SendToCanvas {
        target: PlanItemRef,
    },
    SendMindMap,
    AddScheduleToCalendar,
    CopyItem {
        target: PlanItemRef,
    },
    Copied {
        title: String,
    },

    // ─────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────
    Export(ExportFormat),
    ExportCompleted {
        format: ExportFormat,
        path: String,
        export_count: u32,
    },
    ExportFailed {
        format: ExportFormat,
        error: String,
    },

    /// A background operation failed with no more specific handling
    OperationFailed {
        operation: String,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Analytics
    // ─────────────────────────────────────────────────────────
    TopicInput(char),
    TopicBackspace,
    TopicClearInput,
    /// Track the typed topic
    TrackTopic,
    TrackNamedTopic(String),
    RemoveTopic {
        id: Uuid,
    },
    RemoveSelectedTopic,
    TopicSelectNext,
    TopicSelectPrevious,
    /// Refresh ticker fired
    AnalyticsTick,

    // ─────────────────────────────────────────────────────────
    // Calendar
    // ─────────────────────────────────────────────────────────
    CalendarMoveDays(i64),
    CalendarMonthNext,
    CalendarMonthPrevious,
    CalendarFocusNext,
    CalendarCursorNext,
    CalendarCursorPrevious,
    CalendarCycleFilter,
    CalendarInput(char),
    CalendarBackspace,
    /// Enter: schedule or add idea from the typed title, or promote an idea
    CalendarSubmit,
    CalendarCycleStatus,
    CalendarDelete,

    // ─────────────────────────────────────────────────────────
    // Templates
    // ─────────────────────────────────────────────────────────
    GallerySelectNext,
    GallerySelectPrevious,
    GalleryCycleTier,
    GalleryInput(char),
    GalleryBackspace,
    GalleryClearSearch,
    LoadSelectedTemplate,
    LoadTemplate {
        id: String,
    },
}
