//! planner-app - Planner state and orchestration for Strategy Planner
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! the Engine abstraction for shared orchestration, configuration loading, the
//! service traits at the host boundary, and the credit and export gates.

pub mod actions;
pub mod calendar_view;
pub mod config;
pub mod engine;
pub mod export;
pub mod form;
pub mod gallery;
pub mod handler;
pub mod input_key;
pub mod menu;
pub mod message;
pub mod notice;
pub mod process;
pub mod services;
pub mod signals;
pub mod state;
pub mod tracker;

// Re-export primary types
pub use calendar_view::{CalendarFocus, CalendarViewState};
pub use engine::Engine;
pub use form::{FieldKind, FormField, FormState};
pub use gallery::GalleryState;
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use menu::{ActionMenuState, ItemAction};
pub use message::{Message, SaveTarget};
pub use notice::{Notice, NoticeCategory, NoticeQueue};
pub use services::{OfflineBackend, PlannerBackend, PlannerStore};
pub use state::{AppState, PlanViewState, Services, StrategyFocus, View};
pub use tracker::TrackerState;

#[cfg(any(test, feature = "test-helpers"))]
pub use services::test_utils;
