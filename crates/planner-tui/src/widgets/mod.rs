//! Widget components for the planner TUI

mod action_menu;
mod analytics;
mod calendar;
mod header;
pub mod modal_overlay;
mod notice;
mod plan_view;
mod status_bar;
mod strategy_form;
mod tabs;
mod templates;
pub mod text;

pub use action_menu::ActionMenu;
pub use analytics::AnalyticsView;
pub use calendar::CalendarView;
pub use header::MainHeader;
pub use notice::NoticeModal;
pub use plan_view::PlanView;
pub use status_bar::StatusBar;
pub use strategy_form::StrategyForm;
pub use tabs::ViewTabs;
pub use templates::TemplateGallery;
