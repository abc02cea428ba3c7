//! Configuration file parsing for Strategy Planner
//!
//! Supports:
//! - `.planner/config.toml` - Global settings

pub mod settings;
pub mod types;

pub use settings::{data_dir, export_dir, init_config_dir, load_settings, CONFIG_FILENAME, PLANNER_DIR};
pub use types::*;
