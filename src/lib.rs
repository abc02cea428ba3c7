//! Strategy Planner
//!
//! Binary-level glue: the headless NDJSON runner. The planner itself lives
//! in `planner-app`, the terminal UI in `planner-tui`.

pub mod headless;

pub use headless::{run_headless, HeadlessOptions, HeadlessOutcome};
