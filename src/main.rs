//! Strategy Planner - plan content strategies from the terminal
//!
//! This is the binary entry point. All logic lives in the libraries.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result};

use planner_app::config::{self, FeatureFlags, Settings};
use planner_app::Engine;
use planner_core::ExportFormat;
use strategy_planner::{run_headless, HeadlessOptions};

/// Strategy Planner - plan content strategies from the terminal
#[derive(Parser, Debug)]
#[command(name = "splan")]
#[command(about = "Plan, refine and schedule content strategies", long_about = None)]
struct Args {
    /// Project directory holding `.planner/config.toml`
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Template id to load before generating (headless)
    #[arg(long, value_name = "ID")]
    template: Option<String>,

    /// Business niche (headless)
    #[arg(long)]
    niche: Option<String>,

    /// Target audience (headless)
    #[arg(long)]
    audience: Option<String>,

    /// Export the generated strategy (headless)
    #[arg(long, value_enum, value_name = "FORMAT")]
    export: Option<ExportArg>,

    /// Signed-in user id, overrides the config file
    #[arg(long, value_name = "ID")]
    user: Option<String>,

    /// Enable developer overrides
    #[arg(long)]
    dev: bool,

    /// Grant premium access (requires --dev)
    #[arg(long)]
    force_premium: bool,

    /// Grant ultimate access (requires --dev)
    #[arg(long)]
    force_ultimate: bool,

    /// Grant premium access in any build
    #[arg(long)]
    emergency_premium: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportArg {
    Pdf,
    Json,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Pdf => ExportFormat::Pdf,
            ExportArg::Json => ExportFormat::Json,
        }
    }
}

impl Args {
    fn flags(&self) -> FeatureFlags {
        FeatureFlags {
            dev_mode: self.dev,
            force_premium: self.force_premium,
            emergency_premium: self.emergency_premium,
            force_ultimate: self.force_ultimate,
        }
    }

    /// Settings from the project file with CLI values on top.
    fn settings(&self, project_path: &std::path::Path) -> Settings {
        let mut settings = config::load_settings(project_path);
        if let Some(user) = &self.user {
            settings.account.user_id = user.clone();
        }
        settings.flags = settings.flags.merged_with(self.flags());
        if self.headless {
            settings.export.open_in_browser = false;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = planner_core::logging::init() {
        eprintln!("Logging disabled: {}", e);
    }

    let project_path = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if let Err(e) = config::init_config_dir(&project_path) {
        tracing::warn!("Failed to initialize .planner directory: {}", e);
    }
    let settings = args.settings(&project_path);
    let mut engine = Engine::from_settings(project_path, settings);

    if args.headless {
        let options = HeadlessOptions {
            template: args.template,
            niche: args.niche,
            audience: args.audience,
            export: args.export.map(ExportFormat::from),
        };
        let outcome = run_headless(&mut engine, options, std::io::stdout()).await?;
        if !outcome.generated {
            bail!("no strategy was generated");
        }
        return Ok(());
    }

    planner_tui::run(&mut engine).await?;
    Ok(())
}
