//! Settings loading and default directories

use std::path::{Path, PathBuf};

use planner_core::analytics::MAX_HISTORY_DAYS;
use planner_core::prelude::*;

use super::types::Settings;

pub const PLANNER_DIR: &str = ".planner";
pub const CONFIG_FILENAME: &str = "config.toml";

const APP_DIR_NAME: &str = "strategy-planner";

/// Load settings from .planner/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(PLANNER_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                validated(settings)
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Pull out-of-range values back into range, warning about each.
fn validated(mut settings: Settings) -> Settings {
    let days = settings.analytics.history_days;
    let clamped = days.clamp(1, MAX_HISTORY_DAYS);
    if clamped != days {
        warn!(
            "analytics.history_days = {} is out of range, using {}",
            days, clamped
        );
        settings.analytics.history_days = clamped;
    }
    settings
}

/// Create .planner/config.toml with commented defaults if missing
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let planner_dir = project_path.join(PLANNER_DIR);

    if !planner_dir.exists() {
        std::fs::create_dir_all(&planner_dir)
            .map_err(|e| Error::config(format!("Failed to create .planner dir: {}", e)))?;
        info!("Created .planner directory");
    }

    let config_path = planner_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config.toml");
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Strategy Planner Configuration

[account]
user_id = ""            # Empty = signed out; saving and regeneration need a user
plan_id = ""            # e.g. "pro_monthly", "ultimate_yearly", "enterprise"
premium = false

[credits]
starting_balance = 25
regenerate_cost = 1

[generation]
timeout_secs = 120

[export]
free_export_limit = 5
print_delay_ms = 500
open_in_browser = true
browser = ""            # Empty = system default
# output_dir = "/path/to/exports"

[storage]
max_saved_strategies = 10
# data_dir = "/path/to/store"

[analytics]
refresh_interval_secs = 30
history_days = 14
# seed = 42             # Fixed seed for reproducible simulations

[flags]
dev_mode = false
force_premium = false   # Only with dev_mode
force_ultimate = false  # Only with dev_mode
emergency_premium = false
"#;

/// Directory holding the local store
pub fn data_dir(settings: &Settings) -> PathBuf {
    settings.storage.data_dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    })
}

/// Directory exports are written to
pub fn export_dir(settings: &Settings) -> PathBuf {
    settings
        .export
        .output_dir
        .clone()
        .unwrap_or_else(|| data_dir(settings).join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_load_settings_invalid_toml_falls_back() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(PLANNER_DIR)).unwrap();
        std::fs::write(
            dir.path().join(PLANNER_DIR).join(CONFIG_FILENAME),
            "[export\nbroken",
        )
        .unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();

        let path = dir.path().join(PLANNER_DIR).join(CONFIG_FILENAME);
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Settings = toml::from_str(&content).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_init_config_dir_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let planner_dir = dir.path().join(PLANNER_DIR);
        std::fs::create_dir_all(&planner_dir).unwrap();
        std::fs::write(planner_dir.join(CONFIG_FILENAME), "[account]\nuser_id = \"kept\"\n").unwrap();

        init_config_dir(dir.path()).unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.account.user_id, "kept");
    }

    #[test]
    fn test_history_days_clamped_on_load() {
        let dir = tempdir().unwrap();
        let planner_dir = dir.path().join(PLANNER_DIR);
        std::fs::create_dir_all(&planner_dir).unwrap();
        let path = planner_dir.join(CONFIG_FILENAME);

        std::fs::write(&path, "[analytics]\nhistory_days = 100000000\n").unwrap();
        assert_eq!(load_settings(dir.path()).analytics.history_days, MAX_HISTORY_DAYS);

        std::fs::write(&path, "[analytics]\nhistory_days = 0\n").unwrap();
        assert_eq!(load_settings(dir.path()).analytics.history_days, 1);

        std::fs::write(&path, "[analytics]\nhistory_days = 30\n").unwrap();
        assert_eq!(load_settings(dir.path()).analytics.history_days, 30);
    }

    #[test]
    fn test_export_dir_override() {
        let mut settings = Settings::default();
        settings.export.output_dir = Some(PathBuf::from("/tmp/out"));
        assert_eq!(export_dir(&settings), PathBuf::from("/tmp/out"));

        settings.export.output_dir = None;
        settings.storage.data_dir = Some(PathBuf::from("/tmp/data"));
        assert_eq!(export_dir(&settings), PathBuf::from("/tmp/data/exports"));
    }
}
