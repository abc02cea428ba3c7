//! Configuration types for Strategy Planner
//!
//! Defines:
//! - `Settings` - Global application settings loaded from `.planner/config.toml`
//! - `FeatureFlags` - Startup-injected access overrides
//! - Related sub-sections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global settings from `.planner/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub account: AccountSettings,

    #[serde(default)]
    pub credits: CreditSettings,

    #[serde(default)]
    pub generation: GenerationSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub analytics: AnalyticsSettings,

    #[serde(default)]
    pub flags: FeatureFlags,
}

/// Signed-in user and subscription
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AccountSettings {
    /// User id; empty means signed out
    #[serde(default)]
    pub user_id: String,

    /// Subscription plan id (e.g. "pro_monthly", "ultimate_yearly")
    #[serde(default)]
    pub plan_id: String,

    /// Whether the subscription is paid
    #[serde(default)]
    pub premium: bool,
}

impl AccountSettings {
    pub fn signed_in_user(&self) -> Option<&str> {
        let id = self.user_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreditSettings {
    /// Starting balance of the local credit ledger
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u32,

    /// Credits charged per item regeneration
    #[serde(default = "default_regenerate_cost")]
    pub regenerate_cost: u32,
}

impl Default for CreditSettings {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            regenerate_cost: default_regenerate_cost(),
        }
    }
}

fn default_starting_balance() -> u32 {
    25
}

fn default_regenerate_cost() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationSettings {
    /// Seconds before a generation or regeneration call is abandoned
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Exports allowed for free accounts
    #[serde(default = "default_free_export_limit")]
    pub free_export_limit: u32,

    /// Delay before the print dialog opens in the exported HTML
    #[serde(default = "default_print_delay_ms")]
    pub print_delay_ms: u64,

    /// Where exports are written (default: `<data dir>/strategy-planner/exports`)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Open PDF exports in the browser after writing
    #[serde(default = "default_true")]
    pub open_in_browser: bool,

    /// Browser command; empty = system default
    #[serde(default)]
    pub browser: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            free_export_limit: default_free_export_limit(),
            print_delay_ms: default_print_delay_ms(),
            output_dir: None,
            open_in_browser: true,
            browser: String::new(),
        }
    }
}

fn default_free_export_limit() -> u32 {
    5
}

fn default_print_delay_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Locally saved strategies kept, newest first
    #[serde(default = "default_max_saved_strategies")]
    pub max_saved_strategies: usize,

    /// Store location (default: `<data dir>/strategy-planner`)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            max_saved_strategies: default_max_saved_strategies(),
            data_dir: None,
        }
    }
}

fn default_max_saved_strategies() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyticsSettings {
    /// Seconds between simulated metric updates
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Days of simulated history per tracked topic
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Fixed seed for reproducible simulations
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            history_days: default_history_days(),
            seed: None,
        }
    }
}

fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_history_days() -> u32 {
    14
}

/// Access overrides, injected once at startup.
///
/// `force_premium` and `force_ultimate` only apply when `dev_mode` is set.
/// `emergency_premium` applies in any build and grants premium, not ultimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub dev_mode: bool,

    #[serde(default)]
    pub force_premium: bool,

    #[serde(default)]
    pub emergency_premium: bool,

    #[serde(default)]
    pub force_ultimate: bool,
}

impl FeatureFlags {
    /// Overrides that will actually change access decisions.
    pub fn active_overrides(&self) -> Vec<&'static str> {
        let mut active = Vec::new();
        if self.dev_mode && self.force_premium {
            active.push("force_premium");
        }
        if self.dev_mode && self.force_ultimate {
            active.push("force_ultimate");
        }
        if self.emergency_premium {
            active.push("emergency_premium");
        }
        active
    }

    /// Merge CLI switches over file values. CLI can only turn flags on.
    pub fn merged_with(self, cli: FeatureFlags) -> FeatureFlags {
        FeatureFlags {
            dev_mode: self.dev_mode || cli.dev_mode,
            force_premium: self.force_premium || cli.force_premium,
            emergency_premium: self.emergency_premium || cli.emergency_premium,
            force_ultimate: self.force_ultimate || cli.force_ultimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.export.free_export_limit, 5);
        assert_eq!(settings.export.print_delay_ms, 500);
        assert_eq!(settings.storage.max_saved_strategies, 10);
        assert_eq!(settings.analytics.refresh_interval_secs, 30);
        assert_eq!(settings.generation.timeout_secs, 120);
        assert_eq!(settings.credits.regenerate_cost, 1);
        assert!(settings.account.signed_in_user().is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
[account]
user_id = "u-1"

[export]
free_export_limit = 3
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.account.signed_in_user(), Some("u-1"));
        assert_eq!(settings.export.free_export_limit, 3);
        assert_eq!(settings.export.print_delay_ms, 500);
        assert!(settings.export.open_in_browser);
    }

    #[test]
    fn test_dev_overrides_need_dev_mode() {
        let flags = FeatureFlags {
            force_premium: true,
            force_ultimate: true,
            ..Default::default()
        };
        assert!(flags.active_overrides().is_empty());

        let flags = FeatureFlags {
            dev_mode: true,
            ..flags
        };
        assert_eq!(flags.active_overrides(), vec!["force_premium", "force_ultimate"]);
    }

    #[test]
    fn test_emergency_premium_without_dev_mode() {
        let flags = FeatureFlags {
            emergency_premium: true,
            ..Default::default()
        };
        assert_eq!(flags.active_overrides(), vec!["emergency_premium"]);
    }

    #[test]
    fn test_cli_flags_merge() {
        let file = FeatureFlags {
            dev_mode: true,
            ..Default::default()
        };
        let cli = FeatureFlags {
            force_ultimate: true,
            ..Default::default()
        };
        let merged = file.merged_with(cli);
        assert!(merged.dev_mode && merged.force_ultimate);
        assert!(!merged.force_premium);
    }

    #[test]
    fn test_blank_user_id_is_signed_out() {
        let account = AccountSettings {
            user_id: "   ".to_string(),
            ..Default::default()
        };
        assert!(account.signed_in_user().is_none());
    }
}
