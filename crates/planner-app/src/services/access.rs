//! Subscription access decisions.

use planner_core::prelude::*;
use planner_core::TemplateTier;

use crate::config::{AccountSettings, FeatureFlags};

/// Plan ids that include ultimate features.
pub const ULTIMATE_PLAN_IDS: &[&str] = &["ultimate_monthly", "ultimate_yearly", "enterprise"];

/// Answers "may this user use X". Built once from settings and CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    pub plan_id: String,
    pub premium: bool,
    pub flags: FeatureFlags,
}

impl AccessPolicy {
    pub fn new(account: &AccountSettings, flags: FeatureFlags) -> Self {
        let policy = Self {
            plan_id: account.plan_id.trim().to_string(),
            premium: account.premium,
            flags,
        };
        for flag in flags.active_overrides() {
            warn!("Access override active: {}", flag);
        }
        policy
    }

    fn ultimate_plan(&self) -> bool {
        ULTIMATE_PLAN_IDS.contains(&self.plan_id.as_str())
    }

    pub fn is_premium(&self) -> bool {
        self.premium
            || self.ultimate_plan()
            || self.flags.emergency_premium
            || (self.flags.dev_mode && (self.flags.force_premium || self.flags.force_ultimate))
    }

    pub fn has_ultimate_access(&self) -> bool {
        self.ultimate_plan() || (self.flags.dev_mode && self.flags.force_ultimate)
    }

    pub fn can_use(&self, tier: TemplateTier) -> bool {
        match tier {
            TemplateTier::Free => true,
            TemplateTier::Premium => self.is_premium(),
            TemplateTier::Ultimate => self.has_ultimate_access(),
        }
    }

    /// Highest tier this user can use.
    pub fn tier(&self) -> TemplateTier {
        if self.has_ultimate_access() {
            TemplateTier::Ultimate
        } else if self.is_premium() {
            TemplateTier::Premium
        } else {
            TemplateTier::Free
        }
    }
}
