//! Template gallery: tier filter, search and the access-checked load.

use planner_core::{
    filter_templates, find_template, template_config, StrategyConfigPatch, StrategyTemplate,
    TemplateTier,
};

use crate::services::AccessPolicy;

/// Result of asking to load a template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateLoad {
    Applied(StrategyConfigPatch),
    UpgradeRequired(TemplateTier),
    NotFound,
}

/// Check access and look up the config patch for template `id`.
pub fn load_template(id: &str, access: &AccessPolicy) -> TemplateLoad {
    let Some(template) = find_template(id) else {
        return TemplateLoad::NotFound;
    };
    if !access.can_use(template.tier) {
        return TemplateLoad::UpgradeRequired(template.tier);
    }
    match template_config(id) {
        Some(patch) => TemplateLoad::Applied(patch),
        None => TemplateLoad::NotFound,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    pub tier_filter: Option<TemplateTier>,
    pub query: String,
    pub selected: usize,
}

impl GalleryState {
    pub fn visible(&self) -> Vec<&'static StrategyTemplate> {
        filter_templates(self.tier_filter, &self.query)
    }

    pub fn selected_template(&self) -> Option<&'static StrategyTemplate> {
        self.visible().get(self.selected).copied()
    }

    /// All → Free → Premium → Ultimate → All.
    pub fn cycle_tier(&mut self) {
        self.tier_filter = match self.tier_filter {
            None => Some(TemplateTier::Free),
            Some(TemplateTier::Free) => Some(TemplateTier::Premium),
            Some(TemplateTier::Premium) => Some(TemplateTier::Ultimate),
            Some(TemplateTier::Ultimate) => None,
        };
        self.selected = 0;
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountSettings, FeatureFlags};

    fn free_user() -> AccessPolicy {
        AccessPolicy::new(&AccountSettings::default(), FeatureFlags::default())
    }

    #[test]
    fn test_free_template_applies() {
        assert!(matches!(
            load_template("personal-brand", &free_user()),
            TemplateLoad::Applied(_)
        ));
    }

    #[test]
    fn test_ultimate_template_requires_upgrade() {
        assert_eq!(
            load_template("ultimate-omnichannel", &free_user()),
            TemplateLoad::UpgradeRequired(TemplateTier::Ultimate)
        );
    }

    #[test]
    fn test_premium_user_cannot_load_ultimate() {
        let access = AccessPolicy::new(
            &AccountSettings {
                premium: true,
                ..Default::default()
            },
            FeatureFlags::default(),
        );
        assert!(matches!(load_template("ecommerce-growth", &access), TemplateLoad::Applied(_)));
        assert_eq!(
            load_template("ultimate-viral-growth", &access),
            TemplateLoad::UpgradeRequired(TemplateTier::Ultimate)
        );
    }

    #[test]
    fn test_unknown_template() {
        assert_eq!(load_template("missing", &free_user()), TemplateLoad::NotFound);
    }

    #[test]
    fn test_tier_filter_and_search_reset_selection() {
        let mut gallery = GalleryState {
            selected: 5,
            ..Default::default()
        };
        gallery.cycle_tier();
        assert_eq!(gallery.tier_filter, Some(TemplateTier::Free));
        assert_eq!(gallery.selected, 0);
        assert_eq!(gallery.visible().len(), 8);

        gallery.select_previous();
        assert_eq!(gallery.selected, 7);
        gallery.push_query('p');
        assert_eq!(gallery.selected, 0);

        for _ in 0..3 {
            gallery.cycle_tier();
        }
        assert_eq!(gallery.tier_filter, None);
    }
}
