//! Template gallery: search box, tier filter, template list with access
//! badges, and the selected template's details.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use planner_app::services::AccessPolicy;
use planner_app::GalleryState;
use planner_core::StrategyTemplate;

use crate::layout::split_panes;
use crate::theme::styles;

use super::text::truncate;

pub struct TemplateGallery<'a> {
    gallery: &'a GalleryState,
    access: &'a AccessPolicy,
}

impl<'a> TemplateGallery<'a> {
    pub fn new(gallery: &'a GalleryState, access: &'a AccessPolicy) -> Self {
        Self { gallery, access }
    }

    fn render_search(&self, area: Rect, buf: &mut Buffer) {
        let tier = self
            .gallery
            .tier_filter
            .map(|t| t.label())
            .unwrap_or("All tiers");
        let block = styles::glass_block(true).title(format!(" Search · {} ", tier));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.gallery.query.is_empty() {
            Line::from(Span::styled(
                "Type to search, Tab cycles the tier",
                styles::text_muted(),
            ))
        } else {
            Line::from(vec![
                Span::styled(self.gallery.query.clone(), styles::text_primary()),
                Span::styled("▏", styles::accent()),
            ])
        };
        Paragraph::new(line).render(inner, buf);
    }

    fn render_list(&self, templates: &[&StrategyTemplate], area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(format!(" Templates ({}) ", templates.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if templates.is_empty() {
            Paragraph::new(Span::styled("No templates match.", styles::text_muted()))
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let offset = self.gallery.selected.saturating_sub(height.saturating_sub(1));
        let width = inner.width as usize;

        let lines: Vec<Line> = templates
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, template)| {
                let locked = !self.access.can_use(template.tier);
                let badge = format!(" {:<8}", template.tier.label());
                let marker = if locked { "🔒 " } else { "   " };
                let name_width = width.saturating_sub(badge.chars().count() + 3);
                let name_style = if i == self.gallery.selected {
                    styles::focused_selected()
                } else if locked {
                    styles::disabled()
                } else {
                    styles::text_primary()
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("{:<w$}", truncate(template.name, name_width), w = name_width), name_style),
                    Span::styled(badge, styles::tier_style(template.tier)),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_details(&self, template: Option<&StrategyTemplate>, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Details ");
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(template) = template else {
            return;
        };

        let platforms: Vec<&str> = template.platforms.iter().map(|p| p.label()).collect();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(template.name, styles::accent_bold()),
                Span::styled(format!("  {}", template.tier.label()), styles::tier_style(template.tier)),
            ]),
            Line::from(Span::styled(template.category, styles::text_secondary())),
            Line::from(""),
            Line::from(Span::styled(template.description, styles::text_primary())),
            Line::from(""),
            field_line("Pillars", &template.pillars.join(", ")),
            field_line("Platforms", &platforms.join(", ")),
            field_line("Frequency", template.advanced.posting_frequency),
            field_line("Content mix", template.advanced.content_mix),
            field_line("Automation", template.advanced.automation_level),
            Line::from(""),
        ];

        if self.access.can_use(template.tier) {
            lines.push(Line::from(Span::styled(
                "Enter loads this template into the strategy form",
                styles::status_green(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Requires the {} plan", template.tier.label()),
                styles::status_yellow(),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

fn field_line<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), styles::text_muted()),
        Span::styled(value.to_string(), styles::text_primary()),
    ])
}

impl Widget for TemplateGallery<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let templates = self.gallery.visible();
        let selected = templates.get(self.gallery.selected).copied();

        let (left, right) = split_panes(area, 50);
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(left);

        self.render_search(search_area, buf);
        self.render_list(&templates, list_area, buf);
        self.render_details(selected, right, buf);
    }
}
