//! Strategy form: one row per field, option picker for the focused
//! multi-select, and the Generate control.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use planner_app::{FieldKind, FormField, FormState};
use planner_core::{StrategyConfig, MAX_GOALS};

use crate::theme::styles;

use super::text::truncate;

const LABEL_WIDTH: usize = 20;

pub struct StrategyForm<'a> {
    config: &'a StrategyConfig,
    form: FormState,
    focused: bool,
    is_loading: bool,
}

impl<'a> StrategyForm<'a> {
    pub fn new(config: &'a StrategyConfig, form: FormState) -> Self {
        Self {
            config,
            form,
            focused: true,
            is_loading: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    fn field_line(&self, field: FormField, width: usize) -> Line<'static> {
        let is_focused = self.focused && self.form.focus == field;
        let marker = if is_focused { "▸ " } else { "  " };

        let mut label = field.label().to_string();
        if field.is_required() {
            label.push('*');
        }
        let label_style = if is_focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };

        let value = field.display_value(self.config);
        let value_width = width.saturating_sub(LABEL_WIDTH + 4);
        let value_span = match field.kind() {
            FieldKind::Text if is_focused => {
                Span::styled(format!("{}▏", truncate(&value, value_width.saturating_sub(1))), styles::text_primary())
            }
            FieldKind::Choice if is_focused => {
                Span::styled(format!("‹ {} ›", truncate(&value, value_width.saturating_sub(4))), styles::text_primary())
            }
            _ if value.is_empty() => Span::styled(placeholder(field), styles::text_muted()),
            _ => Span::styled(truncate(&value, value_width), styles::text_primary()),
        };

        Line::from(vec![
            Span::styled(marker, styles::accent()),
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
            value_span,
        ])
    }

    /// Checkbox row for the focused multi-select field
    fn option_lines(&self) -> Vec<Line<'static>> {
        let field = self.form.focus;
        if !self.focused || field.kind() != FieldKind::MultiSelect {
            return Vec::new();
        }

        let mut spans = vec![Span::raw("    ")];
        for (i, option) in field.options().iter().enumerate() {
            let mark = if field.is_selected(self.config, i) { "[x]" } else { "[ ]" };
            let style = if i == self.form.option_cursor {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!("{} {}", mark, option), style));
            spans.push(Span::raw("  "));
        }

        let mut lines = vec![Line::from(spans)];
        if field == FormField::Goals {
            lines.push(Line::from(Span::styled(
                format!("    {} of {} goals selected", self.config.goals.len(), MAX_GOALS),
                styles::text_muted(),
            )));
        }
        lines
    }

    fn generate_line(&self) -> Line<'static> {
        if self.is_loading {
            return Line::from(Span::styled(
                "  ⠋ Generating strategy…",
                styles::accent_bold(),
            ));
        }

        let (button_style, hint) = if self.config.can_generate() {
            (styles::focused_selected(), String::new())
        } else {
            (
                styles::disabled(),
                format!("  fill in: {}", self.config.missing_fields().join(", ")),
            )
        };
        Line::from(vec![
            Span::raw("  "),
            Span::styled(" Generate strategy ", button_style),
            Span::styled(" Ctrl+g", styles::keybinding()),
            Span::styled(hint, styles::text_muted().add_modifier(Modifier::ITALIC)),
        ])
    }
}

fn placeholder(field: FormField) -> String {
    match field {
        FormField::Niche => "e.g. vegan baking".to_string(),
        FormField::TargetAudience => "e.g. busy home bakers".to_string(),
        _ => "none".to_string(),
    }
}

impl Widget for StrategyForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(" Strategy inputs ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let mut lines = Vec::new();
        for field in FormField::ALL {
            lines.push(self.field_line(field, width));
            if self.form.focus == field {
                lines.extend(self.option_lines());
            }
        }
        lines.push(Line::from(""));
        lines.push(self.generate_line());

        Paragraph::new(lines)
            .style(Style::default())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use planner_app::test_utils::ready_config;

    fn render(config: &StrategyConfig, form: FormState, loading: bool) -> TestTerminal {
        let mut term = TestTerminal::with_size(100, 30);
        let area = term.area();
        term.render_widget(StrategyForm::new(config, form).loading(loading), area);
        term
    }

    #[test]
    fn test_generate_disabled_until_required_fields_set() {
        let config = StrategyConfig::default();
        let term = render(&config, FormState::default(), false);

        assert!(term.buffer_contains("Generate strategy"));
        assert!(term.buffer_contains("fill in: niche, target audience"));

        let row = term.find_line("Generate strategy").unwrap();
        let buffer = term.buffer();
        let dimmed = (0..100)
            .filter_map(|x| buffer.cell((x, row)))
            .any(|c| c.modifier.contains(Modifier::DIM));
        assert!(dimmed);
    }

    #[test]
    fn test_generate_enabled_with_valid_config() {
        let config = ready_config();
        let term = render(&config, FormState::default(), false);

        assert!(term.buffer_contains("Generate strategy"));
        assert!(!term.buffer_contains("fill in:"));
        assert!(term.buffer_contains(&config.niche));
    }

    #[test]
    fn test_loading_replaces_generate_control() {
        let config = ready_config();
        let term = render(&config, FormState::default(), true);

        assert!(term.buffer_contains("Generating strategy"));
        assert!(!term.buffer_contains("Generate strategy "));
    }

    #[test]
    fn test_focused_multiselect_shows_options() {
        let config = StrategyConfig::default();
        let form = FormState {
            focus: FormField::Goals,
            option_cursor: 0,
        };
        let term = render(&config, form, false);

        assert!(term.buffer_contains("[x]"));
        assert!(term.buffer_contains("goals selected"));
    }

    #[test]
    fn test_required_fields_are_marked() {
        let term = render(&StrategyConfig::default(), FormState::default(), false);
        assert!(term.buffer_contains("Niche*"));
        assert!(term.buffer_contains("Target audience*"));
        assert!(term.buffer_contains("e.g. busy home bakers"));
    }
}
