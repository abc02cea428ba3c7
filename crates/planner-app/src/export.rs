//! Export rendering: a printable HTML document and a JSON snapshot.
//!
//! Rendering is pure. Writing the file, counting the export and opening a
//! browser happen in the action executor.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use planner_core::prelude::*;
use planner_core::{ContentStrategyPlanOutput, ExportFormat, PlanSection, StrategyConfig};

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex"));

/// File name for an export, e.g. `content-strategy-vegan-baking-20240314-093000.html`.
pub fn export_file_name(niche: &str, format: ExportFormat, now: DateTime<Utc>) -> String {
    let lower = niche.trim().to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "strategy" } else { slug };
    format!(
        "content-strategy-{}-{}.{}",
        slug,
        now.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    exported_at: DateTime<Utc>,
    config: &'a StrategyConfig,
    plan: &'a ContentStrategyPlanOutput,
}

pub fn render_json(
    config: &StrategyConfig,
    plan: &ContentStrategyPlanOutput,
    now: DateTime<Utc>,
) -> Result<String> {
    let doc = ExportDocument {
        exported_at: now,
        config,
        plan,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn render(
    format: ExportFormat,
    config: &StrategyConfig,
    plan: &ContentStrategyPlanOutput,
    print_delay_ms: u64,
    now: DateTime<Utc>,
) -> Result<String> {
    match format {
        ExportFormat::Pdf => Ok(render_html(config, plan, print_delay_ms, now)),
        ExportFormat::Json => render_json(config, plan, now),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
  body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; color: #1f2937; margin: 40px; line-height: 1.5; }
  h1 { color: #4f46e5; margin-bottom: 4px; }
  .meta { color: #6b7280; font-size: 13px; margin-bottom: 32px; }
  h2 { border-bottom: 2px solid #e5e7eb; padding-bottom: 4px; margin-top: 32px; }
  .item { border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px 16px; margin: 12px 0; page-break-inside: avoid; }
  .item h3 { margin: 0 0 6px 0; font-size: 16px; }
  .item p { margin: 2px 0; }
  ul { margin: 4px 0 4px 20px; padding: 0; }
  @media print { body { margin: 16px; } }
"#;

/// Self-contained printable document that opens the print dialog on load.
pub fn render_html(
    config: &StrategyConfig,
    plan: &ContentStrategyPlanOutput,
    print_delay_ms: u64,
    now: DateTime<Utc>,
) -> String {
    let title = format!("Content Strategy: {}", config.niche.trim());
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", escape(&title)));
    html.push_str(&format!(
        "<div class=\"meta\">{} &middot; Generated {}</div>\n",
        escape(&config.summary_line()),
        now.format("%B %-d, %Y")
    ));

    for section in PlanSection::ALL {
        if section.is_empty(plan) {
            continue;
        }
        html.push_str(&format!("<section>\n<h2>{}</h2>\n", escape(section.title())));

        let lines = section.section_lines(plan);
        if !lines.is_empty() {
            html.push_str("<ul>\n");
            for line in &lines {
                html.push_str(&format!("<li>{}</li>\n", escape(line)));
            }
            html.push_str("</ul>\n");
        }

        for target in section.item_refs(plan) {
            let Some(item) = plan.item(target) else {
                continue;
            };
            html.push_str("<div class=\"item\">\n");
            let text = item.to_text();
            let mut text_lines = text.lines();
            if let Some(heading) = text_lines.next() {
                html.push_str(&format!("<h3>{}</h3>\n", escape(heading)));
            }
            for line in text_lines.filter(|l| !l.trim().is_empty()) {
                html.push_str(&format!("<p>{}</p>\n", escape(line)));
            }
            html.push_str("</div>\n");
        }

        html.push_str("</section>\n");
    }

    html.push_str(&format!(
        "<script>\n  window.addEventListener('load', function () {{ setTimeout(function () {{ window.print(); }}, {}); }});\n</script>\n",
        print_delay_ms
    ));
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_utils::{ready_config, test_plan};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_file_name_slug() {
        assert_eq!(
            export_file_name("  Vegan Baking & Co. ", ExportFormat::Pdf, at()),
            "content-strategy-vegan-baking-co-20240314-093000.html"
        );
        assert_eq!(
            export_file_name("!!!", ExportFormat::Json, at()),
            "content-strategy-strategy-20240314-093000.json"
        );
    }

    #[test]
    fn test_html_prints_after_delay() {
        let html = render_html(&ready_config(), &test_plan(), 500, at());
        assert!(html.contains("window.print()"));
        assert!(html.contains("}, 500);"));
        assert!(html.contains("<h2>Strategic Goals</h2>"));
        assert!(html.contains("<h2>Compliance</h2>"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let mut config = ready_config();
        config.niche = "<script>alert(1)</script>".to_string();
        let html = render_html(&config, &ContentStrategyPlanOutput::default(), 0, at());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_json_document_shape() {
        let json = render_json(&ready_config(), &test_plan(), at()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["config"]["niche"], "Home coffee roasting");
        assert!(value["plan"]["goals"].is_array());
        assert!(value["exportedAt"].is_string());
    }
}
