//! Display-width aware text helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to `max_width` terminal columns, ending with `…` when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Compact count: 1240 -> "1.2K", 2_500_000 -> "2.5M".
pub fn compact_number(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1}K", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Recipes", 10), "Recipes");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("Seasonal baking guides", 8), "Seasona…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        // Each CJK character takes two columns
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_compact_number() {
        assert_eq!(compact_number(950), "950");
        assert_eq!(compact_number(1_240), "1.2K");
        assert_eq!(compact_number(2_500_000), "2.5M");
    }
}
