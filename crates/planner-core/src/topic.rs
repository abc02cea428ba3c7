//! Tracked topics for the analytics simulation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse category inferred from a topic's name; drives the shape of the
/// simulated history curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicCategory {
    Viral,
    Tech,
    Business,
    Lifestyle,
    Health,
    General,
}

const VIRAL_KEYWORDS: &[&str] = &["viral", "trend", "meme", "challenge", "tiktok", "reels"];
const TECH_KEYWORDS: &[&str] = &[
    "ai", "tech", "software", "crypto", "web3", "saas", "cloud", "data", "app",
];
const BUSINESS_KEYWORDS: &[&str] = &[
    "marketing", "business", "startup", "finance", "sales", "brand", "ecommerce",
];
const LIFESTYLE_KEYWORDS: &[&str] = &["travel", "food", "fashion", "beauty", "home", "parenting"];
const HEALTH_KEYWORDS: &[&str] = &["fitness", "health", "wellness", "yoga", "nutrition", "mental"];

/// Lowercased topic split into alphanumeric words.
pub(crate) fn keyword_words(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Substring match, except short keys must match a whole word ("ai" vs "fair").
pub(crate) fn keyword_matches(lower: &str, words: &[&str], key: &str) -> bool {
    if key.len() <= 3 {
        words.contains(&key)
    } else {
        lower.contains(key)
    }
}

impl TopicCategory {
    /// Classify a topic by keyword. The first matching group wins.
    pub fn classify(topic: &str) -> Self {
        let lower = topic.to_lowercase();
        let words = keyword_words(&lower);
        let hit = |keys: &[&str]| keys.iter().any(|k| keyword_matches(&lower, &words, k));

        if hit(VIRAL_KEYWORDS) {
            TopicCategory::Viral
        } else if hit(TECH_KEYWORDS) {
            TopicCategory::Tech
        } else if hit(BUSINESS_KEYWORDS) {
            TopicCategory::Business
        } else if hit(LIFESTYLE_KEYWORDS) {
            TopicCategory::Lifestyle
        } else if hit(HEALTH_KEYWORDS) {
            TopicCategory::Health
        } else {
            TopicCategory::General
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TopicCategory::Viral => "Viral",
            TopicCategory::Tech => "Tech",
            TopicCategory::Business => "Business",
            TopicCategory::Lifestyle => "Lifestyle",
            TopicCategory::Health => "Health",
            TopicCategory::General => "General",
        }
    }
}

/// Point-in-time metrics for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMetrics {
    pub reach: u64,
    /// Engagement rate in percent.
    pub engagement: f64,
    pub mentions: u64,
    /// -1.0 (negative) to 1.0 (positive).
    pub sentiment: f64,
    /// 1 to 100.
    pub trend_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub reach: u64,
    pub engagement: f64,
    pub mentions: u64,
    pub sentiment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTopic {
    pub id: Uuid,
    pub name: String,
    pub category: TopicCategory,
    pub metrics: TopicMetrics,
    pub historical_data: Vec<HistoricalPoint>,
    pub last_updated: DateTime<Utc>,
}

impl TrackedTopic {
    /// Sentiment bucket used by the rollups.
    pub fn sentiment_label(&self) -> &'static str {
        if self.metrics.sentiment > 0.1 {
            "positive"
        } else if self.metrics.sentiment < -0.1 {
            "negative"
        } else {
            "neutral"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_keyword() {
        assert_eq!(TopicCategory::classify("Viral dance challenge"), TopicCategory::Viral);
        assert_eq!(TopicCategory::classify("AI copywriting"), TopicCategory::Tech);
        assert_eq!(TopicCategory::classify("B2B marketing"), TopicCategory::Business);
        assert_eq!(TopicCategory::classify("Home yoga"), TopicCategory::Lifestyle);
        assert_eq!(TopicCategory::classify("Gardening"), TopicCategory::General);
    }

    #[test]
    fn test_short_keywords_need_whole_word() {
        // "fair" contains "ai" but is not about AI
        assert_eq!(TopicCategory::classify("Fair trade coffee"), TopicCategory::General);
    }
}
