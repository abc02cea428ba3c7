//! Local analytics simulation.
//!
//! Everything here is placeholder arithmetic for demo dashboards: no
//! real signal goes in. All randomness comes from an injected [`Rng`] so
//! callers can seed it (`StdRng::seed_from_u64`) for reproducible output.

use std::collections::HashSet;
use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::topic::{
    keyword_matches, keyword_words, HistoricalPoint, TopicCategory, TopicMetrics, TrackedTopic,
};

/// Hand-tuned popularity by topic substring.
const POPULARITY_TABLE: &[(&str, f64)] = &[
    ("chatgpt", 0.95),
    ("ai", 0.92),
    ("tiktok", 0.88),
    ("crypto", 0.80),
    ("mental health", 0.78),
    ("fitness", 0.75),
    ("sustainability", 0.72),
    ("marketing", 0.70),
    ("remote work", 0.68),
    ("personal finance", 0.66),
    ("travel", 0.64),
    ("web3", 0.60),
    ("productivity", 0.58),
    ("cooking", 0.55),
];

const DEFAULT_POPULARITY: f64 = 0.5;

/// Days over which a topic's weight in the engagement rollup decays to zero.
const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// Distinct categories needed for full diversity.
const DIVERSITY_SATURATION: f64 = 5.0;

pub const ENGAGEMENT_BOUNDS: (f64, f64) = (0.5, 15.0);
pub const SENTIMENT_BOUNDS: (f64, f64) = (-1.0, 1.0);
pub const TREND_BOUNDS: (u32, u32) = (1, 100);

/// Longest simulated history; longer requests are capped.
pub const MAX_HISTORY_DAYS: u32 = 365;

/// Popularity in [0, 1] for a topic; the highest matching entry wins.
pub fn popularity_score(topic: &str) -> f64 {
    let lower = topic.to_lowercase();
    let words = keyword_words(&lower);
    POPULARITY_TABLE
        .iter()
        .filter(|(key, _)| keyword_matches(&lower, &words, key))
        .map(|(_, score)| *score)
        .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))
        .unwrap_or(DEFAULT_POPULARITY)
}

/// Current metrics for a topic at the given hour of day (0-23).
///
/// Engagement is left unbounded here; only live updates clamp it.
pub fn generate_advanced_metrics<R: Rng + ?Sized>(topic: &str, hour: u32, rng: &mut R) -> TopicMetrics {
    let base = popularity_score(topic);
    let time_of_day = 0.1 * (2.0 * PI * f64::from(hour % 24) / 24.0).sin();
    let noise = rng.gen_range(-0.1..=0.1);
    let score = (base + time_of_day + noise).clamp(0.1, 1.0);

    let reach = (score * 100_000.0 * rng.gen_range(0.8..=1.2)).round().max(0.0) as u64;
    let engagement = score * 10.0 + rng.gen_range(-1.0..=1.0);
    let mentions = (score * 5_000.0 * rng.gen_range(0.7..=1.3)).round().max(0.0) as u64;
    let sentiment = ((score - 0.5) * 1.2 + rng.gen_range(-0.2..=0.2)).clamp(-1.0, 1.0);
    let trend_score = clamp_trend((score * 100.0).round());

    TopicMetrics {
        reach,
        engagement,
        mentions,
        sentiment,
        trend_score,
    }
}

/// Daily history ending at `end_date`, oldest first: `days + 1` points with
/// `days` capped at [`MAX_HISTORY_DAYS`]. Days before the earliest
/// representable date are skipped.
pub fn generate_realistic_historical_data<R: Rng + ?Sized>(
    topic: &str,
    days: u32,
    end_date: NaiveDate,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let popularity = popularity_score(topic);
    let category = TopicCategory::classify(topic);
    let base_reach = popularity * 50_000.0;
    let days = days.min(MAX_HISTORY_DAYS);

    (0..=days)
        .filter_map(|i| {
            let date = end_date.checked_sub_signed(Duration::days(i64::from(days - i)))?;
            let progress = if days == 0 {
                1.0
            } else {
                f64::from(i) / f64::from(days)
            };

            let weekday = match date.weekday() {
                Weekday::Sat | Weekday::Sun => 0.7,
                _ => 1.0,
            };
            let business_hours = rng.gen_range(0.8..=1.2);
            let curve = match category {
                TopicCategory::Viral => 0.3 + 1.5 * (-3.0 * progress).exp(),
                TopicCategory::Tech => 0.6 + 0.8 * progress,
                _ => 1.0 + 0.2 * (2.0 * PI * f64::from(i) / 7.0).sin(),
            };
            let multiplier = weekday * business_hours * curve;

            let reach = (base_reach * multiplier).round().max(100.0) as u64;
            let mentions = (reach as f64 / 40.0 * rng.gen_range(0.8..=1.2))
                .round()
                .max(10.0) as u64;
            let engagement = popularity * 8.0 * curve + rng.gen_range(-0.5..=0.5);
            let sentiment = ((popularity - 0.5) + rng.gen_range(-0.3..=0.3)).clamp(-1.0, 1.0);

            Some(HistoricalPoint {
                date,
                reach,
                engagement,
                mentions,
                sentiment,
            })
        })
        .collect()
}

/// Nudge metrics by small random deltas and clamp to their display bounds.
pub fn simulate_realtime_metric_updates<R: Rng + ?Sized>(
    metrics: &TopicMetrics,
    rng: &mut R,
) -> TopicMetrics {
    let reach = metrics.reach as f64 * (1.0 + rng.gen_range(-0.05..=0.05));
    let mentions = metrics.mentions as f64 * (1.0 + rng.gen_range(-0.05..=0.05));
    let engagement = (metrics.engagement + rng.gen_range(-0.5..=0.5))
        .clamp(ENGAGEMENT_BOUNDS.0, ENGAGEMENT_BOUNDS.1);
    let sentiment = (metrics.sentiment + rng.gen_range(-0.1..=0.1))
        .clamp(SENTIMENT_BOUNDS.0, SENTIMENT_BOUNDS.1);
    let trend = f64::from(metrics.trend_score) + f64::from(rng.gen_range(-3i32..=3));

    TopicMetrics {
        reach: reach.round().max(0.0) as u64,
        engagement,
        mentions: mentions.round().max(0.0) as u64,
        sentiment,
        trend_score: clamp_trend(trend),
    }
}

fn clamp_trend(value: f64) -> u32 {
    value.clamp(f64::from(TREND_BOUNDS.0), f64::from(TREND_BOUNDS.1)) as u32
}

/// Create a tracked topic with fresh metrics and history.
pub fn track_topic<R: Rng + ?Sized>(
    name: &str,
    now: DateTime<Utc>,
    history_days: u32,
    rng: &mut R,
) -> TrackedTopic {
    let name = name.trim().to_string();
    TrackedTopic {
        id: Uuid::new_v4(),
        category: TopicCategory::classify(&name),
        metrics: generate_advanced_metrics(&name, now.hour(), rng),
        historical_data: generate_realistic_historical_data(&name, history_days, now.date_naive(), rng),
        last_updated: now,
        name,
    }
}

// ─────────────────────────────────────────────────────────────────
// Rollups
// ─────────────────────────────────────────────────────────────────

/// Engagement averaged with weights `ln(1 + reach) * recency`, where recency
/// decays linearly to zero over 30 days since the topic's last update.
pub fn calculate_weighted_engagement(topics: &[TrackedTopic], now: DateTime<Utc>) -> f64 {
    let (weighted, total_weight) = topics.iter().fold((0.0, 0.0), |(sum, weights), t| {
        let age_days = (now - t.last_updated).num_seconds().max(0) as f64 / 86_400.0;
        let recency = (1.0 - age_days / RECENCY_WINDOW_DAYS).max(0.0);
        let weight = (1.0 + t.metrics.reach as f64).ln() * recency;
        (sum + weight * t.metrics.engagement, weights + weight)
    });

    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        0.0
    }
}

/// Share of positive topics minus share of negative topics, in [-1, 1].
pub fn calculate_sentiment_impact(topics: &[TrackedTopic]) -> f64 {
    if topics.is_empty() {
        return 0.0;
    }
    let total = topics.len() as f64;
    let positive = topics.iter().filter(|t| t.sentiment_label() == "positive").count() as f64;
    let negative = topics.iter().filter(|t| t.sentiment_label() == "negative").count() as f64;
    positive / total - negative / total
}

/// Distinct categories over five, saturating at 1.
pub fn calculate_category_diversity(topics: &[TrackedTopic]) -> f64 {
    let distinct: HashSet<TopicCategory> = topics.iter().map(|t| t.category).collect();
    (distinct.len() as f64 / DIVERSITY_SATURATION).min(1.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub topic_count: usize,
    pub total_reach: u64,
    pub total_mentions: u64,
    pub average_trend_score: f64,
    pub weighted_engagement: f64,
    pub sentiment_impact: f64,
    pub category_diversity: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate rollups over every tracked topic.
pub fn update_analytics_data(topics: &[TrackedTopic], now: DateTime<Utc>) -> AnalyticsSummary {
    let average_trend_score = if topics.is_empty() {
        0.0
    } else {
        topics
            .iter()
            .map(|t| f64::from(t.metrics.trend_score))
            .sum::<f64>()
            / topics.len() as f64
    };

    AnalyticsSummary {
        topic_count: topics.len(),
        total_reach: topics.iter().map(|t| t.metrics.reach).sum(),
        total_mentions: topics.iter().map(|t| t.metrics.mentions).sum(),
        average_trend_score,
        weighted_engagement: calculate_weighted_engagement(topics, now),
        sentiment_impact: calculate_sentiment_impact(topics),
        category_diversity: calculate_category_diversity(topics),
        updated_at: Some(now),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Trend,
    Opportunity,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Canned insight sentences derived from the rollups.
pub fn generate_insights(summary: &AnalyticsSummary, topics: &[TrackedTopic]) -> Vec<Insight> {
    if topics.is_empty() {
        return vec![Insight::new(
            InsightKind::Opportunity,
            "Track a topic to start seeing audience insights.",
        )];
    }

    let mut insights = Vec::new();

    if let Some(top) = topics.iter().max_by_key(|t| t.metrics.trend_score) {
        insights.push(Insight::new(
            InsightKind::Trend,
            format!(
                "\"{}\" is your strongest topic with a trend score of {}.",
                top.name, top.metrics.trend_score
            ),
        ));
    }

    if summary.sentiment_impact < 0.0 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Negative sentiment outweighs positive. Review messaging on your weakest topics.",
        ));
    } else if summary.sentiment_impact > 0.5 {
        insights.push(Insight::new(
            InsightKind::Trend,
            "Audience sentiment is strongly positive. Lean into community content.",
        ));
    }

    if summary.category_diversity < 0.6 {
        insights.push(Insight::new(
            InsightKind::Opportunity,
            "Your topics cluster in few categories. Diversify to reach adjacent audiences.",
        ));
    }

    if summary.weighted_engagement >= 8.0 {
        insights.push(Insight::new(
            InsightKind::Opportunity,
            format!(
                "Engagement averages {:.1}%. Consider launching a paid offer to this audience.",
                summary.weighted_engagement
            ),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap()
    }

    fn topic_with(category: TopicCategory, sentiment: f64, reach: u64, engagement: f64) -> TrackedTopic {
        TrackedTopic {
            id: Uuid::new_v4(),
            name: format!("{:?}", category),
            category,
            metrics: TopicMetrics {
                reach,
                engagement,
                mentions: 10,
                sentiment,
                trend_score: 50,
            },
            historical_data: Vec::new(),
            last_updated: now(),
        }
    }

    #[test]
    fn test_popularity_table_lookup() {
        assert_eq!(popularity_score("Using ChatGPT for emails"), 0.95);
        assert_eq!(popularity_score("Underwater basket weaving"), DEFAULT_POPULARITY);
        // several matches: highest wins
        assert_eq!(popularity_score("TikTok marketing"), 0.88);
    }

    #[test]
    fn test_popularity_short_keys_need_whole_word() {
        for topic in ["Fair trade coffee", "email", "brain training"] {
            assert!(popularity_score(topic) < 0.92, "{topic} scored as ai");
        }
        assert_eq!(popularity_score("AI for small teams"), 0.92);
    }

    #[test]
    fn test_advanced_metrics_bounds_for_many_topics() {
        let mut rng = rng();
        let topics = ["ai", "fitness", "", "zzz", "crypto marketing", "a very long unknown topic"];
        for topic in topics {
            for hour in 0..24 {
                let m = generate_advanced_metrics(topic, hour, &mut rng);
                assert!((1..=100).contains(&m.trend_score), "trend {} for {topic}", m.trend_score);
                assert!((-1.0..=1.0).contains(&m.sentiment));
            }
        }
    }

    #[test]
    fn test_advanced_metrics_deterministic_with_seed() {
        let a = generate_advanced_metrics("AI tools", 9, &mut rng());
        let b = generate_advanced_metrics("AI tools", 9, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_history_length_and_floors() {
        let mut rng = rng();
        for days in [0, 1, 7, 30] {
            for topic in ["viral meme", "SaaS growth", "gardening"] {
                let history = generate_realistic_historical_data(topic, days, now().date_naive(), &mut rng);
                assert_eq!(history.len(), days as usize + 1);
                assert!(history.iter().all(|p| p.reach >= 100 && p.mentions >= 10));
                assert_eq!(history.last().unwrap().date, now().date_naive());
            }
        }
    }

    #[test]
    fn test_history_is_capped() {
        let history =
            generate_realistic_historical_data("x", 100_000_000, now().date_naive(), &mut rng());
        assert_eq!(history.len(), MAX_HISTORY_DAYS as usize + 1);
        assert_eq!(history.last().unwrap().date, now().date_naive());
    }

    #[test]
    fn test_history_skips_days_before_earliest_date() {
        let end = NaiveDate::MIN + Duration::days(10);
        let history = generate_realistic_historical_data("x", 30, end, &mut rng());
        assert_eq!(history.len(), 11);
        assert_eq!(history[0].date, NaiveDate::MIN);
    }

    #[test]
    fn test_history_dates_are_consecutive() {
        let history = generate_realistic_historical_data("tech", 6, now().date_naive(), &mut rng());
        for pair in history.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_realtime_updates_clamp() {
        let mut rng = rng();
        let mut metrics = TopicMetrics {
            reach: 0,
            engagement: 40.0,
            mentions: 0,
            sentiment: 3.0,
            trend_score: 250,
        };
        for _ in 0..50 {
            metrics = simulate_realtime_metric_updates(&metrics, &mut rng);
            assert!((0.5..=15.0).contains(&metrics.engagement));
            assert!((-1.0..=1.0).contains(&metrics.sentiment));
            assert!((1..=100).contains(&metrics.trend_score));
        }
    }

    #[test]
    fn test_sentiment_impact_all_positive_is_one() {
        let topics: Vec<_> = (0..4)
            .map(|_| topic_with(TopicCategory::Tech, 0.8, 1000, 5.0))
            .collect();
        assert_eq!(calculate_sentiment_impact(&topics), 1.0);
    }

    #[test]
    fn test_sentiment_impact_mixed_and_empty() {
        assert_eq!(calculate_sentiment_impact(&[]), 0.0);
        let topics = vec![
            topic_with(TopicCategory::Tech, 0.8, 1000, 5.0),
            topic_with(TopicCategory::Tech, -0.8, 1000, 5.0),
            topic_with(TopicCategory::Tech, -0.9, 1000, 5.0),
            topic_with(TopicCategory::Tech, 0.0, 1000, 5.0),
        ];
        let impact = calculate_sentiment_impact(&topics);
        assert!((impact - (-0.25)).abs() < 1e-9);
        assert!((-1.0..=1.0).contains(&impact));
    }

    #[test]
    fn test_category_diversity_linear_then_saturates() {
        let cats = [
            TopicCategory::Viral,
            TopicCategory::Tech,
            TopicCategory::Business,
            TopicCategory::Lifestyle,
            TopicCategory::Health,
            TopicCategory::General,
        ];
        let topics: Vec<_> = cats.iter().map(|c| topic_with(*c, 0.0, 100, 1.0)).collect();

        assert_eq!(calculate_category_diversity(&topics[..0]), 0.0);
        assert!((calculate_category_diversity(&topics[..2]) - 0.4).abs() < 1e-9);
        assert!((calculate_category_diversity(&topics[..4]) - 0.8).abs() < 1e-9);
        assert_eq!(calculate_category_diversity(&topics[..5]), 1.0);
        assert_eq!(calculate_category_diversity(&topics), 1.0);
    }

    #[test]
    fn test_weighted_engagement_favours_recent_topics() {
        let fresh = topic_with(TopicCategory::Tech, 0.0, 10_000, 10.0);
        let mut stale = topic_with(TopicCategory::Tech, 0.0, 10_000, 2.0);
        stale.last_updated = now() - Duration::days(40);

        let value = calculate_weighted_engagement(&[fresh, stale.clone()], now());
        assert!((value - 10.0).abs() < 1e-9);
        assert_eq!(calculate_weighted_engagement(&[stale], now()), 0.0);
    }

    #[test]
    fn test_update_analytics_data_rollups() {
        let topics = vec![
            topic_with(TopicCategory::Tech, 0.5, 1000, 4.0),
            topic_with(TopicCategory::Health, 0.5, 3000, 4.0),
        ];
        let summary = update_analytics_data(&topics, now());
        assert_eq!(summary.topic_count, 2);
        assert_eq!(summary.total_reach, 4000);
        assert_eq!(summary.total_mentions, 20);
        assert_eq!(summary.average_trend_score, 50.0);
        assert!((summary.weighted_engagement - 4.0).abs() < 1e-9);
        assert_eq!(summary.sentiment_impact, 1.0);
    }

    #[test]
    fn test_insights_for_empty_and_populated() {
        let empty = generate_insights(&AnalyticsSummary::default(), &[]);
        assert_eq!(empty.len(), 1);

        let topics = vec![topic_with(TopicCategory::Tech, -0.5, 1000, 9.0)];
        let summary = update_analytics_data(&topics, now());
        let insights = generate_insights(&summary, &topics);
        assert!(insights.iter().any(|i| i.kind == InsightKind::Warning));
        assert!(insights.iter().any(|i| i.message.contains("Tech")));
    }

    #[test]
    fn test_track_topic_trims_and_classifies() {
        let topic = track_topic("  AI writing  ", now(), 14, &mut rng());
        assert_eq!(topic.name, "AI writing");
        assert_eq!(topic.category, TopicCategory::Tech);
        assert_eq!(topic.historical_data.len(), 15);
        assert_eq!(topic.last_updated, now());
    }
}
