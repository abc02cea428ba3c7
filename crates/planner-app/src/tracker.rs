//! Topic tracker state for the analytics view.
//!
//! Topics live only in memory. The summary and insights are recomputed
//! after every change so the view never shows stale rollups.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use planner_core::{
    generate_insights, simulate_realtime_metric_updates, track_topic, update_analytics_data,
    AnalyticsSummary, Insight, TrackedTopic,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    Added(Uuid),
    Blank,
    Duplicate,
}

#[derive(Debug, Default)]
pub struct TrackerState {
    pub topics: Vec<TrackedTopic>,
    pub summary: AnalyticsSummary,
    pub insights: Vec<Insight>,
    /// Topic name being typed
    pub input: String,
    pub selected: usize,
    /// Mirrors whether the refresh ticker task is running
    pub ticker_running: bool,
}

impl TrackerState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.insights = generate_insights(&state.summary, &state.topics);
        state
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn selected_topic(&self) -> Option<&TrackedTopic> {
        self.topics.get(self.selected)
    }

    /// Start tracking `name`. Names are matched case-insensitively.
    pub fn track<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        now: DateTime<Utc>,
        history_days: u32,
        rng: &mut R,
    ) -> TrackOutcome {
        let name = name.trim();
        if name.is_empty() {
            return TrackOutcome::Blank;
        }
        if self.topics.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return TrackOutcome::Duplicate;
        }
        let topic = track_topic(name, now, history_days, rng);
        let id = topic.id;
        self.topics.push(topic);
        self.selected = self.topics.len() - 1;
        self.refresh(now);
        TrackOutcome::Added(id)
    }

    pub fn remove(&mut self, id: Uuid, now: DateTime<Utc>) -> Option<TrackedTopic> {
        let pos = self.topics.iter().position(|t| t.id == id)?;
        let removed = self.topics.remove(pos);
        if self.selected >= self.topics.len() {
            self.selected = self.topics.len().saturating_sub(1);
        }
        self.refresh(now);
        Some(removed)
    }

    /// Nudge every topic's metrics, as one ticker step.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) {
        for topic in &mut self.topics {
            topic.metrics = simulate_realtime_metric_updates(&topic.metrics, rng);
            topic.last_updated = now;
        }
        self.refresh(now);
    }

    pub fn select_next(&mut self) {
        if !self.topics.is_empty() {
            self.selected = (self.selected + 1) % self.topics.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.topics.is_empty() {
            self.selected = (self.selected + self.topics.len() - 1) % self.topics.len();
        }
    }

    fn refresh(&mut self, now: DateTime<Utc>) {
        self.summary = update_analytics_data(&self.topics, now);
        self.insights = generate_insights(&self.summary, &self.topics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_track_and_remove() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tracker = TrackerState::new();
        let now = Utc::now();

        let TrackOutcome::Added(id) = tracker.track("AI tools", now, 14, &mut rng) else {
            panic!("expected topic to be added");
        };
        assert_eq!(tracker.summary.topic_count, 1);
        assert_eq!(tracker.topics[0].historical_data.len(), 15);

        assert_eq!(tracker.track("ai TOOLS", now, 14, &mut rng), TrackOutcome::Duplicate);
        assert_eq!(tracker.track("   ", now, 14, &mut rng), TrackOutcome::Blank);

        assert!(tracker.remove(id, now).is_some());
        assert!(tracker.is_empty());
        assert_eq!(tracker.summary.topic_count, 0);
    }

    #[test]
    fn test_tick_keeps_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tracker = TrackerState::new();
        let now = Utc::now();
        tracker.track("fitness", now, 7, &mut rng);
        tracker.track("crypto", now, 7, &mut rng);

        for _ in 0..50 {
            tracker.tick(now, &mut rng);
        }
        for topic in &tracker.topics {
            assert!((1..=100).contains(&topic.metrics.trend_score));
            assert!((0.5..=15.0).contains(&topic.metrics.engagement));
            assert!((-1.0..=1.0).contains(&topic.metrics.sentiment));
        }
    }

    #[test]
    fn test_selection_follows_removal() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tracker = TrackerState::new();
        let now = Utc::now();
        tracker.track("a", now, 1, &mut rng);
        let TrackOutcome::Added(last) = tracker.track("b", now, 1, &mut rng) else {
            panic!("expected topic to be added");
        };
        assert_eq!(tracker.selected, 1);
        tracker.remove(last, now);
        assert_eq!(tracker.selected, 0);
    }
}
