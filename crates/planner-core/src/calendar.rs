//! In-memory content calendar.
//!
//! Items and ideas only live for the session; nothing here is persisted.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::WeeklyScheduleEntry;
use crate::strategy::{ContentType, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    Cancelled,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 4] = [
        ContentStatus::Draft,
        ContentStatus::Scheduled,
        ContentStatus::Published,
        ContentStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "Draft",
            ContentStatus::Scheduled => "Scheduled",
            ContentStatus::Published => "Published",
            ContentStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPerformance {
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledContentItem {
    pub id: Uuid,
    pub title: String,
    pub platform: Platform,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: ContentStatus,
    pub content_type: ContentType,
    pub notes: String,
    pub performance: Option<ContentPerformance>,
}

impl ScheduledContentItem {
    pub fn new(
        title: impl Into<String>,
        platform: Platform,
        content_type: ContentType,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            platform,
            date,
            time,
            status: ContentStatus::Scheduled,
            content_type,
            notes: String::new(),
            performance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdea {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub platform: Option<Platform>,
    pub content_type: Option<ContentType>,
}

impl ContentIdea {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            platform: None,
            content_type: None,
        }
    }
}

const DEFAULT_POST_TIME: (u32, u32) = (9, 0);

fn default_post_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_POST_TIME.0, DEFAULT_POST_TIME.1, 0).unwrap_or(NaiveTime::MIN)
}

/// Parse "14:30", "2:30 PM" or "9am"; `None` if unrecognised.
pub fn parse_post_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    let compact = text.to_uppercase().replace(' ', "");
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&compact, "%I:%M%p"))
        .or_else(|_| {
            // "9AM" has no minutes
            let with_minutes = compact
                .strip_suffix("AM")
                .map(|h| format!("{h}:00AM"))
                .or_else(|| compact.strip_suffix("PM").map(|h| format!("{h}:00PM")))
                .unwrap_or_default();
            NaiveTime::parse_from_str(&with_minutes, "%I:%M%p")
        })
        .ok()
}

fn parse_weekday(day: &str) -> Option<Weekday> {
    let lower = day.trim().to_lowercase();
    let days = [
        ("mon", Weekday::Mon),
        ("tue", Weekday::Tue),
        ("wed", Weekday::Wed),
        ("thu", Weekday::Thu),
        ("fri", Weekday::Fri),
        ("sat", Weekday::Sat),
        ("sun", Weekday::Sun),
    ];
    days.iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, wd)| *wd)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentCalendar {
    items: Vec<ScheduledContentItem>,
    ideas: Vec<ContentIdea>,
}

impl ContentCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ScheduledContentItem] {
        &self.items
    }

    pub fn ideas(&self) -> &[ContentIdea] {
        &self.ideas
    }

    pub fn get(&self, id: Uuid) -> Option<&ScheduledContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn add_item(&mut self, item: ScheduledContentItem) -> Uuid {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Apply an edit to an item. Returns `false` if the id is unknown.
    pub fn update_item<F>(&mut self, id: Uuid, edit: F) -> bool
    where
        F: FnOnce(&mut ScheduledContentItem),
    {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    pub fn delete_item(&mut self, id: Uuid) -> Option<ScheduledContentItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn set_status(&mut self, id: Uuid, status: ContentStatus) -> bool {
        self.update_item(id, |item| item.status = status)
    }

    /// Items on a date, earliest first, optionally filtered by platform.
    pub fn items_on(&self, date: NaiveDate, platform: Option<Platform>) -> Vec<&ScheduledContentItem> {
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter(|i| i.date == date && platform.map_or(true, |p| i.platform == p))
            .collect();
        items.sort_by_key(|i| i.time);
        items
    }

    /// Items in the Monday-to-Sunday week containing `date`.
    pub fn items_in_week(&self, date: NaiveDate, platform: Option<Platform>) -> Vec<&ScheduledContentItem> {
        let start = week_start(date);
        let end = start + Duration::days(6);
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter(|i| i.date >= start && i.date <= end)
            .filter(|i| platform.map_or(true, |p| i.platform == p))
            .collect();
        items.sort_by_key(|i| (i.date, i.time));
        items
    }

    pub fn count_in_month(&self, year: i32, month: u32) -> usize {
        self.items
            .iter()
            .filter(|i| i.date.year() == year && i.date.month() == month)
            .count()
    }

    pub fn add_idea(&mut self, idea: ContentIdea) -> Uuid {
        let id = idea.id;
        self.ideas.push(idea);
        id
    }

    pub fn delete_idea(&mut self, id: Uuid) -> Option<ContentIdea> {
        let pos = self.ideas.iter().position(|i| i.id == id)?;
        Some(self.ideas.remove(pos))
    }

    /// Move an idea onto the calendar as a scheduled draft.
    pub fn promote_idea(&mut self, id: Uuid, date: NaiveDate, time: Option<NaiveTime>) -> Option<Uuid> {
        let idea = self.delete_idea(id)?;
        let mut item = ScheduledContentItem::new(
            idea.title,
            idea.platform.unwrap_or(Platform::Blog),
            idea.content_type.unwrap_or(ContentType::BlogPost),
            date,
            time.unwrap_or_else(default_post_time),
        );
        item.status = ContentStatus::Draft;
        item.notes = idea.description;
        Some(self.add_item(item))
    }

    /// Add a plan's weekly schedule to the week containing `week_of`.
    ///
    /// Entries with an unknown day or platform are skipped. Returns the
    /// number of items added.
    pub fn import_weekly_schedule(&mut self, entries: &[WeeklyScheduleEntry], week_of: NaiveDate) -> usize {
        let monday = week_start(week_of);
        let mut added = 0;
        for entry in entries {
            let (Some(day), Some(platform)) = (parse_weekday(&entry.day), Platform::from_name(&entry.platform))
            else {
                continue;
            };
            let date = monday + Duration::days(i64::from(day.num_days_from_monday()));
            let time = parse_post_time(&entry.time).unwrap_or_else(default_post_time);
            let content_type = ContentType::ALL
                .iter()
                .copied()
                .find(|ct| ct.label().eq_ignore_ascii_case(entry.content_type.trim()))
                .unwrap_or(ContentType::ShortVideo);
            let title = if entry.topic.trim().is_empty() {
                format!("{} post", platform.label())
            } else {
                entry.topic.trim().to_string()
            };
            self.add_item(ScheduledContentItem::new(title, platform, content_type, date, time));
            added += 1;
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn item(title: &str, platform: Platform, d: NaiveDate, t: NaiveTime) -> ScheduledContentItem {
        ScheduledContentItem::new(title, platform, ContentType::Carousel, d, t)
    }

    #[test]
    fn test_add_update_delete() {
        let mut cal = ContentCalendar::new();
        let id = cal.add_item(item("Launch", Platform::Instagram, date(2024, 5, 6), time(9, 0)));

        assert!(cal.update_item(id, |i| i.title = "Launch day".to_string()));
        assert_eq!(cal.get(id).unwrap().title, "Launch day");

        assert!(cal.set_status(id, ContentStatus::Published));
        assert_eq!(cal.get(id).unwrap().status, ContentStatus::Published);

        assert!(cal.delete_item(id).is_some());
        assert!(cal.delete_item(id).is_none());
        assert!(!cal.set_status(id, ContentStatus::Draft));
    }

    #[test]
    fn test_items_on_sorted_and_filtered() {
        let mut cal = ContentCalendar::new();
        let d = date(2024, 5, 7);
        cal.add_item(item("late", Platform::Instagram, d, time(18, 0)));
        cal.add_item(item("early", Platform::LinkedIn, d, time(8, 0)));
        cal.add_item(item("other day", Platform::Instagram, date(2024, 5, 8), time(8, 0)));

        let titles: Vec<_> = cal.items_on(d, None).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late"]);

        let ig = cal.items_on(d, Some(Platform::Instagram));
        assert_eq!(ig.len(), 1);
        assert_eq!(ig[0].title, "late");
    }

    #[test]
    fn test_items_in_week() {
        let mut cal = ContentCalendar::new();
        // 2024-05-06 is a Monday
        cal.add_item(item("mon", Platform::Blog, date(2024, 5, 6), time(9, 0)));
        cal.add_item(item("sun", Platform::Blog, date(2024, 5, 12), time(9, 0)));
        cal.add_item(item("next mon", Platform::Blog, date(2024, 5, 13), time(9, 0)));

        let week = cal.items_in_week(date(2024, 5, 9), None);
        assert_eq!(week.len(), 2);
        assert_eq!(week[0].title, "mon");
        assert_eq!(week[1].title, "sun");
    }

    #[test]
    fn test_promote_idea() {
        let mut cal = ContentCalendar::new();
        let mut idea = ContentIdea::new("Behind the scenes");
        idea.platform = Some(Platform::TikTok);
        let idea_id = cal.add_idea(idea);

        let item_id = cal.promote_idea(idea_id, date(2024, 5, 10), None).unwrap();
        assert!(cal.ideas().is_empty());
        let item = cal.get(item_id).unwrap();
        assert_eq!(item.platform, Platform::TikTok);
        assert_eq!(item.status, ContentStatus::Draft);
        assert_eq!(item.time, time(9, 0));
    }

    #[test]
    fn test_import_weekly_schedule() {
        let mut cal = ContentCalendar::new();
        let entries = vec![
            WeeklyScheduleEntry {
                day: "Monday".to_string(),
                platform: "Instagram".to_string(),
                content_type: "Carousel".to_string(),
                topic: "Tips".to_string(),
                time: "6:30 PM".to_string(),
            },
            WeeklyScheduleEntry {
                day: "Wednesday".to_string(),
                platform: "LinkedIn".to_string(),
                content_type: "Case Study".to_string(),
                topic: String::new(),
                time: "08:00".to_string(),
            },
            WeeklyScheduleEntry {
                day: "Someday".to_string(),
                platform: "Instagram".to_string(),
                ..Default::default()
            },
        ];

        let added = cal.import_weekly_schedule(&entries, date(2024, 5, 9));
        assert_eq!(added, 2);

        let monday = cal.items_on(date(2024, 5, 6), None);
        assert_eq!(monday[0].time, time(18, 30));
        assert_eq!(monday[0].content_type, ContentType::Carousel);

        let wednesday = cal.items_on(date(2024, 5, 8), None);
        assert_eq!(wednesday[0].title, "LinkedIn post");
        assert_eq!(wednesday[0].content_type, ContentType::CaseStudy);
    }

    #[test]
    fn test_parse_post_time_formats() {
        assert_eq!(parse_post_time("14:05"), Some(time(14, 5)));
        assert_eq!(parse_post_time("2:30 pm"), Some(time(14, 30)));
        assert_eq!(parse_post_time("9am"), Some(time(9, 0)));
        assert_eq!(parse_post_time("whenever"), None);
    }

    #[test]
    fn test_count_in_month() {
        let mut cal = ContentCalendar::new();
        cal.add_item(item("a", Platform::Blog, date(2024, 5, 1), time(9, 0)));
        cal.add_item(item("b", Platform::Blog, date(2024, 5, 31), time(9, 0)));
        cal.add_item(item("c", Platform::Blog, date(2024, 6, 1), time(9, 0)));
        assert_eq!(cal.count_in_month(2024, 5), 2);
    }
}
