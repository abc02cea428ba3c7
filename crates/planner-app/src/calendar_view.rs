//! Calendar view state: month cursor, selected day, platform filter and the
//! in-memory [`ContentCalendar`] it edits.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime};
use uuid::Uuid;

use planner_core::calendar::{parse_post_time, week_start};
use planner_core::plan::WeeklyScheduleEntry;
use planner_core::strategy::cycle_option;
use planner_core::{ContentCalendar, ContentIdea, ContentStatus, ContentType, Platform, ScheduledContentItem};

/// Which list arrow keys move through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarFocus {
    #[default]
    Days,
    Items,
    Ideas,
}

impl CalendarFocus {
    pub fn next(&self) -> CalendarFocus {
        match self {
            CalendarFocus::Days => CalendarFocus::Items,
            CalendarFocus::Items => CalendarFocus::Ideas,
            CalendarFocus::Ideas => CalendarFocus::Days,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarViewState {
    pub calendar: ContentCalendar,
    /// First day of the displayed month
    pub month: NaiveDate,
    pub selected_date: NaiveDate,
    pub platform_filter: Option<Platform>,
    pub focus: CalendarFocus,
    pub item_cursor: usize,
    pub idea_cursor: usize,
    /// Title being typed for a new item or idea
    pub input: String,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl CalendarViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            calendar: ContentCalendar::new(),
            month: first_of_month(today),
            selected_date: today,
            platform_filter: None,
            focus: CalendarFocus::default(),
            item_cursor: 0,
            idea_cursor: 0,
            input: String::new(),
        }
    }

    pub fn move_days(&mut self, days: i64) {
        self.selected_date += Duration::days(days);
        self.month = first_of_month(self.selected_date);
        self.item_cursor = 0;
    }

    pub fn move_months(&mut self, forward: bool) {
        let moved = if forward {
            self.month.checked_add_months(Months::new(1))
        } else {
            self.month.checked_sub_months(Months::new(1))
        };
        if let Some(month) = moved {
            self.month = month;
            self.selected_date = month;
            self.item_cursor = 0;
        }
    }

    /// None → each platform in turn → None.
    pub fn cycle_filter(&mut self) {
        self.platform_filter = match self.platform_filter {
            None => Some(Platform::ALL[0]),
            Some(p) if p == Platform::ALL[Platform::ALL.len() - 1] => None,
            Some(p) => Some(cycle_option(&Platform::ALL, p, true)),
        };
        self.item_cursor = 0;
    }

    pub fn day_items(&self) -> Vec<&ScheduledContentItem> {
        self.calendar.items_on(self.selected_date, self.platform_filter)
    }

    pub fn week_items(&self) -> Vec<&ScheduledContentItem> {
        self.calendar.items_in_week(self.selected_date, self.platform_filter)
    }

    pub fn selected_item_id(&self) -> Option<Uuid> {
        self.day_items().get(self.item_cursor).map(|i| i.id)
    }

    pub fn selected_idea_id(&self) -> Option<Uuid> {
        self.calendar.ideas().get(self.idea_cursor).map(|i| i.id)
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let (cursor, len) = match self.focus {
            CalendarFocus::Days => {
                self.move_days(if forward { 7 } else { -7 });
                return;
            }
            CalendarFocus::Items => (
                &mut self.item_cursor,
                self.calendar
                    .items_on(self.selected_date, self.platform_filter)
                    .len(),
            ),
            CalendarFocus::Ideas => (&mut self.idea_cursor, self.calendar.ideas().len()),
        };
        if len == 0 {
            *cursor = 0;
        } else if forward {
            *cursor = (*cursor + 1) % len;
        } else {
            *cursor = (*cursor + len - 1) % len;
        }
    }

    /// Schedule the typed title on the selected day.
    ///
    /// A trailing `@ time` ("Launch teaser @ 2pm") sets the post time.
    pub fn schedule_from_input(&mut self) -> Option<Uuid> {
        let (title, time) = split_time(&self.input);
        if title.is_empty() {
            return None;
        }
        let platform = self.platform_filter.unwrap_or(Platform::Instagram);
        let mut item = ScheduledContentItem::new(
            title,
            platform,
            ContentType::ShortVideo,
            self.selected_date,
            time.unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)),
        );
        item.status = ContentStatus::Scheduled;
        self.input.clear();
        Some(self.calendar.add_item(item))
    }

    pub fn add_idea_from_input(&mut self) -> Option<Uuid> {
        let title = self.input.trim();
        if title.is_empty() {
            return None;
        }
        let mut idea = ContentIdea::new(title);
        idea.platform = self.platform_filter;
        self.input.clear();
        Some(self.calendar.add_idea(idea))
    }

    pub fn cycle_selected_status(&mut self) -> Option<ContentStatus> {
        let id = self.selected_item_id()?;
        let current = self.calendar.get(id)?.status;
        let next = cycle_option(&ContentStatus::ALL, current, true);
        self.calendar.set_status(id, next).then_some(next)
    }

    pub fn delete_selected_item(&mut self) -> Option<ScheduledContentItem> {
        let id = self.selected_item_id()?;
        let removed = self.calendar.delete_item(id);
        self.item_cursor = self.item_cursor.saturating_sub(1);
        removed
    }

    pub fn delete_selected_idea(&mut self) -> Option<ContentIdea> {
        let id = self.selected_idea_id()?;
        let removed = self.calendar.delete_idea(id);
        self.idea_cursor = self.idea_cursor.saturating_sub(1);
        removed
    }

    /// Move the selected idea onto the selected day as a draft.
    pub fn promote_selected_idea(&mut self) -> Option<Uuid> {
        let id = self.selected_idea_id()?;
        let promoted = self.calendar.promote_idea(id, self.selected_date, None);
        self.idea_cursor = self.idea_cursor.saturating_sub(1);
        promoted
    }

    /// Import a weekly schedule into the week of the selected day.
    pub fn import_schedule(&mut self, entries: &[WeeklyScheduleEntry]) -> usize {
        self.calendar.import_weekly_schedule(entries, self.selected_date)
    }

    /// Monday of the selected week.
    pub fn selected_week_start(&self) -> NaiveDate {
        week_start(self.selected_date)
    }

    /// Rows of the month grid, Monday first. Days outside the month are `None`.
    pub fn month_weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let mut weeks = Vec::new();
        let mut day = week_start(self.month);
        loop {
            let mut row = [None; 7];
            for slot in row.iter_mut() {
                if day.month() == self.month.month() && day.year() == self.month.year() {
                    *slot = Some(day);
                }
                day += Duration::days(1);
            }
            weeks.push(row);
            if day.month() != self.month.month() || day.year() != self.month.year() {
                break;
            }
        }
        weeks
    }
}

fn split_time(input: &str) -> (String, Option<NaiveTime>) {
    if let Some((title, time)) = input.rsplit_once('@') {
        if let Some(parsed) = parse_post_time(time) {
            return (title.trim().to_string(), Some(parsed));
        }
    }
    (input.trim().to_string(), None)
}
