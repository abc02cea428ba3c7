//! User-facing notices.
//!
//! A notice is shown modally until dismissed. Every notice is also logged,
//! at a level matching its category.

use std::collections::VecDeque;

use planner_core::prelude::*;

/// Oldest notices are dropped beyond this many.
const MAX_NOTICES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    /// Something the user must do first (sign in, buy credits, upgrade)
    Precondition,
    /// A service call or file write failed
    OperationFailed,
    Success,
    Info,
}

impl NoticeCategory {
    pub fn title(&self) -> &'static str {
        match self {
            NoticeCategory::Precondition => "Action needed",
            NoticeCategory::OperationFailed => "Something went wrong",
            NoticeCategory::Success => "Done",
            NoticeCategory::Info => "Note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub category: NoticeCategory,
    pub message: String,
}

impl Notice {
    pub fn new(category: NoticeCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::Info, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::OperationFailed, message)
    }

    /// Categorize a domain error.
    pub fn from_error(error: &Error) -> Self {
        let category = if error.is_precondition() {
            NoticeCategory::Precondition
        } else {
            NoticeCategory::OperationFailed
        };
        Self::new(category, error.to_string())
    }
}

#[derive(Debug, Default)]
pub struct NoticeQueue {
    queue: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        match notice.category {
            NoticeCategory::Precondition => warn!("Notice: {}", notice.message),
            NoticeCategory::OperationFailed => error!("Notice: {}", notice.message),
            NoticeCategory::Success | NoticeCategory::Info => info!("Notice: {}", notice.message),
        }
        if self.queue.len() == MAX_NOTICES {
            self.queue.pop_front();
        }
        self.queue.push_back(notice);
    }

    /// The notice currently shown.
    pub fn current(&self) -> Option<&Notice> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<Notice> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let notice = Notice::from_error(&Error::not_signed_in("save"));
        assert_eq!(notice.category, NoticeCategory::Precondition);

        let notice = Notice::from_error(&Error::service("generate", "503"));
        assert_eq!(notice.category, NoticeCategory::OperationFailed);
    }

    #[test]
    fn test_queue_is_fifo_and_bounded() {
        let mut queue = NoticeQueue::new();
        for i in 0..(MAX_NOTICES + 3) {
            queue.push(Notice::info(format!("n{i}")));
        }
        assert_eq!(queue.len(), MAX_NOTICES);
        assert_eq!(queue.current().unwrap().message, "n3");
        queue.dismiss();
        assert_eq!(queue.current().unwrap().message, "n4");
    }
}
