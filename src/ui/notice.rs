use crate::core::error::Error;
use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    shown_at: Instant,
}

/// The single transient message slot at the bottom of the dashboard.
/// A newer notice replaces the current one.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text.into(), Instant::now());
    }

    pub fn error(&mut self, err: &Error) {
        self.push(NoticeLevel::Error, err.user_message(), Instant::now());
    }

    fn push(&mut self, level: NoticeLevel, text: String, now: Instant) {
        self.current = Some(Notice {
            level,
            text,
            shown_at: now,
        });
    }

    /// The notice to draw at `now`, dropping it once it has expired.
    pub fn visible(&mut self, now: Instant) -> Option<&Notice> {
        if self
            .current
            .as_ref()
            .is_some_and(|n| now.duration_since(n.shown_at) >= NOTICE_DURATION)
        {
            self.current = None;
        }
        self.current.as_ref()
    }
}
