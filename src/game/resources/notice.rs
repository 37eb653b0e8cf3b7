//! Transient user-facing messages
//!
//! Only one notice is shown at a time; posting a new one replaces the old.
//! Notices expire on their own after a fixed lifetime, the host decides how
//! to draw them.

use web_time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    /// Monotonic counter, one per posted notice
    pub sequence: u64,
    pub expires_at: Instant,
}

/// Holder for the single current notice
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    posted: u64,
    lifetime: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

impl NoticeBoard {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            posted: 0,
            lifetime,
        }
    }

    pub fn post(&mut self, text: impl Into<String>, kind: NoticeKind) {
        self.post_at(text, kind, Instant::now());
    }

    pub fn post_at(&mut self, text: impl Into<String>, kind: NoticeKind, now: Instant) {
        self.posted += 1;
        self.current = Some(Notice {
            text: text.into(),
            kind,
            sequence: self.posted,
            expires_at: now + self.lifetime,
        });
    }

    /// The notice still visible at `now`
    pub fn active_at(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|n| now < n.expires_at)
    }

    pub fn active(&self) -> Option<&Notice> {
        self.active_at(Instant::now())
    }

    /// Most recent notice regardless of expiry
    pub fn latest(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Total notices posted since construction
    pub fn posted(&self) -> u64 {
        self.posted
    }

    /// Drop the current notice once it has expired
    pub fn expire(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }
}
