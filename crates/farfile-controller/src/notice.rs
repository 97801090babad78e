//! Transient success and error notices.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Kind of notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A notice shown above the listing until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    /// When the notice should disappear.
    pub fn expires_at(&self) -> Instant {
        self.posted_at + self.ttl
    }

    /// Check if the notice has expired at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    /// Text shown to the user.
    pub fn text(&self) -> String {
        match self.kind {
            NoticeKind::Success => self.message.clone(),
            NoticeKind::Error => format!("Error: {}", self.message),
        }
    }
}

/// Active notices, newest first.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: VecDeque<Notice>,
}

impl Notices {
    /// Create an empty notice list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a notice above all existing ones.
    pub fn post(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        ttl: Duration,
        now: Instant,
    ) {
        self.items.push_front(Notice {
            kind,
            message: message.into(),
            posted_at: now,
            ttl,
        });
    }

    /// Remove every notice expired at `now`. Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        before - self.items.len()
    }

    /// Earliest expiry among active notices.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(Notice::expires_at).min()
    }

    /// Iterate notices, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    /// Most recent notice.
    pub fn latest(&self) -> Option<&Notice> {
        self.items.front()
    }

    /// Number of active notices.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no active notices.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
