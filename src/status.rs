//! Transient status line.
//!
//! Each message carries its own deadline. Setting a new message re-arms the
//! deadline, so the expiry of an older message can never clear a newer one.

use std::time::{Duration, Instant};

use crate::constants::{STATUS_ERROR_TTL, STATUS_INFO_TTL, STATUS_SUCCESS_TTL, STATUS_WARNING_TTL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn ttl(self) -> Duration {
        match self {
            Self::Info => STATUS_INFO_TTL,
            Self::Success => STATUS_SUCCESS_TTL,
            Self::Warning => STATUS_WARNING_TTL,
            Self::Error => STATUS_ERROR_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    text: String,
    kind: StatusKind,
    expires_at: Instant,
}

/// The one-line status shown under the panels.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    current: Option<Message>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` until `now` plus the kind's lifetime.
    pub fn set_at(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.current = Some(Message {
            text: text.into(),
            kind,
            expires_at: now + kind.ttl(),
        });
    }

    pub fn set(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.set_at(kind, text, Instant::now());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Success, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Error, text);
    }

    /// Drops the message if its deadline has passed. Returns `true` if it did.
    pub fn clear_expired(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(msg) if now >= msg.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// The visible message, if any.
    pub fn current(&self) -> Option<(StatusKind, &str)> {
        self.current.as_ref().map(|m| (m.kind, m.text.as_str()))
    }
}
