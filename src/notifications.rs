//! User-facing notices raised by rejected operations.
//!
//! The engine never shows UI itself. Rejections the user has to acknowledge
//! (deleting the root, linking a node to itself, linking with nothing
//! selected) are queued here and drained by the host.

use crate::error::EngineError;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    /// The host should show this modally until dismissed
    pub blocking: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message, false)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message, true)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message, true)
    }

    fn new(level: NoticeLevel, message: impl Into<String>, blocking: bool) -> Self {
        Self {
            id: 0,
            level,
            message: message.into(),
            blocking,
        }
    }

    /// The notice a rejected operation should surface.
    pub fn from_error(err: &EngineError) -> Self {
        match err {
            EngineError::ProtectedEntity(_) => Self::warning("The main topic cannot be removed."),
            EngineError::DegenerateLink(_) => Self::warning("A node cannot be linked to itself."),
            EngineError::MalformedImport(_) => {
                Self::error("The map could not be opened. Check the file format.")
            }
            EngineError::InvalidImage(_) => Self::error("The image could not be read."),
            EngineError::InvalidReference { .. } => Self::info(err.to_string()),
        }
    }
}

/// FIFO of pending notices.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice and return its id.
    pub fn push(&mut self, mut notice: Notice) -> u64 {
        self.next_id += 1;
        notice.id = self.next_id;
        self.notices.push_back(notice);
        self.next_id
    }

    /// Remove a notice the user dismissed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn has_blocking(&self) -> bool {
        self.notices.iter().any(|n| n.blocking)
    }

    pub fn count(&self) -> usize {
        self.notices.len()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
