// Activity console.
// Collects user-visible log lines and mirrors them to the diagnostic log.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

/// Keep at most this many messages.
const CONSOLE_CAPACITY: usize = 500;

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Error, message)
    }

    fn new(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Console state: messages, unread badge, and scroll position.
#[derive(Debug, Default)]
pub struct Console {
    pub messages: Vec<ConsoleMessage>,
    /// Warnings and errors not yet seen in the console popup.
    pub unread: usize,
    pub list_state: ListState,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::info(message));
    }

    pub fn log_warn(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::warn(message));
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::error(message));
    }

    pub fn push(&mut self, message: ConsoleMessage) {
        match message.level {
            ConsoleLevel::Info => tracing::info!(target: "console", "{}", message.message),
            ConsoleLevel::Warn => {
                tracing::warn!(target: "console", "{}", message.message);
                self.unread += 1;
            }
            ConsoleLevel::Error => {
                tracing::error!(target: "console", "{}", message.message);
                self.unread += 1;
            }
        }

        self.messages.push(message);
        if self.messages.len() > CONSOLE_CAPACITY {
            let overflow = self.messages.len() - CONSOLE_CAPACITY;
            self.messages.drain(..overflow);
        }
        self.list_state.select(Some(0));
    }

    /// Clear the unread badge.
    pub fn mark_read(&mut self) {
        self.unread = 0;
    }

    /// Select the next (older) message. Newest is shown first.
    pub fn select_next(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.messages.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous (newer) message.
    pub fn select_prev(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i));
    }
}
