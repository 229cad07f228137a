use std::time::{Duration, Instant};

use ratatui::style::Style;

use crate::ui::theme::{COLOR_GOOD, COLOR_WARN};

const INFO_TTL: Duration = Duration::from_secs(3);
// Warnings outlive the tick that raised them so the operator can catch a
// skipped sample between refreshes.
const WARN_TTL: Duration = Duration::from_secs(6);

pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub expires_at: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self::with_ttl(StatusLevel::Info, text.into(), INFO_TTL)
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self::with_ttl(StatusLevel::Warn, text.into(), WARN_TTL)
    }

    fn with_ttl(level: StatusLevel, text: String, ttl: Duration) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Clone, Copy)]
pub enum StatusLevel {
    Info,
    Warn,
}

impl StatusLevel {
    pub fn style(self) -> Style {
        match self {
            StatusLevel::Info => Style::default().fg(COLOR_GOOD),
            StatusLevel::Warn => Style::default().fg(COLOR_WARN),
        }
    }
}
