//! Desktop notification centers
//!
//! Deliver notification records as freedesktop-style desktop notifications
//! using notify-rust (primary) or the notify-send command as fallback.
//! The desktop has no registration step, so registrations are only logged.

mod notify_rust;
mod notify_send;

pub use notify_rust::NotifyRustCenter;
pub use notify_send::NotifySendCenter;

use crate::domain::notification::Priority;

/// Desktop urgency levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopUrgency {
    Low,
    Normal,
    Critical,
}

impl DesktopUrgency {
    pub fn from_priority(priority: Priority) -> Self {
        match priority.value() {
            v if v < 0 => Self::Low,
            0 => Self::Normal,
            _ => Self::Critical,
        }
    }

    /// Value accepted by `notify-send --urgency`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::Critical => "critical",
        }
    }

    /// Freedesktop icon name shown when the record carries none we can use
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Low | Self::Normal => "dialog-information",
            Self::Critical => "dialog-warning",
        }
    }
}
