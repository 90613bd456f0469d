//! Cross-platform desktop notification center using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationCenter, TransportError};
use crate::domain::notification::{GrowlMessage, NotificationRecord};

use super::DesktopUrgency;

/// Desktop notification center using notify-rust
#[derive(Debug, Default)]
pub struct NotifyRustCenter;

impl NotifyRustCenter {
    /// Create a new notify-rust center
    pub fn new() -> Self {
        Self
    }

    fn build(record: &NotificationRecord) -> notify_rust::Notification {
        let urgency = DesktopUrgency::from_priority(record.priority_or_default());
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&record.application_name)
            .summary(&record.title)
            .body(&record.description)
            .icon(urgency.icon_name());

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(match urgency {
            DesktopUrgency::Low => notify_rust::Urgency::Low,
            DesktopUrgency::Normal => notify_rust::Urgency::Normal,
            DesktopUrgency::Critical => notify_rust::Urgency::Critical,
        });

        if record.is_sticky() {
            notification.timeout(notify_rust::Timeout::Never);
        }
        notification
    }
}

#[async_trait]
impl NotificationCenter for NotifyRustCenter {
    async fn post(
        &self,
        message: &GrowlMessage,
        _deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        let record = match message {
            GrowlMessage::Registration(r) => {
                debug!(
                    app = %r.application_name,
                    notifications = ?r.all_notifications,
                    "Desktop has no registration step, nothing to send"
                );
                return Ok(());
            }
            GrowlMessage::Notification(n) => n,
        };

        let notification = Self::build(record);

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| TransportError::SendFailed(format!("Task join error: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}
