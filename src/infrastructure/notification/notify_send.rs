//! notify-send notification center

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{NotificationCenter, TransportError};
use crate::domain::notification::{GrowlMessage, NotificationRecord};

use super::DesktopUrgency;

/// Notification center that shells out to notify-send
#[derive(Debug, Default)]
pub struct NotifySendCenter;

impl NotifySendCenter {
    /// Create a new notify-send center
    pub fn new() -> Self {
        Self
    }

    /// Command-line arguments for one notification
    fn args(record: &NotificationRecord) -> Vec<String> {
        let urgency = DesktopUrgency::from_priority(record.priority_or_default());
        let mut args = vec![
            "--app-name".to_string(),
            record.application_name.clone(),
            "--urgency".to_string(),
            urgency.as_str().to_string(),
            "--icon".to_string(),
            urgency.icon_name().to_string(),
        ];
        if record.is_sticky() {
            args.push("--expire-time".to_string());
            args.push("0".to_string());
        }
        args.push("--".to_string());
        args.push(record.title.clone());
        args.push(record.description.clone());
        args
    }
}

#[async_trait]
impl NotificationCenter for NotifySendCenter {
    async fn post(
        &self,
        message: &GrowlMessage,
        _deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        let record = match message {
            GrowlMessage::Registration(r) => {
                debug!(app = %r.application_name, "notify-send has no registration step");
                return Ok(());
            }
            GrowlMessage::Notification(n) => n,
        };

        let status = Command::new("notify-send")
            .args(Self::args(record))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TransportError::NotifySendNotFound
                } else {
                    TransportError::SendFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(TransportError::SendFailed(format!(
                "notify-send exited with status: {}",
                status
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "notify-send"
    }
}
