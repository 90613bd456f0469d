//! Message pane persisted as an HTML file

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{NotificationCenter, TransportError};
use crate::domain::notification::{GrowlMessage, NotificationRecord};
use crate::domain::widget::MessagePane;

/// How a new message lands in the pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneMode {
    /// Add after the existing messages
    #[default]
    Append,
    /// Swap out the first message
    Replace,
}

/// HTML file holding a message pane
#[derive(Debug, Clone)]
pub struct PaneFile {
    path: PathBuf,
}

impl PaneFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("growl-notifier")
            .join("pane.html")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the pane; a missing file yields a fresh document
    pub async fn load(&self) -> Result<MessagePane, TransportError> {
        if !self.path.exists() {
            return Ok(MessagePane::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        Ok(MessagePane::parse(&content))
    }

    pub async fn save(&self, pane: &MessagePane) -> Result<(), TransportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, pane.render()).await?;
        Ok(())
    }

    /// Load, insert one fragment, save
    pub async fn insert(&self, html: &str, mode: PaneMode) -> Result<(), TransportError> {
        let mut pane = self.load().await?;
        let result = match mode {
            PaneMode::Append => pane.append_message(html),
            PaneMode::Replace => pane.set_message(html),
        };
        result.map_err(|e| TransportError::SendFailed(e.to_string()))?;
        self.save(&pane).await
    }
}

/// Render a notification as an HTML fragment for the pane
pub fn render_notification(record: &NotificationRecord) -> String {
    let mut classes = format!(
        "notification priority{}",
        record.priority_or_default().value()
    );
    if record.is_sticky() {
        classes.push_str(" sticky");
    }
    format!(
        r#"<div class="{}"><h3 class="title">{}</h3><p class="description">{}</p></div>"#,
        classes,
        html_escape::encode_text(&record.title),
        html_escape::encode_text(&record.description),
    )
}

/// Notification center that shows notifications in an HTML message pane
pub struct WidgetNotificationCenter {
    file: PaneFile,
    mode: PaneMode,
    // Serializes read-modify-write of the pane file
    write_lock: Mutex<()>,
}

impl WidgetNotificationCenter {
    pub fn new(file: PaneFile, mode: PaneMode) -> Self {
        Self {
            file,
            mode,
            write_lock: Mutex::new(()),
        }
    }

    pub fn file(&self) -> &PaneFile {
        &self.file
    }
}

#[async_trait]
impl NotificationCenter for WidgetNotificationCenter {
    async fn post(
        &self,
        message: &GrowlMessage,
        _deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        let record = match message {
            GrowlMessage::Registration(r) => {
                debug!(app = %r.application_name, "Widget pane has no registration step");
                return Ok(());
            }
            GrowlMessage::Notification(n) => n,
        };

        let _guard = self.write_lock.lock().await;
        self.file
            .insert(&render_notification(record), self.mode)
            .await?;
        debug!(path = %self.file.path().display(), "Updated message pane");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "widget"
    }
}
