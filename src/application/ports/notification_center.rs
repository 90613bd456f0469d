//! Notification center port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::GrowlMessage;

/// Transport errors
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Failed to encode packet: {0}")]
    Packet(String),

    #[error("notify-send not found")]
    NotifySendNotFound,

    #[error("Failed to deliver notification: {0}")]
    SendFailed(String),
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Port for the distributed notification center the daemon listens on
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Post a record under its notification name.
    ///
    /// # Arguments
    /// * `message` - The registration or notification record
    /// * `deliver_immediately` - Ask the center to deliver without coalescing
    ///
    /// # Returns
    /// Ok(()) once the record has been handed off. Receipt by the daemon is
    /// never acknowledged.
    async fn post(
        &self,
        message: &GrowlMessage,
        deliver_immediately: bool,
    ) -> Result<(), TransportError>;

    /// Short name of the transport, for logs
    fn name(&self) -> &'static str;
}

/// Blanket implementation for boxed notification centers
#[async_trait]
impl NotificationCenter for Box<dyn NotificationCenter> {
    async fn post(
        &self,
        message: &GrowlMessage,
        deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        self.as_ref().post(message, deliver_immediately).await
    }

    fn name(&self) -> &'static str {
        self.as_ref().name()
    }
}

#[async_trait]
impl<C: NotificationCenter + ?Sized> NotificationCenter for Arc<C> {
    async fn post(
        &self,
        message: &GrowlMessage,
        deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        self.as_ref().post(message, deliver_immediately).await
    }

    fn name(&self) -> &'static str {
        self.as_ref().name()
    }
}
