//! In-memory notification center
//!
//! Keeps every posting in order. Used for dry runs and in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::{NotificationCenter, TransportError};
use crate::domain::notification::{GrowlMessage, NotificationName, UserInfo};

/// One recorded posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub message: GrowlMessage,
    pub deliver_immediately: bool,
}

impl Posting {
    pub fn name(&self) -> NotificationName {
        self.message.name()
    }

    pub fn user_info(&self) -> UserInfo {
        self.message.user_info()
    }

    /// JSON view: name, immediacy and the user-info dictionary
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name().as_str(),
            "deliverImmediately": self.deliver_immediately,
            "userInfo": self.user_info(),
        })
    }
}

/// Notification center that records postings instead of delivering them.
/// Clones share the same record list.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationCenter {
    postings: Arc<Mutex<Vec<Posting>>>,
}

impl MemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything posted so far
    pub fn postings(&self) -> Vec<Posting> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Posting>> {
        // A poisoned lock still holds a consistent list
        self.postings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl NotificationCenter for MemoryNotificationCenter {
    async fn post(
        &self,
        message: &GrowlMessage,
        deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        self.lock().push(Posting {
            message: message.clone(),
            deliver_immediately,
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
