//! Domain layer - Core business logic
//!
//! Contains value objects, records, the message pane and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;
pub mod widget;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notification::{
    GrowlMessage, Icon, NotificationName, NotificationRecord, Priority, RegistrationRecord,
    UserInfo, UserInfoValue,
};
pub use widget::{MessagePane, Node};
