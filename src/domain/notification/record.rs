//! Registration and notification records
//!
//! A record is the payload of one posting to the notification center. Each
//! record flattens into a [`UserInfo`] dictionary using the key names the
//! daemon expects.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::icon::Icon;
use super::priority::Priority;

pub const KEY_APP_NAME: &str = "ApplicationName";
pub const KEY_APP_ICON: &str = "ApplicationIcon";
pub const KEY_NOTIFICATIONS_ALL: &str = "AllNotifications";
pub const KEY_NOTIFICATIONS_DEFAULT: &str = "DefaultNotifications";

pub const KEY_NOTIFICATION_NAME: &str = "NotificationName";
pub const KEY_NOTIFICATION_TITLE: &str = "NotificationTitle";
pub const KEY_NOTIFICATION_DESCRIPTION: &str = "NotificationDescription";
pub const KEY_NOTIFICATION_ICON: &str = "NotificationIcon";
pub const KEY_NOTIFICATION_APP_ICON: &str = "NotificationAppIcon";
pub const KEY_NOTIFICATION_STICKY: &str = "NotificationSticky";
pub const KEY_NOTIFICATION_PRIORITY: &str = "NotificationPriority";

/// Name under which a record is posted to the notification center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationName {
    ApplicationRegistration,
    Notification,
}

impl NotificationName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationRegistration => "GrowlApplicationRegistrationNotification",
            Self::Notification => "GrowlNotification",
        }
    }
}

impl fmt::Display for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed value stored in a user-info dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInfoValue {
    String(String),
    List(Vec<String>),
    Data(Vec<u8>),
    Bool(bool),
    Integer(i64),
}

impl UserInfoValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl Serialize for UserInfoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Data(data) => serializer
                .serialize_str(&base64::engine::general_purpose::STANDARD.encode(data)),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
        }
    }
}

/// Dictionary attached to a posting, keyed by the daemon's field names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    entries: BTreeMap<&'static str, UserInfoValue>,
}

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: UserInfoValue) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&UserInfoValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for UserInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Announces an application and the notification types it may post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub application_name: String,
    pub all_notifications: Vec<String>,
    pub default_notifications: Vec<String>,
    pub application_icon: Icon,
}

impl RegistrationRecord {
    pub fn to_user_info(&self) -> UserInfo {
        let mut info = UserInfo::new();
        info.insert(
            KEY_APP_NAME,
            UserInfoValue::String(self.application_name.clone()),
        );
        info.insert(
            KEY_NOTIFICATIONS_ALL,
            UserInfoValue::List(self.all_notifications.clone()),
        );
        info.insert(
            KEY_NOTIFICATIONS_DEFAULT,
            UserInfoValue::List(self.default_notifications.clone()),
        );
        info.insert(
            KEY_APP_ICON,
            UserInfoValue::Data(self.application_icon.data().to_vec()),
        );
        info
    }
}

/// A single notification event
///
/// Optional fields are left out of the user-info dictionary entirely when
/// they were not supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub application_name: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub icon: Option<Icon>,
    pub app_icon: Option<Icon>,
    pub sticky: Option<bool>,
    pub priority: Option<Priority>,
}

impl NotificationRecord {
    pub fn to_user_info(&self) -> UserInfo {
        let mut info = UserInfo::new();
        info.insert(KEY_NOTIFICATION_NAME, UserInfoValue::String(self.name.clone()));
        info.insert(
            KEY_APP_NAME,
            UserInfoValue::String(self.application_name.clone()),
        );
        info.insert(
            KEY_NOTIFICATION_TITLE,
            UserInfoValue::String(self.title.clone()),
        );
        info.insert(
            KEY_NOTIFICATION_DESCRIPTION,
            UserInfoValue::String(self.description.clone()),
        );
        if let Some(ref icon) = self.icon {
            info.insert(KEY_NOTIFICATION_ICON, UserInfoValue::Data(icon.data().to_vec()));
        }
        if let Some(ref app_icon) = self.app_icon {
            info.insert(
                KEY_NOTIFICATION_APP_ICON,
                UserInfoValue::Data(app_icon.data().to_vec()),
            );
        }
        if let Some(sticky) = self.sticky {
            info.insert(KEY_NOTIFICATION_STICKY, UserInfoValue::Bool(sticky));
        }
        if let Some(priority) = self.priority {
            info.insert(
                KEY_NOTIFICATION_PRIORITY,
                UserInfoValue::Integer(i64::from(priority.value())),
            );
        }
        info
    }

    /// Sticky flag, treating an absent flag as not sticky
    pub fn is_sticky(&self) -> bool {
        self.sticky.unwrap_or(false)
    }

    /// Priority, treating an absent priority as normal
    pub fn priority_or_default(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

/// One posting to the notification center
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrowlMessage {
    Registration(RegistrationRecord),
    Notification(NotificationRecord),
}

impl GrowlMessage {
    pub const fn name(&self) -> NotificationName {
        match self {
            Self::Registration(_) => NotificationName::ApplicationRegistration,
            Self::Notification(_) => NotificationName::Notification,
        }
    }

    pub fn application_name(&self) -> &str {
        match self {
            Self::Registration(r) => &r.application_name,
            Self::Notification(n) => &n.application_name,
        }
    }

    pub fn user_info(&self) -> UserInfo {
        match self {
            Self::Registration(r) => r.to_user_info(),
            Self::Notification(n) => n.to_user_info(),
        }
    }
}

impl From<RegistrationRecord> for GrowlMessage {
    fn from(record: RegistrationRecord) -> Self {
        Self::Registration(record)
    }
}

impl From<NotificationRecord> for GrowlMessage {
    fn from(record: NotificationRecord) -> Self {
        Self::Notification(record)
    }
}
