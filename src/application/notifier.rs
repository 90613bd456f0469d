//! Register-and-notify use case

use thiserror::Error;
use tracing::debug;

use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::notification::{
    GrowlMessage, Icon, NotificationRecord, Priority, RegistrationRecord,
};

use super::ports::{NotificationCenter, TransportError};

/// Errors from the notifier use case
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Delivery failed: {0}")]
    Transport(#[from] TransportError),
}

/// Parameters of a single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyRequest {
    /// Notification type name
    pub note_type: String,
    /// User-visible title
    pub title: String,
    /// User-visible description
    pub description: String,
    /// Icon for this notification; defaults to the application icon
    pub icon: Option<Icon>,
    /// Icon of the sending application
    pub app_icon: Option<Icon>,
    /// Keep the notification on screen until dismissed
    pub sticky: Option<bool>,
    pub priority: Option<Priority>,
}

impl NotifyRequest {
    pub fn new(
        note_type: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            note_type: note_type.into(),
            title: title.into(),
            description: description.into(),
            icon: None,
            app_icon: None,
            sticky: None,
            priority: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_app_icon(mut self, icon: Icon) -> Self {
        self.app_icon = Some(icon);
        self
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = Some(sticky);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Registers an application with the daemon and posts its notifications.
///
/// Every posting is fire-and-forget: the record is handed to the
/// notification center with immediate delivery requested and nothing waits
/// for the daemon. Registration is expected to come first but is not
/// enforced.
pub struct GrowlNotifier<C>
where
    C: NotificationCenter,
{
    app_name: String,
    notifications: Vec<String>,
    default_notifications: Option<Vec<String>>,
    app_icon: Option<Icon>,
    center: C,
}

impl<C> GrowlNotifier<C>
where
    C: NotificationCenter,
{
    /// Create a notifier. Nothing is validated.
    pub fn new(
        app_name: impl Into<String>,
        notifications: Vec<String>,
        default_notifications: Option<Vec<String>>,
        app_icon: Option<Icon>,
        center: C,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            notifications,
            default_notifications,
            app_icon,
            center,
        }
    }

    /// Notifier with the default name and no announced notifications
    pub fn with_center(center: C) -> Self {
        Self::new(DEFAULT_APP_NAME, Vec::new(), None, None, center)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Every notification type announced so far, in order, with duplicates
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn default_notifications(&self) -> Option<&[String]> {
        self.default_notifications.as_deref()
    }

    pub fn app_icon(&self) -> Option<&Icon> {
        self.app_icon.as_ref()
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    /// Announce the application and its notification types.
    ///
    /// A missing icon is replaced by the generic icon and a missing default
    /// list by a copy of the full list; both substitutions are kept for
    /// later calls.
    pub async fn register(&mut self) -> Result<(), NotifierError> {
        let app_icon = self.app_icon.get_or_insert_with(Icon::generic).clone();
        let default_notifications = self
            .default_notifications
            .get_or_insert_with(|| self.notifications.clone())
            .clone();

        let record = RegistrationRecord {
            application_name: self.app_name.clone(),
            all_notifications: self.notifications.clone(),
            default_notifications,
            application_icon: app_icon,
        };

        debug!(
            app = %self.app_name,
            notifications = record.all_notifications.len(),
            defaults = record.default_notifications.len(),
            transport = self.center.name(),
            "Posting registration"
        );

        self.center
            .post(&GrowlMessage::Registration(record), true)
            .await?;
        Ok(())
    }

    /// Post one notification.
    ///
    /// The type is appended to the announced list on every call, before the
    /// record is posted. Sticky, priority and the sending-app icon are only
    /// present in the record when the request supplies them.
    pub async fn notify(&mut self, request: NotifyRequest) -> Result<(), NotifierError> {
        self.notifications.push(request.note_type.clone());

        let record = NotificationRecord {
            application_name: self.app_name.clone(),
            name: request.note_type,
            title: request.title,
            description: request.description,
            icon: request.icon.or_else(|| self.app_icon.clone()),
            app_icon: request.app_icon,
            sticky: request.sticky,
            priority: request.priority,
        };

        debug!(
            app = %self.app_name,
            note_type = %record.name,
            sticky = ?record.sticky,
            priority = ?record.priority,
            transport = self.center.name(),
            "Posting notification"
        );

        self.center
            .post(&GrowlMessage::Notification(record), true)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{
        KEY_APP_ICON, KEY_NOTIFICATIONS_ALL, KEY_NOTIFICATIONS_DEFAULT, KEY_NOTIFICATION_APP_ICON,
        KEY_NOTIFICATION_ICON, KEY_NOTIFICATION_PRIORITY, KEY_NOTIFICATION_STICKY,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // Mock implementations for testing
    #[derive(Default, Clone)]
    struct MockCenter {
        posted: Arc<Mutex<Vec<(GrowlMessage, bool)>>>,
    }

    impl MockCenter {
        fn posted(&self) -> Vec<(GrowlMessage, bool)> {
            self.posted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationCenter for MockCenter {
        async fn post(
            &self,
            message: &GrowlMessage,
            deliver_immediately: bool,
        ) -> Result<(), TransportError> {
            self.posted
                .lock()
                .unwrap()
                .push((message.clone(), deliver_immediately));
            Ok(())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    struct FailingCenter;

    #[async_trait]
    impl NotificationCenter for FailingCenter {
        async fn post(&self, _: &GrowlMessage, _: bool) -> Result<(), TransportError> {
            Err(TransportError::SendFailed("daemon unreachable".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn register_substitutes_generic_icon() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::new("Beep", names(&["Foo"]), None, None, center.clone());

        notifier.register().await.unwrap();

        let posted = center.posted();
        assert_eq!(posted.len(), 1);
        let info = posted[0].0.user_info();
        assert_eq!(
            info.get(KEY_APP_ICON).and_then(|v| v.as_data()),
            Some(Icon::generic().data())
        );
        assert!(notifier.app_icon().unwrap().is_generic());
    }

    #[tokio::test]
    async fn register_keeps_supplied_icon() {
        let center = MockCenter::default();
        let icon = Icon::from_bytes(b"GIF89a");
        let mut notifier =
            GrowlNotifier::new("Beep", names(&["Foo"]), None, Some(icon.clone()), center.clone());

        notifier.register().await.unwrap();

        let info = center.posted()[0].0.user_info();
        assert_eq!(info.get(KEY_APP_ICON).and_then(|v| v.as_data()), Some(icon.data()));
    }

    #[tokio::test]
    async fn register_copies_full_list_as_defaults() {
        let center = MockCenter::default();
        let mut notifier =
            GrowlNotifier::new("Beep", names(&["A", "B"]), None, None, center.clone());

        notifier.register().await.unwrap();

        let info = center.posted()[0].0.user_info();
        assert_eq!(
            info.get(KEY_NOTIFICATIONS_DEFAULT).and_then(|v| v.as_list()),
            Some(&names(&["A", "B"])[..])
        );
        assert_eq!(notifier.default_notifications(), Some(&names(&["A", "B"])[..]));
    }

    #[tokio::test]
    async fn register_keeps_explicit_defaults() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::new(
            "Beep",
            names(&["A", "B"]),
            Some(names(&["B"])),
            None,
            center.clone(),
        );

        notifier.register().await.unwrap();

        let info = center.posted()[0].0.user_info();
        assert_eq!(
            info.get(KEY_NOTIFICATIONS_DEFAULT).and_then(|v| v.as_list()),
            Some(&names(&["B"])[..])
        );
    }

    #[tokio::test]
    async fn copied_defaults_do_not_track_later_notifications() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::new("Beep", names(&["A"]), None, None, center.clone());

        notifier.register().await.unwrap();
        notifier
            .notify(NotifyRequest::new("B", "t", "d"))
            .await
            .unwrap();
        notifier.register().await.unwrap();

        let info = center.posted()[2].0.user_info();
        assert_eq!(
            info.get(KEY_NOTIFICATIONS_ALL).and_then(|v| v.as_list()),
            Some(&names(&["A", "B"])[..])
        );
        assert_eq!(
            info.get(KEY_NOTIFICATIONS_DEFAULT).and_then(|v| v.as_list()),
            Some(&names(&["A"])[..])
        );
    }

    #[tokio::test]
    async fn postings_request_immediate_delivery() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::with_center(center.clone());

        notifier.register().await.unwrap();
        notifier
            .notify(NotifyRequest::new("Foo", "t", "d"))
            .await
            .unwrap();

        assert!(center.posted().iter().all(|(_, immediate)| *immediate));
        assert_eq!(notifier.app_name(), "GrowlNotifier");
    }

    #[tokio::test]
    async fn notify_appends_type_every_call() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::new("Beep", names(&["Foo"]), None, None, center.clone());

        notifier
            .notify(NotifyRequest::new("Foo", "t", "d"))
            .await
            .unwrap();
        notifier
            .notify(NotifyRequest::new("Foo", "t", "d"))
            .await
            .unwrap();

        assert_eq!(notifier.notifications(), &names(&["Foo", "Foo", "Foo"])[..]);
    }

    #[tokio::test]
    async fn notify_omits_unsupplied_fields() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::new("Beep", vec![], None, None, center.clone());

        notifier
            .notify(NotifyRequest::new("Foo", "Title", "Body"))
            .await
            .unwrap();

        let info = center.posted()[0].0.user_info();
        assert!(!info.contains_key(KEY_NOTIFICATION_APP_ICON));
        assert!(!info.contains_key(KEY_NOTIFICATION_STICKY));
        assert!(!info.contains_key(KEY_NOTIFICATION_PRIORITY));
        // No app icon yet, so no fallback for the notification icon either
        assert!(!info.contains_key(KEY_NOTIFICATION_ICON));
    }

    #[tokio::test]
    async fn notify_includes_supplied_fields_verbatim() {
        let center = MockCenter::default();
        let mut notifier = GrowlNotifier::new("Beep", vec![], None, None, center.clone());
        let sender = Icon::from_bytes(b"II*\0sender");

        notifier
            .notify(
                NotifyRequest::new("Foo", "Title", "Body")
                    .with_app_icon(sender.clone())
                    .with_sticky(false)
                    .with_priority(Priority::Emergency),
            )
            .await
            .unwrap();

        let info = center.posted()[0].0.user_info();
        assert_eq!(
            info.get(KEY_NOTIFICATION_APP_ICON).and_then(|v| v.as_data()),
            Some(sender.data())
        );
        assert_eq!(info.get(KEY_NOTIFICATION_STICKY).and_then(|v| v.as_bool()), Some(false));
        assert_eq!(
            info.get(KEY_NOTIFICATION_PRIORITY).and_then(|v| v.as_integer()),
            Some(2)
        );
    }

    #[tokio::test]
    async fn notify_icon_defaults_to_app_icon() {
        let center = MockCenter::default();
        let app_icon = Icon::from_bytes(b"GIF89a-app");
        let mut notifier =
            GrowlNotifier::new("Beep", vec![], None, Some(app_icon.clone()), center.clone());

        notifier
            .notify(NotifyRequest::new("Foo", "t", "d"))
            .await
            .unwrap();
        let own = Icon::from_bytes(b"GIF89a-own");
        notifier
            .notify(NotifyRequest::new("Foo", "t", "d").with_icon(own.clone()))
            .await
            .unwrap();

        let posted = center.posted();
        assert_eq!(
            posted[0].0.user_info().get(KEY_NOTIFICATION_ICON).and_then(|v| v.as_data()),
            Some(app_icon.data())
        );
        assert_eq!(
            posted[1].0.user_info().get(KEY_NOTIFICATION_ICON).and_then(|v| v.as_data()),
            Some(own.data())
        );
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let mut notifier = GrowlNotifier::with_center(FailingCenter);

        let err = notifier.register().await.unwrap_err();
        assert!(err.to_string().contains("daemon unreachable"));

        let err = notifier
            .notify(NotifyRequest::new("Foo", "t", "d"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifierError::Transport(_)));
        // The type is still recorded even though delivery failed
        assert_eq!(notifier.notifications(), &names(&["Foo"])[..]);
    }
}
