//! Notification center selection from configuration

use std::path::PathBuf;

use tracing::debug;

use crate::application::ports::NotificationCenter;
use crate::domain::config::{AppConfig, TransportKind};

use super::network::UdpNotificationCenter;
use super::notification::{NotifyRustCenter, NotifySendCenter};
use super::widget::{PaneFile, PaneMode, WidgetNotificationCenter};

/// Pane file from config, or the default location
pub fn pane_path(config: &AppConfig) -> PathBuf {
    config
        .pane
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(PaneFile::default_path)
}

/// Build the notification center for the configured transport
pub fn create_center(config: &AppConfig) -> Box<dyn NotificationCenter> {
    let transport = config.transport_or_default();
    debug!(transport = %transport, "Selecting notification center");

    match transport {
        TransportKind::Udp => Box::new(UdpNotificationCenter::new(
            config.host_or_default(),
            config.port_or_default(),
            config.auth_or_default(),
            config.password().map(str::to_string),
        )),
        TransportKind::Desktop => Box::new(NotifyRustCenter::new()),
        TransportKind::NotifySend => Box::new(NotifySendCenter::new()),
        TransportKind::Widget => Box::new(WidgetNotificationCenter::new(
            PaneFile::new(pane_path(config)),
            PaneMode::Append,
        )),
    }
}
