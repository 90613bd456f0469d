//! Application configuration value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::error::PriorityParseError;
use crate::domain::notification::Priority;

/// Application name used when none is configured
pub const DEFAULT_APP_NAME: &str = "GrowlNotifier";

/// Notification type posted when none is given
pub const DEFAULT_NOTIFICATION_TYPE: &str = "Notification";

/// Default Growl network port
pub const DEFAULT_PORT: u16 = 9887;

/// Where postings are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportKind {
    /// Growl network protocol over UDP
    Udp,
    /// Desktop notifications via notify-rust
    #[default]
    Desktop,
    /// Desktop notifications via the notify-send command
    NotifySend,
    /// HTML message pane on disk
    Widget,
}

impl TransportKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Desktop => "desktop",
            Self::NotifySend => "notify-send",
            Self::Widget => "widget",
        }
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "udp" | "network" => Ok(Self::Udp),
            "desktop" => Ok(Self::Desktop),
            "notify-send" => Ok(Self::NotifySend),
            "widget" => Ok(Self::Widget),
            _ => Err(format!(
                "Invalid transport: \"{}\". Valid transports are: udp, desktop, notify-send, widget",
                s
            )),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Packet authentication for the network transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthMethod {
    #[default]
    Md5,
    Sha256,
    None,
}

impl AuthMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::None => "none",
        }
    }
}

impl FromStr for AuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "none" | "noauth" => Ok(Self::None),
            _ => Err(format!(
                "Invalid auth method: \"{}\". Valid methods are: md5, sha256, none",
                s
            )),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Network transport configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub password: Option<String>,
    pub auth: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: Option<String>,
    pub transport: Option<String>,
    pub notification_type: Option<String>,
    pub sticky: Option<bool>,
    pub priority: Option<String>,
    pub app_icon: Option<String>,
    pub pane: Option<String>,
    pub network: Option<NetworkConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            transport: Some(TransportKind::default().to_string()),
            notification_type: Some(DEFAULT_NOTIFICATION_TYPE.to_string()),
            sticky: Some(false),
            priority: None,
            app_icon: None,
            pane: None,
            network: Some(NetworkConfig {
                host: Some("localhost".to_string()),
                port: Some(DEFAULT_PORT),
                password: None,
                auth: Some(AuthMethod::default().to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            transport: other.transport.or(self.transport),
            notification_type: other.notification_type.or(self.notification_type),
            sticky: other.sticky.or(self.sticky),
            priority: other.priority.or(self.priority),
            app_icon: other.app_icon.or(self.app_icon),
            pane: other.pane.or(self.pane),
            network: Self::merge_network_config(self.network, other.network),
        }
    }

    /// Merge network config sections
    fn merge_network_config(
        base: Option<NetworkConfig>,
        other: Option<NetworkConfig>,
    ) -> Option<NetworkConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(NetworkConfig {
                host: o.host.or(b.host),
                port: o.port.or(b.port),
                password: o.password.or(b.password),
                auth: o.auth.or(b.auth),
            }),
        }
    }

    /// Get the application name, or the default if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get transport as parsed TransportKind, or default if not set/invalid
    pub fn transport_or_default(&self) -> TransportKind {
        self.transport
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the notification type, or the default if not set
    pub fn notification_type_or_default(&self) -> &str {
        self.notification_type
            .as_deref()
            .unwrap_or(DEFAULT_NOTIFICATION_TYPE)
    }

    /// Get sticky setting, or false if not set
    pub fn sticky_or_default(&self) -> bool {
        self.sticky.unwrap_or(false)
    }

    /// Parse the configured priority, if any
    pub fn priority_checked(&self) -> Result<Option<Priority>, PriorityParseError> {
        self.priority.as_deref().map(str::parse).transpose()
    }

    /// Get priority as parsed Priority; None if not set or invalid.
    /// An invalid value is logged and ignored.
    pub fn priority_parsed(&self) -> Option<Priority> {
        match self.priority_checked() {
            Ok(priority) => priority,
            Err(e) => {
                warn!(value = %e.input, "Ignoring invalid priority in config");
                None
            }
        }
    }

    /// Get network host, or "localhost" if not set
    pub fn host_or_default(&self) -> &str {
        self.network
            .as_ref()
            .and_then(|n| n.host.as_deref())
            .unwrap_or("localhost")
    }

    /// Get network port, or 9887 if not set
    pub fn port_or_default(&self) -> u16 {
        self.network
            .as_ref()
            .and_then(|n| n.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Get network password, if any
    pub fn password(&self) -> Option<&str> {
        self.network.as_ref().and_then(|n| n.password.as_deref())
    }

    /// Get auth method as parsed AuthMethod, or md5 if not set/invalid
    pub fn auth_or_default(&self) -> AuthMethod {
        self.network
            .as_ref()
            .and_then(|n| n.auth.as_ref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.app_name, Some("GrowlNotifier".to_string()));
        assert_eq!(config.transport, Some("desktop".to_string()));
        assert_eq!(config.notification_type, Some("Notification".to_string()));
        assert_eq!(config.sticky, Some(false));
        assert!(config.priority.is_none());
        let network = config.network.as_ref().unwrap();
        assert_eq!(network.host, Some("localhost".to_string()));
        assert_eq!(network.port, Some(9887));
        assert_eq!(network.auth, Some("md5".to_string()));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.app_name.is_none());
        assert!(config.transport.is_none());
        assert!(config.sticky.is_none());
        assert!(config.network.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            app_name: Some("Base".to_string()),
            transport: Some("udp".to_string()),
            priority: Some("high".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            app_name: Some("Other".to_string()),
            transport: None, // Should not override
            priority: Some("low".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.app_name, Some("Other".to_string()));
        assert_eq!(merged.transport, Some("udp".to_string())); // Kept from base
        assert_eq!(merged.priority, Some("low".to_string()));
    }

    #[test]
    fn merge_network_config() {
        let base = AppConfig {
            network: Some(NetworkConfig {
                host: Some("growl.local".to_string()),
                port: Some(9887),
                ..Default::default()
            }),
            ..Default::default()
        };
        let other = AppConfig {
            network: Some(NetworkConfig {
                password: Some("secret".to_string()),
                port: Some(10000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.host_or_default(), "growl.local");
        assert_eq!(merged.port_or_default(), 10000);
        assert_eq!(merged.password(), Some("secret"));
    }

    #[test]
    fn transport_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            transport: Some("carrier-pigeon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.transport_or_default(), TransportKind::Desktop);
    }

    #[test]
    fn transport_parses() {
        assert_eq!("UDP".parse::<TransportKind>().unwrap(), TransportKind::Udp);
        assert_eq!("network".parse::<TransportKind>().unwrap(), TransportKind::Udp);
        assert_eq!(
            "notify-send".parse::<TransportKind>().unwrap(),
            TransportKind::NotifySend
        );
        assert_eq!("widget".parse::<TransportKind>().unwrap(), TransportKind::Widget);
        assert!("smoke".parse::<TransportKind>().is_err());
    }

    #[test]
    fn auth_parses() {
        assert_eq!("md5".parse::<AuthMethod>().unwrap(), AuthMethod::Md5);
        assert_eq!("SHA-256".parse::<AuthMethod>().unwrap(), AuthMethod::Sha256);
        assert_eq!("noauth".parse::<AuthMethod>().unwrap(), AuthMethod::None);
        assert!("crc32".parse::<AuthMethod>().is_err());
    }

    #[test]
    fn priority_parsed_ignores_invalid() {
        let config = AppConfig {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(config.priority_parsed().is_none());

        let config = AppConfig {
            priority: Some("high".to_string()),
            ..Default::default()
        };
        assert_eq!(config.priority_parsed(), Some(Priority::High));
    }

    #[test]
    fn priority_checked_names_invalid_value() {
        let config = AppConfig {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        let err = config.priority_checked().unwrap_err();
        assert_eq!(err.input, "urgent");
        assert_eq!(AppConfig::empty().priority_checked().unwrap(), None);
    }

    #[test]
    fn priority_parsed_logs_invalid_value() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = AppConfig {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        tracing::subscriber::with_default(subscriber, || {
            assert!(config.priority_parsed().is_none());
        });

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "got: {}", logged);
        assert!(logged.contains("urgent"), "got: {}", logged);
    }

    #[test]
    fn accessor_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.app_name_or_default(), "GrowlNotifier");
        assert_eq!(config.notification_type_or_default(), "Notification");
        assert!(!config.sticky_or_default());
        assert_eq!(config.host_or_default(), "localhost");
        assert_eq!(config.port_or_default(), 9887);
        assert_eq!(config.auth_or_default(), AuthMethod::Md5);
        assert!(config.password().is_none());
    }
}
