//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, AuthMethod, NetworkConfig, TransportKind, DEFAULT_APP_NAME,
    DEFAULT_NOTIFICATION_TYPE, DEFAULT_PORT,
};
