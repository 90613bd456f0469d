//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, AuthMethod, NetworkConfig, TransportKind};
use crate::domain::error::ConfigError;
use crate::domain::notification::Priority;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;

    let shown = if key == "network.password" {
        mask_secret(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "app_name" => config.app_name = Some(value.to_string()),
        "transport" => {
            let transport: TransportKind = value.parse().map_err(|e: String| invalid(key, e))?;
            config.transport = Some(transport.to_string());
        }
        "notification_type" => config.notification_type = Some(value.to_string()),
        "sticky" => {
            config.sticky = Some(
                parse_bool(value)
                    .map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?,
            )
        }
        "priority" => {
            let priority: Priority = value.parse().map_err(|e| invalid(key, format!("{}", e)))?;
            config.priority = Some(priority.value().to_string());
        }
        "app_icon" => config.app_icon = Some(value.to_string()),
        "pane" => config.pane = Some(value.to_string()),
        "network.host" => network_mut(config).host = Some(value.to_string()),
        "network.port" => {
            let port: u16 = value
                .parse()
                .map_err(|_| invalid(key, "Value must be a port number (0-65535)"))?;
            network_mut(config).port = Some(port);
        }
        "network.password" => network_mut(config).password = Some(value.to_string()),
        "network.auth" => {
            let auth: AuthMethod = value.parse().map_err(|e: String| invalid(key, e))?;
            network_mut(config).auth = Some(auth.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn network_mut(config: &mut AppConfig) -> &mut NetworkConfig {
    config.network.get_or_insert_with(NetworkConfig::default)
}

/// Display value for `key`; the password is masked
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let network = config.network.as_ref();
    match key {
        "app_name" => config.app_name.clone(),
        "transport" => config.transport.clone(),
        "notification_type" => config.notification_type.clone(),
        "sticky" => config.sticky.map(|b| b.to_string()),
        "priority" => config.priority.clone(),
        "app_icon" => config.app_icon.clone(),
        "pane" => config.pane.clone(),
        "network.host" => network.and_then(|n| n.host.clone()),
        "network.port" => network.and_then(|n| n.port).map(|p| p.to_string()),
        "network.password" => network
            .and_then(|n| n.password.as_deref())
            .map(mask_secret),
        "network.auth" => network.and_then(|n| n.auth.clone()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask a secret for display (show first 2 and last 2 chars)
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
