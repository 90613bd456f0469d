//! Runners for the notify and register subcommands

use std::env;
use std::path::Path;
use std::process::ExitCode;

use thiserror::Error;
use tracing::debug;

use crate::application::ports::{ConfigStore, NotificationCenter};
use crate::application::{GrowlNotifier, NotifierError, NotifyRequest};
use crate::domain::config::{AppConfig, NetworkConfig};
use crate::domain::error::IconError;
use crate::domain::notification::Icon;
use crate::infrastructure::{create_center, load_icon, MemoryNotificationCenter};

use super::args::{Cli, Commands, NotifyArgs, RegisterArgs};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the network password
pub const ENV_PASSWORD: &str = "GROWL_PASSWORD";
/// Environment variable overriding the network host
pub const ENV_HOST: &str = "GROWL_HOST";

/// Errors surfaced by the runners
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Icon(#[from] IconError),

    #[error(transparent)]
    Notifier(#[from] NotifierError),

    #[error("Failed to format records: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code; an unreadable icon path is a usage error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Icon(_) => EXIT_USAGE_ERROR,
            Self::Notifier(_) | Self::Json(_) => EXIT_ERROR,
        }
    }
}

/// Config layer from the global command-line options
pub fn cli_config(cli: &Cli) -> AppConfig {
    let network = if cli.host.is_some()
        || cli.port.is_some()
        || cli.password.is_some()
        || cli.auth.is_some()
    {
        Some(NetworkConfig {
            host: cli.host.clone(),
            port: cli.port,
            password: cli.password.clone(),
            auth: cli.auth.map(|a| a.to_string()),
        })
    } else {
        None
    };

    let sticky = match &cli.command {
        Commands::Notify(args) => args.sticky_flag(),
        _ => None,
    };

    AppConfig {
        app_name: cli.app_name.clone(),
        transport: cli.transport.map(|t| t.to_string()),
        sticky,
        network,
        ..Default::default()
    }
}

/// Config layer from the environment
pub fn env_config() -> AppConfig {
    let password = env::var(ENV_PASSWORD).ok().filter(|s| !s.is_empty());
    let host = env::var(ENV_HOST).ok().filter(|s| !s.is_empty());
    if password.is_none() && host.is_none() {
        return AppConfig::empty();
    }
    AppConfig {
        network: Some(NetworkConfig {
            host,
            password,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

async fn load_optional_icon(path: Option<&Path>) -> Result<Option<Icon>, IconError> {
    match path {
        Some(path) => Ok(Some(load_icon(path).await?)),
        None => Ok(None),
    }
}

/// Application icon from the flag, falling back to the configured path
async fn app_icon(flag: Option<&Path>, config: &AppConfig) -> Result<Option<Icon>, IconError> {
    let path = flag.or_else(|| config.app_icon.as_deref().map(Path::new));
    load_optional_icon(path).await
}

/// Run `notify`
pub async fn run_notify(config: &AppConfig, args: NotifyArgs, dry_run: bool) -> ExitCode {
    let presenter = Presenter::new();
    let result = if dry_run {
        notify_dry_run(config, &args, &presenter).await
    } else {
        let center = create_center(config);
        let transport = center.name();
        notify_with(config, &args, center).await.map(|()| {
            presenter.success(&presenter.format_delivery(
                "Notification",
                config.app_name_or_default(),
                transport,
            ))
        })
    };
    finish(result, &presenter)
}

/// Run `register`
pub async fn run_register(config: &AppConfig, args: RegisterArgs, dry_run: bool) -> ExitCode {
    let presenter = Presenter::new();
    let result = if dry_run {
        let center = MemoryNotificationCenter::new();
        match register_with(config, &args, center.clone()).await {
            Ok(()) => print_postings(&center, &presenter),
            Err(e) => Err(e),
        }
    } else {
        let center = create_center(config);
        let transport = center.name();
        register_with(config, &args, center).await.map(|()| {
            presenter.success(&presenter.format_delivery(
                "Registration",
                config.app_name_or_default(),
                transport,
            ))
        })
    };
    finish(result, &presenter)
}

fn finish(result: Result<(), AppError>, presenter: &Presenter) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn notify_dry_run(
    config: &AppConfig,
    args: &NotifyArgs,
    presenter: &Presenter,
) -> Result<(), AppError> {
    let center = MemoryNotificationCenter::new();
    notify_with(config, args, center.clone()).await?;
    print_postings(&center, presenter)
}

fn print_postings(center: &MemoryNotificationCenter, presenter: &Presenter) -> Result<(), AppError> {
    for posting in center.postings() {
        presenter.output(&serde_json::to_string_pretty(&posting.to_json())?);
    }
    Ok(())
}

/// Register (unless disabled) and post one notification through `center`
pub async fn notify_with<C: NotificationCenter>(
    config: &AppConfig,
    args: &NotifyArgs,
    center: C,
) -> Result<(), AppError> {
    let note_type = args
        .note_type
        .clone()
        .unwrap_or_else(|| config.notification_type_or_default().to_string());
    let app_icon = app_icon(args.app_icon.as_deref(), config).await?;
    let icon = load_optional_icon(args.icon.as_deref()).await?;

    let mut request = NotifyRequest::new(
        note_type.clone(),
        args.title.clone().unwrap_or_default(),
        args.description(),
    );
    if let Some(icon) = icon {
        request = request.with_icon(icon);
    }
    if let Some(icon) = app_icon.clone() {
        request = request.with_app_icon(icon);
    }
    if args
        .sticky_flag()
        .unwrap_or_else(|| config.sticky_or_default())
    {
        request = request.with_sticky(true);
    }
    if let Some(priority) = args.priority.or_else(|| config.priority_parsed()) {
        request = request.with_priority(priority);
    }

    let mut notifier = GrowlNotifier::new(
        config.app_name_or_default(),
        vec![note_type],
        None,
        app_icon,
        center,
    );

    if args.no_register {
        debug!("Skipping registration");
    } else {
        notifier.register().await?;
    }
    notifier.notify(request).await?;
    Ok(())
}

/// Post a registration through `center`
pub async fn register_with<C: NotificationCenter>(
    config: &AppConfig,
    args: &RegisterArgs,
    center: C,
) -> Result<(), AppError> {
    let notifications = if args.notifications.is_empty() {
        vec![config.notification_type_or_default().to_string()]
    } else {
        args.notifications.clone()
    };
    let defaults = if args.defaults.is_empty() {
        None
    } else {
        Some(args.defaults.clone())
    };
    let app_icon = app_icon(args.app_icon.as_deref(), config).await?;

    let mut notifier = GrowlNotifier::new(
        config.app_name_or_default(),
        notifications,
        defaults,
        app_icon,
        center,
    );
    notifier.register().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TransportError;
    use crate::domain::notification::{
        GrowlMessage, NotificationName, Priority, KEY_APP_ICON, KEY_NOTIFICATIONS_DEFAULT,
        KEY_NOTIFICATION_PRIORITY, KEY_NOTIFICATION_STICKY,
    };
    use crate::infrastructure::XdgConfigStore;
    use clap::Parser;
    use tempfile::tempdir;

    fn notify_args(extra: &[&str]) -> NotifyArgs {
        let mut argv = vec!["growlnotify", "notify"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Notify(args) => args,
            other => panic!("Expected notify, got {:?}", other),
        }
    }

    #[test]
    fn cli_layer_only_sets_given_options() {
        let cli = Cli::parse_from(["growlnotify", "--app-name", "Beep", "notify"]);
        let config = cli_config(&cli);
        assert_eq!(config.app_name.as_deref(), Some("Beep"));
        assert!(config.transport.is_none());
        assert!(config.network.is_none());

        let cli = Cli::parse_from(["growlnotify", "--port", "1234", "notify"]);
        let config = cli_config(&cli);
        assert_eq!(config.port_or_default(), 1234);
        assert_eq!(config.host_or_default(), "localhost");
    }

    #[tokio::test]
    async fn file_overrides_defaults_and_cli_overrides_file() {
        let dir = tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        store
            .save(&AppConfig {
                app_name: Some("FromFile".to_string()),
                notification_type: Some("FileType".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let merged = load_merged_config(
            &store,
            AppConfig {
                app_name: Some("FromCli".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(merged.app_name_or_default(), "FromCli");
        assert_eq!(merged.notification_type_or_default(), "FileType");
        assert_eq!(merged.port_or_default(), 9887);
    }

    #[tokio::test]
    async fn notify_registers_first() {
        let center = MemoryNotificationCenter::new();
        notify_with(
            &AppConfig::defaults(),
            &notify_args(&["-t", "Hi", "-m", "there"]),
            center.clone(),
        )
        .await
        .unwrap();

        let postings = center.postings();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].name(), NotificationName::ApplicationRegistration);
        assert_eq!(postings[1].name(), NotificationName::Notification);
        assert!(postings.iter().all(|p| p.deliver_immediately));

        let info = postings[1].user_info();
        assert!(!info.contains_key(KEY_NOTIFICATION_STICKY));
        assert!(!info.contains_key(KEY_NOTIFICATION_PRIORITY));
    }

    #[tokio::test]
    async fn notify_without_registration() {
        let center = MemoryNotificationCenter::new();
        notify_with(
            &AppConfig::defaults(),
            &notify_args(&["--no-register", "-s", "-p", "high"]),
            center.clone(),
        )
        .await
        .unwrap();

        let postings = center.postings();
        assert_eq!(postings.len(), 1);
        let GrowlMessage::Notification(record) = &postings[0].message else {
            panic!("Expected notification");
        };
        assert_eq!(record.sticky, Some(true));
        assert_eq!(record.priority, Some(Priority::High));
        assert_eq!(record.name, "Notification");
    }

    #[test]
    fn cli_layer_carries_sticky_flags() {
        let cli = Cli::parse_from(["growlnotify", "notify", "--no-sticky"]);
        assert_eq!(cli_config(&cli).sticky, Some(false));

        let cli = Cli::parse_from(["growlnotify", "notify", "-s"]);
        assert_eq!(cli_config(&cli).sticky, Some(true));

        let cli = Cli::parse_from(["growlnotify", "notify"]);
        assert!(cli_config(&cli).sticky.is_none());
    }

    #[tokio::test]
    async fn no_sticky_overrides_sticky_config() {
        let config = AppConfig {
            sticky: Some(true),
            ..AppConfig::defaults()
        };

        let center = MemoryNotificationCenter::new();
        notify_with(&config, &notify_args(&["--no-register"]), center.clone())
            .await
            .unwrap();
        notify_with(
            &config,
            &notify_args(&["--no-register", "--no-sticky"]),
            center.clone(),
        )
        .await
        .unwrap();

        let postings = center.postings();
        assert_eq!(
            postings[0]
                .user_info()
                .get(KEY_NOTIFICATION_STICKY)
                .and_then(|v| v.as_bool()),
            Some(true)
        );
        assert!(!postings[1].user_info().contains_key(KEY_NOTIFICATION_STICKY));
    }

    #[tokio::test]
    async fn missing_icon_file_fails_before_posting() {
        let center = MemoryNotificationCenter::new();
        let result = notify_with(
            &AppConfig::defaults(),
            &notify_args(&["--icon", "/nonexistent/icon.png"]),
            center.clone(),
        )
        .await;
        assert!(matches!(result, Err(AppError::Icon(_))));
        assert_eq!(result.unwrap_err().exit_code(), EXIT_USAGE_ERROR);
        assert!(center.is_empty());
    }

    #[test]
    fn runtime_failures_exit_with_error() {
        let err = AppError::Notifier(NotifierError::Transport(TransportError::SendFailed(
            "down".to_string(),
        )));
        assert_eq!(err.exit_code(), EXIT_ERROR);
    }

    #[tokio::test]
    async fn register_copies_defaults_and_uses_generic_icon() {
        let center = MemoryNotificationCenter::new();
        let args = RegisterArgs {
            notifications: vec!["A".to_string(), "B".to_string()],
            defaults: vec![],
            app_icon: None,
        };
        register_with(&AppConfig::defaults(), &args, center.clone())
            .await
            .unwrap();

        let info = center.postings()[0].user_info();
        assert_eq!(
            info.get(KEY_NOTIFICATIONS_DEFAULT)
                .and_then(|v| v.as_list())
                .map(|l| l.to_vec()),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(
            info.get(KEY_APP_ICON).and_then(|v| v.as_data()),
            Some(Icon::generic().data())
        );
    }
}
