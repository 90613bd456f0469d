//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::config::{AuthMethod, TransportKind};
use crate::domain::notification::Priority;

/// growlnotify - post Growl registrations and notifications
#[derive(Parser, Debug)]
#[command(name = "growlnotify")]
#[command(version)]
#[command(about = "Post Growl registrations and notifications")]
#[command(long_about = None)]
pub struct Cli {
    /// Application name announced to the daemon
    #[arg(long, global = true, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Delivery transport (udp, desktop, notify-send, widget)
    #[arg(long, global = true, value_name = "TRANSPORT")]
    pub transport: Option<TransportKind>,

    /// Growl daemon host for the udp transport
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<String>,

    /// Growl daemon port for the udp transport
    #[arg(long, global = true, value_name = "PORT")]
    pub port: Option<u16>,

    /// Network password for packet digests
    #[arg(long, global = true, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Packet authentication (md5, sha256, none)
    #[arg(long, global = true, value_name = "METHOD")]
    pub auth: Option<AuthMethod>,

    /// Print the records as JSON instead of delivering them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register (unless --no-register) and post one notification
    Notify(NotifyArgs),
    /// Announce the application and its notification types
    Register(RegisterArgs),
    /// Edit the HTML message pane
    Widget {
        #[command(subcommand)]
        action: WidgetAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options of `notify`
#[derive(Args, Debug, Clone)]
pub struct NotifyArgs {
    /// Notification title
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Notification description
    #[arg(short = 'm', long = "message", value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Notification description (positional form)
    #[arg(value_name = "MESSAGE", conflicts_with = "message")]
    pub text: Option<String>,

    /// Notification type
    #[arg(short = 'N', long = "name", value_name = "TYPE")]
    pub note_type: Option<String>,

    /// Keep the notification on screen until dismissed
    #[arg(short = 's', long, overrides_with = "no_sticky")]
    pub sticky: bool,

    /// Let the notification expire even if the config says sticky
    #[arg(long, overrides_with = "sticky")]
    pub no_sticky: bool,

    /// Priority: -2..2 or very-low, moderate, normal, high, emergency
    #[arg(short = 'p', long, value_name = "PRIORITY", allow_hyphen_values = true)]
    pub priority: Option<Priority>,

    /// Image file for this notification
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Image file for the application
    #[arg(long, value_name = "PATH")]
    pub app_icon: Option<PathBuf>,

    /// Skip the registration posted before the notification
    #[arg(long)]
    pub no_register: bool,
}

impl NotifyArgs {
    /// Description from either the flag or the positional argument
    pub fn description(&self) -> &str {
        self.message
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or("")
    }

    /// Sticky setting given on the command line, if any
    pub fn sticky_flag(&self) -> Option<bool> {
        if self.sticky {
            Some(true)
        } else if self.no_sticky {
            Some(false)
        } else {
            None
        }
    }
}

/// Options of `register`
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Notification type to announce (repeatable)
    #[arg(short = 'N', long = "name", value_name = "TYPE")]
    pub notifications: Vec<String>,

    /// Notification type enabled by default (repeatable)
    #[arg(long = "default", value_name = "TYPE")]
    pub defaults: Vec<String>,

    /// Image file for the application
    #[arg(long, value_name = "PATH")]
    pub app_icon: Option<PathBuf>,
}

/// Message pane actions
#[derive(Subcommand, Debug, Clone)]
pub enum WidgetAction {
    /// Replace the first message with HTML
    Set {
        /// HTML fragment
        html: String,
        /// Pane file
        #[arg(long, value_name = "PATH")]
        pane: Option<PathBuf>,
    },
    /// Add HTML after the existing messages
    Append {
        /// HTML fragment
        html: String,
        /// Pane file
        #[arg(long, value_name = "PATH")]
        pane: Option<PathBuf>,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_name",
    "transport",
    "notification_type",
    "sticky",
    "priority",
    "app_icon",
    "pane",
    "network.host",
    "network.port",
    "network.password",
    "network.auth",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn notify_defaults() {
        let cli = Cli::parse_from(["growlnotify", "notify"]);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
        assert!(cli.transport.is_none());
        match cli.command {
            Commands::Notify(args) => {
                assert!(args.title.is_none());
                assert_eq!(args.description(), "");
                assert!(!args.sticky);
                assert!(args.priority.is_none());
                assert!(!args.no_register);
            }
            other => panic!("Expected notify, got {:?}", other),
        }
    }

    #[test]
    fn notify_with_everything() {
        let cli = Cli::parse_from([
            "growlnotify",
            "--transport",
            "udp",
            "--auth",
            "sha256",
            "notify",
            "-t",
            "Build",
            "-m",
            "Finished",
            "-N",
            "Done",
            "-s",
            "-p",
            "-2",
            "--no-register",
        ]);
        assert_eq!(cli.transport, Some(TransportKind::Udp));
        assert_eq!(cli.auth, Some(AuthMethod::Sha256));
        let Commands::Notify(args) = cli.command else {
            panic!("Expected notify");
        };
        assert_eq!(args.title.as_deref(), Some("Build"));
        assert_eq!(args.description(), "Finished");
        assert_eq!(args.note_type.as_deref(), Some("Done"));
        assert!(args.sticky);
        assert_eq!(args.priority, Some(Priority::VeryLow));
        assert!(args.no_register);
    }

    #[test]
    fn positional_message() {
        let cli = Cli::parse_from(["growlnotify", "notify", "hello there"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected notify");
        };
        assert_eq!(args.description(), "hello there");
    }

    #[test]
    fn message_flag_conflicts_with_positional() {
        let result = Cli::try_parse_from(["growlnotify", "notify", "-m", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn priority_labels_and_rejects() {
        let cli = Cli::parse_from(["growlnotify", "notify", "-p", "emergency"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected notify");
        };
        assert_eq!(args.priority, Some(Priority::Emergency));

        assert!(Cli::try_parse_from(["growlnotify", "notify", "-p", "7"]).is_err());
    }

    #[test]
    fn last_sticky_flag_wins() {
        let cli = Cli::parse_from(["growlnotify", "notify", "-s", "--no-sticky"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected notify");
        };
        assert_eq!(args.sticky_flag(), Some(false));

        let cli = Cli::parse_from(["growlnotify", "notify", "--no-sticky", "-s"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected notify");
        };
        assert_eq!(args.sticky_flag(), Some(true));

        let cli = Cli::parse_from(["growlnotify", "notify"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected notify");
        };
        assert_eq!(args.sticky_flag(), None);
    }

    #[test]
    fn unknown_transport_is_rejected() {
        assert!(Cli::try_parse_from(["growlnotify", "--transport", "pigeon", "notify"]).is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from(["growlnotify", "notify", "--dry-run", "-v"]);
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn register_repeats() {
        let cli = Cli::parse_from([
            "growlnotify",
            "register",
            "-N",
            "A",
            "-N",
            "B",
            "--default",
            "B",
        ]);
        let Commands::Register(args) = cli.command else {
            panic!("Expected register");
        };
        assert_eq!(args.notifications, vec!["A", "B"]);
        assert_eq!(args.defaults, vec!["B"]);
    }

    #[test]
    fn widget_append() {
        let cli = Cli::parse_from([
            "growlnotify",
            "widget",
            "append",
            "<p>hi</p>",
            "--pane",
            "/tmp/p.html",
        ]);
        match cli.command {
            Commands::Widget {
                action: WidgetAction::Append { html, pane },
            } => {
                assert_eq!(html, "<p>hi</p>");
                assert_eq!(pane, Some(PathBuf::from("/tmp/p.html")));
            }
            other => panic!("Expected widget append, got {:?}", other),
        }
    }

    #[test]
    fn config_set() {
        let cli = Cli::parse_from(["growlnotify", "config", "set", "network.host", "box"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "network.host");
            assert_eq!(value, "box");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("app_name"));
        assert!(is_valid_config_key("network.password"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
