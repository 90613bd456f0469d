//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting and the subcommand runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod widget_cmd;

// Re-export commonly used types
pub use app::{run_notify, run_register, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, NotifyArgs, RegisterArgs, WidgetAction};
pub use presenter::Presenter;
