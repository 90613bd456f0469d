//! growlnotify CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use growl_notifier::cli::{
    app::{cli_config, load_merged_config, run_notify, run_register, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    widget_cmd::handle_widget_command,
};
use growl_notifier::infrastructure::XdgConfigStore;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "growl_notifier=debug"
    } else {
        "growl_notifier=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    let config = load_merged_config(&store, cli_config(&cli)).await;
    let dry_run = cli.dry_run;

    match cli.command {
        Commands::Notify(args) => run_notify(&config, args, dry_run).await,
        Commands::Register(args) => run_register(&config, args, dry_run).await,
        Commands::Widget { action } => {
            match handle_widget_command(action, &config, dry_run, &presenter).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        Commands::Config { action } => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
