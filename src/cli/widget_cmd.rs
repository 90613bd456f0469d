//! Widget command handler

use crate::application::ports::TransportError;
use crate::domain::config::AppConfig;
use crate::infrastructure::{pane_path, PaneFile, PaneMode};

use super::args::WidgetAction;
use super::presenter::Presenter;

/// Handle widget subcommand.
/// A dry run prints the updated document instead of writing it.
pub async fn handle_widget_command(
    action: WidgetAction,
    config: &AppConfig,
    dry_run: bool,
    presenter: &Presenter,
) -> Result<(), TransportError> {
    let (html, pane, mode) = match action {
        WidgetAction::Set { html, pane } => (html, pane, PaneMode::Replace),
        WidgetAction::Append { html, pane } => (html, pane, PaneMode::Append),
    };
    let file = PaneFile::new(pane.unwrap_or_else(|| pane_path(config)));

    if dry_run {
        let mut document = file.load().await?;
        let result = match mode {
            PaneMode::Append => document.append_message(&html),
            PaneMode::Replace => document.set_message(&html),
        };
        result.map_err(|e| TransportError::SendFailed(e.to_string()))?;
        presenter.output(&document.render());
        return Ok(());
    }

    file.insert(&html, mode).await?;
    presenter.success(&format!("Updated {}", file.path().display()));
    Ok(())
}
