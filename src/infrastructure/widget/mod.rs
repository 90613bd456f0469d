//! Widget display module
//!
//! Shows notifications in an HTML message pane stored on disk.

mod pane_file;

pub use pane_file::{render_notification, PaneFile, PaneMode, WidgetNotificationCenter};
