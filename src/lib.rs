//! growl-notifier - post notifications to a Growl-style notification daemon
//!
//! A client registers itself once with a registration record (application
//! name, every notification type it may post, the subset enabled by default,
//! and an icon) and then fires notification records. Records are handed to a
//! notification center which delivers them fire-and-forget.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Records, priorities, icons, the HTML message pane, config and errors
//! - **Application**: The notifier use case and port interfaces (traits)
//! - **Infrastructure**: Notification center adapters (Growl UDP, desktop, widget pane, memory)
//! - **CLI**: The `growlnotify` command-line interface

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
