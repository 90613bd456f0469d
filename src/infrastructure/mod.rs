//! Infrastructure layer - Adapter implementations
//!
//! Concrete notification centers (Growl UDP, desktop, notify-send,
//! HTML pane, in-memory), config storage and icon loading.

pub mod config;
pub mod factory;
pub mod icon_file;
pub mod memory;
pub mod network;
pub mod notification;
pub mod widget;

// Re-export adapters
pub use config::XdgConfigStore;
pub use factory::{create_center, pane_path};
pub use icon_file::load_icon;
pub use memory::{MemoryNotificationCenter, Posting};
pub use network::UdpNotificationCenter;
pub use notification::{NotifyRustCenter, NotifySendCenter};
pub use widget::{PaneFile, PaneMode, WidgetNotificationCenter};
