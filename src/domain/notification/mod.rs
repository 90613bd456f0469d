//! Notification domain module

mod icon;
mod priority;
mod record;

pub use icon::{Icon, ImageFormat};
pub use priority::{Priority, ALL_PRIORITIES};
pub use record::*;
