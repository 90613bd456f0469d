//! Application layer - Use cases and port interfaces
//!
//! Contains the register/notify use case and trait definitions
//! for external system interactions.

pub mod notifier;
pub mod ports;

// Re-export use cases
pub use notifier::{GrowlNotifier, NotifierError, NotifyRequest};
