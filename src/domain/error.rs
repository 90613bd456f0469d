//! Domain error types

use thiserror::Error;

/// Error when parsing a priority string
#[derive(Debug, Clone, Error)]
#[error("Invalid priority: \"{input}\". Valid priorities are: very-low, moderate, normal, high, emergency (or -2..2)")]
pub struct PriorityParseError {
    pub input: String,
}

/// Error when loading an icon
#[derive(Debug, Clone, Error)]
pub enum IconError {
    #[error("Failed to read icon file '{path}': {message}")]
    ReadError { path: String, message: String },

    #[error("Icon file is empty: {0}")]
    Empty(String),
}

/// Error when manipulating the HTML message pane
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaneError {
    #[error("No element with id \"{0}\" in document")]
    MissingContainer(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
