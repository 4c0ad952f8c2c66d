//! Error types for the relayswitch system

use thiserror::Error;

/// Core error type for relayswitch operations
///
/// Only [`RelaySwitchError::NotFound`] can be produced while serving a
/// request. The remaining variants are raised during startup (configuration
/// loading, GPIO acquisition) and end the process.
#[derive(Error, Debug)]
pub enum RelaySwitchError {
    /// Unknown relay id or unrecognized legacy state value
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// GPIO access errors
    #[error("GPIO error: {0}")]
    Gpio(String),
}

/// Result type alias for relayswitch operations
pub type Result<T> = std::result::Result<T, RelaySwitchError>;

impl RelaySwitchError {
    /// Whether this error maps to the canonical 404 response
    pub fn is_not_found(&self) -> bool {
        matches!(self, RelaySwitchError::NotFound(_))
    }
}
