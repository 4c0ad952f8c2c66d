//! relayswitch Core Library
//!
//! Shared types, models, and configuration for the relay board daemon.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    default_config_path, LogLevel, LoggingConfig, RelayBoardConfig, ServerConfig, StaticConfig,
};
pub use error::*;
pub use types::*;
