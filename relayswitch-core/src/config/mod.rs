//! Configuration types for relayswitch
//!
//! [`StaticConfig`] holds the server address, the relay board wiring and the
//! logging settings. It is read once at startup from a TOML file and never
//! written back while the daemon runs.

mod paths;
mod static_config;

pub use paths::default_config_path;
pub use static_config::{LogLevel, LoggingConfig, RelayBoardConfig, ServerConfig, StaticConfig};
