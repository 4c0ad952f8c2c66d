//! Static configuration loaded once at startup
//!
//! This configuration is read-only after the daemon starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{RelaySwitchError, Result};
use crate::types::RelayId;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub hostname: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Relay board wiring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayBoardConfig {
    /// BCM pin numbers, one per relay. Relay `n` is `pins[n - 1]`.
    pub pins: Vec<u8>,

    /// Polarity of the board inputs.
    ///
    /// Most relay modules are active low: the relay closes when the pin is
    /// driven low.
    #[serde(default)]
    pub active_high: bool,

    /// 0-based index of the relay driven by the myStrom-compatible endpoints
    pub default_relay: usize,
}

impl Default for RelayBoardConfig {
    fn default() -> Self {
        Self {
            pins: vec![6, 13, 19, 26],
            active_high: false,
            default_relay: 2,
        }
    }
}

impl RelayBoardConfig {
    /// Check the startup preconditions of the relay registry.
    pub fn validate(&self) -> Result<()> {
        if self.pins.is_empty() {
            return Err(RelaySwitchError::Config(
                "at least one relay pin must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.pins.len());
        for pin in &self.pins {
            if !seen.insert(pin) {
                return Err(RelaySwitchError::Config(format!(
                    "GPIO pin {} is assigned to more than one relay",
                    pin
                )));
            }
        }

        if self.default_relay >= self.pins.len() {
            return Err(RelaySwitchError::Config(format!(
                "default_relay {} is out of range (must be 0-{})",
                self.default_relay,
                self.pins.len() - 1
            )));
        }

        Ok(())
    }

    /// External id of the default relay
    pub fn default_relay_id(&self) -> RelayId {
        RelayId::from_index(self.default_relay)
    }
}

/// Log level of the daemon
///
/// Parsing is case-insensitive and also takes `warning` and `critical`, the
/// names used by older myStrom relay setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing` filters
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = RelaySwitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "critical" => Ok(LogLevel::Error),
            _ => Err(RelaySwitchError::Config(format!(
                "unknown log level '{}' (expected trace, debug, info, warn or error)",
                s
            ))),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = RelaySwitchError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: LogLevel,

    /// Optional log file, rotated daily
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
        }
    }
}

/// Static configuration for the relay daemon.
///
/// This is loaded once at startup and remains immutable during runtime.
/// Located at `~/.config/relayswitch/config.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Server configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Relay board wiring (pins, polarity, default relay)
    #[serde(default)]
    pub relays: RelayBoardConfig,

    /// Logging configuration (level, file)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// Parse StaticConfig from TOML string.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize StaticConfig to TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.relays.validate()
    }
}
