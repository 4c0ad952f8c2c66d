//! Configuration loading for the daemon
//!
//! Reads the static TOML configuration, creating it with defaults on first
//! start, and validates the relay board preconditions.

use relayswitch_core::{RelaySwitchError, Result, StaticConfig};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Load static config from TOML file, creating with defaults if missing.
///
/// The returned configuration has passed [`StaticConfig::validate`].
pub(crate) async fn load(path: &Path) -> Result<StaticConfig> {
    let config = if path.exists() {
        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path).await.map_err(|e| {
            RelaySwitchError::Config(format!("Failed to read config file: {}", e))
        })?;

        StaticConfig::from_toml(&content).map_err(|e| {
            RelaySwitchError::Config(format!("Failed to parse config file: {}", e))
        })?
    } else {
        info!(
            "Configuration not found at {}. Creating with defaults.",
            path.display()
        );
        let config = StaticConfig::default();
        write_default(path, &config).await?;
        config
    };

    config.validate()?;
    Ok(config)
}

async fn write_default(path: &Path, config: &StaticConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            RelaySwitchError::Config(format!(
                "Failed to create config directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let toml_str = config
        .to_toml()
        .map_err(|e| RelaySwitchError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, toml_str)
        .await
        .map_err(|e| RelaySwitchError::Config(format!("Failed to write config file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_config_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = load(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.relays.pins, vec![6, 13, 19, 26]);

        // Written file loads back to the same values
        let reloaded = load(&path).await.unwrap();
        assert_eq!(reloaded.server.port, config.server.port);
        assert_eq!(reloaded.relays.default_relay, config.relays.default_relay);
    }

    #[tokio::test]
    async fn test_existing_config_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[relays]\npins = [5, 6]\nactive_high = true\ndefault_relay = 0\n",
        )
        .await
        .unwrap();

        let config = load(&path).await.unwrap();
        assert_eq!(config.relays.pins, vec![5, 6]);
        assert!(config.relays.active_high);
    }

    #[tokio::test]
    async fn test_invalid_default_relay_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[relays]\npins = [5, 6]\ndefault_relay = 2\n")
            .await
            .unwrap();

        let result = load(&path).await;
        assert!(matches!(result, Err(RelaySwitchError::Config(_))));
    }

    #[tokio::test]
    async fn test_malformed_toml_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[relays\npins = ").await.unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn test_log_level_validated_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "[logging]\nlevel = \"WARNING\"\n").await.unwrap();
        let config = load(&path).await.unwrap();
        assert_eq!(config.logging.level, relayswitch_core::LogLevel::Warn);

        fs::write(&path, "[logging]\nlevel = \"loud\"\n").await.unwrap();
        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, RelaySwitchError::Config(_)));
        assert!(err.to_string().contains("unknown log level 'loud'"));
    }
}
