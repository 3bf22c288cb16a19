//! Config file reading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::NodehookConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the nodehook config directory.
/// Priority: `NODEHOOK_CONFIG_DIR` env > `~/.nodehook/` > `./.nodehook`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NODEHOOK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".nodehook"),
        None => PathBuf::from(".nodehook"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Parse config YAML from a string.
pub fn parse_config(raw: &str) -> Result<NodehookConfig> {
    serde_yaml::from_str(raw).context("Failed to parse config YAML")
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist, which leaves
/// every event without subscribers.
pub async fn load_config(path: &Path) -> Result<NodehookConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(NodehookConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&raw)
        .with_context(|| format!("Invalid config at: {}", path.display()))?;

    info!(path = %path.display(), events = config.endpoints.len(), "Loaded config");
    Ok(config)
}
