//! Webhook endpoint configuration for nodehook.
//!
//! Provides:
//! - Typed config schema (endpoints, delivery, logging)
//! - YAML loading
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation and redaction for safe display

pub mod defaults;
pub mod endpoints;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use endpoints::EndpointConfig;
pub use env::{collect_referenced_vars, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use redact::{collect_redacted_paths, redact};
pub use schema::{DeliveryConfig, LoggingConfig, NodehookConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load, apply env substitution and defaults, then validate a config file.
///
/// This is the main entry point for loading a config at runtime. Validation
/// findings are logged, not returned as errors.
pub async fn load_and_prepare(path: &Path) -> Result<NodehookConfig> {
    let raw_config = load_config(path).await?;
    let env: HashMap<String, String> = std::env::vars().collect();
    prepare(raw_config, &env)
}

/// The processing half of [`load_and_prepare`], with an explicit environment.
pub fn prepare(config: NodehookConfig, env: &HashMap<String, String>) -> Result<NodehookConfig> {
    let value: Value =
        serde_json::to_value(&config).context("Failed to serialize config for processing")?;

    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: NodehookConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok(config)
}
