//! `nodehook check-config`

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use nodehook_config::{load_config, prepare, redact, validate, ValidationReport};

/// Prints the redacted config and its findings. Returns false when the config has errors.
pub async fn run(config_path: &Path) -> Result<bool> {
    let raw = load_config(config_path).await?;
    let env: HashMap<String, String> = std::env::vars().collect();
    let config = prepare(raw, &env)?;

    let value = serde_json::to_value(&config).context("Failed to serialize config")?;
    println!("Config: {}", config_path.display());
    println!("{}", serde_json::to_string_pretty(&redact(&value))?);

    let report = validate(&config);
    println!();
    print!("{}", render_report(&report));
    Ok(report.is_valid())
}

fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    for error in &report.errors {
        out.push_str(&format!("  🔴 {}: {}\n", error.path, error.message));
    }
    for warning in &report.warnings {
        out.push_str(&format!("  🟡 {}: {}\n", warning.path, warning.message));
    }
    if report.is_valid() {
        out.push_str("✅ Config is valid.\n");
    } else {
        out.push_str(&format!("❌ {} error(s) found.\n", report.errors.len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodehook_config::parse_config;

    #[test]
    fn report_lists_errors_before_warnings() {
        let config = parse_config(
            "endpoints:\n  nodeAdded: [\"ftp://bad.example\"]\n  somethingElse: [\"https://ok.example\"]\n",
        )
        .unwrap();
        let rendered = render_report(&validate(&config));
        let error_at = rendered.find("🔴 endpoints.nodeAdded").unwrap();
        let warning_at = rendered.find("🟡 endpoints.somethingElse").unwrap();
        assert!(error_at < warning_at);
        assert!(rendered.ends_with("❌ 1 error(s) found.\n"));
    }

    #[test]
    fn clean_config_reports_valid() {
        let config = parse_config("endpoints:\n  nodeAdded: [\"https://ok.example\"]\n").unwrap();
        assert!(render_report(&validate(&config)).contains("✅ Config is valid."));
    }

    #[tokio::test]
    async fn invalid_file_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "endpoints:\n  nodeAdded: [\"not-a-url\"]\n").unwrap();
        assert!(!run(&path).await.unwrap());
    }
}
