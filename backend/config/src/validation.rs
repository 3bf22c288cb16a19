//! Config validation with field paths and user-facing messages.

use thiserror::Error;

use nodehook_core::normalizer::known_event_names;

use crate::schema::NodehookConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &NodehookConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_endpoints(config, &mut report);
    validate_delivery(config, &mut report);
    report
}

fn validate_endpoints(config: &NodehookConfig, report: &mut ValidationReport) {
    if config.endpoints.is_empty() {
        report.warn("endpoints", "No webhook endpoints configured; every signal will be skipped");
        return;
    }

    let known = known_event_names();
    for (event, urls) in &config.endpoints {
        let path = format!("endpoints.{event}");
        if !known.iter().any(|name| *name == event.as_str()) {
            report.warn(&path, format!("Unknown event name '{event}'; it will never fire"));
        }
        if urls.is_empty() {
            report.warn(&path, "Event has no URLs configured");
        }
        for (i, url) in urls.iter().enumerate() {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                report.error(format!("{path}[{i}]"), "URL cannot be empty");
            } else if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                report.error(format!("{path}[{i}]"), "URL must use http:// or https://");
            }
        }
    }
}

fn validate_delivery(config: &NodehookConfig, report: &mut ValidationReport) {
    let Some(delivery) = &config.delivery else { return };
    if delivery.timeout_ms == Some(0) {
        report.error("delivery.timeoutMs", "timeoutMs must be > 0");
    }
}
