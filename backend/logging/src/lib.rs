//! Structured logging for nodehook.
//!
//! Handles subscriber setup (console + rolling NDJSON file), redaction of
//! secrets in URLs and free text, and the per-delivery webhook log.

pub mod delivery_logger;
pub mod logger;
pub mod redact;

pub use delivery_logger::{DeliveryLogEntry, DeliveryLogger, DeliveryOutcome};
pub use logger::init_logger;
pub use redact::{redact_sensitive_data, redact_url};
