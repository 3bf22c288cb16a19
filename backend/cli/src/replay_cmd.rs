//! `nodehook replay`
//!
//! Runs an NDJSON script through one signal session. Store operations mutate
//! an in-memory node store that the session resolves against; signal lines
//! are handed to the collector in order. The session is always finished,
//! also when a line fails to parse.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use nodehook_config::load_and_prepare;
use nodehook_core::{MemoryNodeStore, NodeSnapshot, Signal};
use nodehook_dispatch::dispatcher_from_config;
use nodehook_logging::init_logger;
use nodehook_signals::{HandleOutcome, SignalCollector};

/// One line of a replay script.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ReplayOp {
    Upsert { workspace: String, node: NodeSnapshot },
    Remove { workspace: String, identifier: String },
    Signal(Signal),
}

/// Parse a script; blank lines and `#` comments are skipped.
pub fn parse_script(raw: &str) -> Result<Vec<ReplayOp>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid replay op on line {}", i + 1))
        })
        .collect()
}

pub async fn run(config_path: &Path, script: &Path) -> Result<()> {
    let config = load_and_prepare(config_path).await?;
    init_logger(config.log_dir(), config.log_level());

    let raw = tokio::fs::read_to_string(script)
        .await
        .with_context(|| format!("Failed to read replay script {}", script.display()))?;

    let store = Arc::new(MemoryNodeStore::new());
    let collector = SignalCollector::new(dispatcher_from_config(&config), store.clone());
    info!(session = %collector.session_id(), script = %script.display(), "Replaying script");

    let summary = replay(collector, store, &raw).await?;
    println!("{summary}");
    Ok(())
}

/// Apply every op, then finish the session whether or not parsing succeeded.
async fn replay(mut collector: SignalCollector, store: Arc<MemoryNodeStore>, raw: &str) -> Result<String> {
    let ops = match parse_script(raw) {
        Ok(ops) => ops,
        Err(e) => {
            collector.finish().await;
            return Err(e);
        }
    };

    let mut lines = Vec::new();
    for op in ops {
        match op {
            ReplayOp::Upsert { workspace, node } => store.upsert(node.in_workspace(workspace)),
            ReplayOp::Remove { workspace, identifier } => {
                store.remove(&workspace, &identifier);
            }
            ReplayOp::Signal(signal) => {
                let key = signal.event_name().to_string();
                let outcome = collector.handle(signal).await;
                lines.push(format!("{key}: {}", describe(&outcome)));
            }
        }
    }

    if let Some(report) = collector.finish().await {
        lines.push(format!(
            "{}: delivered {}/{}",
            report.event, report.delivered, report.attempted
        ));
    }
    Ok(lines.join("\n"))
}

fn describe(outcome: &HandleOutcome) -> String {
    match outcome {
        HandleOutcome::Dispatched(report) => {
            format!("delivered {}/{}", report.delivered, report.attempted)
        }
        HandleOutcome::Accumulated => "accumulated".to_string(),
        HandleOutcome::Ignored => "ignored".to_string(),
        HandleOutcome::Skipped => "skipped (no endpoints)".to_string(),
        HandleOutcome::Rejected(e) => format!("rejected: {e}"),
    }
}
