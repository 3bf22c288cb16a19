//! Signal handling for nodehook.
//!
//! Immediate node and workspace signals are rendered and forwarded as they
//! arrive. Publishing signals are accumulated per session and emitted once as
//! a single `workspacePublished` event.

pub mod accumulator;
pub mod classifier;
pub mod collector;
pub mod fallback;
pub mod renderer;

pub use accumulator::{AfterLookup, BeforeState, PublishAccumulator, PublishBatch, PublishRecord};
pub use classifier::{classify, Classification};
pub use collector::{
    finalize_batch, run_session, HandleOutcome, ScopeFuture, SessionStats, SignalCollector,
};
pub use fallback::{AfterFallback, ReportAnomaly, SourceSnapshotFallback};
