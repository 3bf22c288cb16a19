pub mod error;
pub mod normalizer;
pub mod signal;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{NodehookError, ResolveError, SignalError};
pub use signal::{PropertyChange, Signal, SignalKind};
pub use store::MemoryNodeStore;
pub use traits::NodeResolver;
pub use types::{
    ChangeType, Dimensions, NodeChange, NodeSnapshot, Properties, WorkspaceInfo,
    WorkspacePublishedEvent, WORKSPACE_PUBLISHED_ENDPOINT, WORKSPACE_PUBLISHED_EVENT,
};
