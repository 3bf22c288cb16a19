use crate::error::ResolveError;
use crate::types::{Dimensions, NodeSnapshot};

/// Read access to the content store, used to look a node up inside a workspace.
///
/// Lookups are synchronous and may block. `Ok(None)` means the node does not
/// exist in that workspace; `Err` means the lookup itself failed.
pub trait NodeResolver: Send + Sync {
    fn resolve(
        &self,
        identifier: &str,
        workspace: &str,
        dimensions: &Dimensions,
    ) -> Result<Option<NodeSnapshot>, ResolveError>;
}

impl<T: NodeResolver + ?Sized> NodeResolver for std::sync::Arc<T> {
    fn resolve(
        &self,
        identifier: &str,
        workspace: &str,
        dimensions: &Dimensions,
    ) -> Result<Option<NodeSnapshot>, ResolveError> {
        (**self).resolve(identifier, workspace, dimensions)
    }
}
