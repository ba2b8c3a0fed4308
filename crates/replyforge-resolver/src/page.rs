//! The narrow DOM access trait the resolver works against.

use async_trait::async_trait;
use thiserror::Error;

use replyforge_protocols::NodeHandle;

/// Errors surfaced by a page backend.
#[derive(Debug, Error)]
pub enum PageError {
    /// The referenced node is no longer attached to the document.
    #[error("Node {0:?} is no longer attached")]
    Detached(NodeHandle),

    /// Transport or protocol failure underneath the DOM access.
    #[error("Page backend error: {0}")]
    Backend(String),
}

/// Read/write access to the host page DOM, scoped by node handles.
///
/// This is the only seam between the resolver and a concrete page. The
/// resolver never locks the page; it reads, and performs one bounded write
/// per user action through [`set_compose_value`].
///
/// [`set_compose_value`]: HostPage::set_compose_value
#[async_trait]
pub trait HostPage: Send + Sync {
    /// Current location (URL) of the page.
    async fn location(&self) -> Result<String, PageError>;

    /// First node matching `selector`, searched within `scope` when given,
    /// otherwise from the document root.
    async fn query(
        &self,
        scope: Option<&NodeHandle>,
        selector: &str,
    ) -> Result<Option<NodeHandle>, PageError>;

    /// All nodes matching `selector`, in document order.
    async fn query_all(
        &self,
        scope: Option<&NodeHandle>,
        selector: &str,
    ) -> Result<Vec<NodeHandle>, PageError>;

    /// Visible text content of a node, whitespace-trimmed.
    async fn text(&self, node: &NodeHandle) -> Result<String, PageError>;

    /// Whether a previously issued handle still resolves to a live node.
    async fn is_attached(&self, node: &NodeHandle) -> Result<bool, PageError>;

    /// Replace the entire content of a compose field and notify the host
    /// page's own input handling. A raw value assignment is not enough:
    /// the host framework only picks up programmatic edits when synthetic
    /// `input` and `change` events are dispatched alongside the write.
    async fn set_compose_value(&self, node: &NodeHandle, text: &str) -> Result<(), PageError>;
}
