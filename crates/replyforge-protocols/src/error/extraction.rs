//! Snapshot extraction errors.

use thiserror::Error;

/// Why a snapshot could not be extracted from a conversation surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The surface kind maps to no known structural hints.
    #[error("No messaging context: {0}")]
    NoMessagingContext(String),

    /// The container vanished between discovery and extraction.
    #[error("Conversation container not found: {0}")]
    ContainerNotFound(String),

    /// Message elements never materialized within the bounded wait.
    #[error("Timed out after {0} ms waiting for message elements")]
    Timeout(u64),

    /// The page backend failed underneath the resolver.
    #[error("Page error: {0}")]
    Page(String),
}
