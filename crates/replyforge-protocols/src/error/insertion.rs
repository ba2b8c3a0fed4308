//! Compose-field insertion errors.

use thiserror::Error;

/// Why generated text could not be written into the compose field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertionError {
    /// No compose field resolved within the bounded wait.
    #[error("No compose field found")]
    NotFound,

    /// The page backend stalled before the write completed.
    #[error("Timed out after {0} ms writing to the compose field")]
    Timeout(u64),

    /// The page backend failed underneath the resolver.
    #[error("Page error: {0}")]
    Page(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert!(InsertionError::NotFound.to_string().contains("compose"));
    }
}
