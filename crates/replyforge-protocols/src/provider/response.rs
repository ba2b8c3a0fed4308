//! Generation response type.

use serde::{Deserialize, Serialize};

/// Result of one text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text.
    pub text: String,

    /// Model that produced it.
    pub model: String,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}
