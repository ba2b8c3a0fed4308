//! Generation request type.

use serde::{Deserialize, Serialize};

/// Request for one text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fully rendered prompt string.
    pub prompt: String,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Override the provider's default model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
            model: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let req = GenerationRequest::new("hello");
        assert_eq!(req.prompt, "hello");
        assert!(req.max_tokens.is_none());
        assert!(req.model.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let req = GenerationRequest::new("hi")
            .with_max_tokens(512)
            .with_temperature(0.7)
            .with_model("test-model");
        assert_eq!(req.max_tokens, Some(512));
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.model.as_deref(), Some("test-model"));
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let json = serde_json::to_string(&GenerationRequest::new("p")).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("model"));
    }
}
