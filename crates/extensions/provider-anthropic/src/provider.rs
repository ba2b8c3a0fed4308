//! Anthropic provider implementation.

use async_trait::async_trait;
use tracing::debug;

use replyforge_protocols::error::GenerationError;
use replyforge_protocols::provider::{
    AuthScheme, GenerationProvider, GenerationRequest, GenerationResponse, ProviderKind,
};

use crate::api::{ApiErrorEnvelope, ApiMessage, ApiRequest, ApiResponse, ContentBlock};

const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic text-generation provider.
pub struct AnthropicProvider {
    api_key: String,
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        let profile = ProviderKind::Anthropic.profile();
        Self {
            api_key,
            endpoint: profile.endpoint.to_string(),
            model: profile.default_model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a different endpoint (proxies, staging).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request(&self, request: &GenerationRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl GenerationProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let api_request = self.build_request(&request);
        debug!(model = %api_request.model, "anthropic generation request");

        let profile = ProviderKind::Anthropic.profile();
        let mut builder = self.client.post(&self.endpoint).json(&api_request);
        builder = match profile.auth {
            AuthScheme::ApiKeyHeader {
                header,
                version_header,
            } => {
                let mut b = builder.header(header, &self.api_key);
                if let Some((name, value)) = version_header {
                    b = b.header(name, value);
                }
                b
            }
            AuthScheme::Bearer => builder.bearer_auth(&self.api_key),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        parse_response(api_response)
    }
}

/// Extract the provider's own error message from the response body when it
/// has the documented shape, otherwise fall back to the raw body.
fn error_from_body(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    GenerationError::from_api_response(status, message)
}

fn parse_response(response: ApiResponse) -> Result<GenerationResponse, GenerationError> {
    let text: String = response
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => text.as_str(),
        })
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "response contained no text content".to_string(),
        ));
    }

    Ok(GenerationResponse::new(text, response.model))
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
