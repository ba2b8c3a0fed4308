//! OpenAI provider implementation.

use async_trait::async_trait;
use tracing::debug;

use replyforge_protocols::error::GenerationError;
use replyforge_protocols::provider::{
    GenerationProvider, GenerationRequest, GenerationResponse, ProviderKind,
};

use crate::api::{ApiErrorEnvelope, ApiMessage, ApiRequest, ApiResponse};

/// OpenAI text-generation provider.
///
/// Also serves OpenAI-compatible endpoints via [`with_endpoint`].
///
/// [`with_endpoint`]: OpenAiProvider::with_endpoint
pub struct OpenAiProvider {
    api_key: String,
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        let profile = ProviderKind::OpenAi.profile();
        Self {
            api_key,
            endpoint: profile.endpoint.to_string(),
            model: profile.default_model.to_string(),
            client: reqwest::Client::new(),
        }
    }

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
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let api_request = self.build_request(&request);
        debug!(model = %api_request.model, "openai generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&api_request)
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

fn error_from_body(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    GenerationError::from_api_response(status, message)
}

fn parse_response(response: ApiResponse) -> Result<GenerationResponse, GenerationError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "response contained no message content".to_string(),
        ));
    }

    Ok(GenerationResponse::new(text, response.model))
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
