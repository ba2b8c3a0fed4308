//! Text-generation provider errors.

use thiserror::Error;

/// Failure from a text-generation backend.
///
/// Providers are opaque text-in/text-out services; the variants here carry
/// whatever the HTTP layer could classify. Callers may string-match message
/// text for user-facing hints, but nothing here is a structured contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by the provider")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider response was malformed: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Classify an HTTP failure status into the closest variant.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited,
            400 | 422 => Self::InvalidRequest(message),
            _ => Self::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_response_auth_failed() {
        let err = GenerationError::from_api_response(401, "invalid x-api-key".to_string());
        assert!(matches!(err, GenerationError::AuthenticationFailed(_)));
        let err = GenerationError::from_api_response(403, "forbidden".to_string());
        assert!(matches!(err, GenerationError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_from_api_response_rate_limited() {
        let err = GenerationError::from_api_response(429, "slow down".to_string());
        assert_eq!(err, GenerationError::RateLimited);
    }

    #[test]
    fn test_from_api_response_invalid_request() {
        let err = GenerationError::from_api_response(400, "missing model".to_string());
        assert!(matches!(err, GenerationError::InvalidRequest(_)));
    }

    #[test]
    fn test_from_api_response_server_error() {
        let err = GenerationError::from_api_response(500, "oops".to_string());
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("oops"));
    }
}
