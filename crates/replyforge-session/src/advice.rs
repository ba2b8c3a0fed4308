//! User-facing remediation hints for generation failures.

use replyforge_protocols::GenerationError;

/// A short next-step hint for a generation failure, when the failure mode
/// has an obvious user remedy. Message text is string-matched because
/// provider error bodies carry no structured cause.
pub fn suggestion(err: &GenerationError) -> Option<&'static str> {
    match err {
        GenerationError::RateLimited => {
            Some("The provider is rate limiting requests. Wait a moment and try again.")
        }
        GenerationError::AuthenticationFailed(_) => {
            Some("Check the API key configured for this provider.")
        }
        GenerationError::Network(_) => {
            Some("Check your network connection and the provider endpoint in your config.")
        }
        GenerationError::Api { message, .. } | GenerationError::InvalidRequest(message) => {
            let lower = message.to_ascii_lowercase();
            if lower.contains("quota") || lower.contains("billing") || lower.contains("credit") {
                Some("Your provider account may be out of credit. Check its billing page.")
            } else if lower.contains("api key") || lower.contains("api-key") {
                Some("Check the API key configured for this provider.")
            } else if lower.contains("overloaded") {
                Some("The provider is overloaded. Wait a moment and try again.")
            } else {
                None
            }
        }
        GenerationError::InvalidResponse(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_hint() {
        let hint = suggestion(&GenerationError::RateLimited).unwrap();
        assert!(hint.contains("rate limiting"));
    }

    #[test]
    fn test_auth_hint() {
        let hint =
            suggestion(&GenerationError::AuthenticationFailed("bad key".to_string())).unwrap();
        assert!(hint.contains("API key"));
    }

    #[test]
    fn test_quota_detected_in_api_message() {
        let err = GenerationError::Api {
            status: 402,
            message: "You have exceeded your monthly quota".to_string(),
        };
        assert!(suggestion(&err).unwrap().contains("credit"));
    }

    #[test]
    fn test_overloaded_detected_in_message() {
        let err = GenerationError::Api {
            status: 529,
            message: "Overloaded".to_string(),
        };
        assert!(suggestion(&err).unwrap().contains("overloaded"));
    }

    #[test]
    fn test_unclassified_api_error_has_no_hint() {
        let err = GenerationError::Api {
            status: 500,
            message: "internal error".to_string(),
        };
        assert!(suggestion(&err).is_none());
    }

    #[test]
    fn test_malformed_response_has_no_hint() {
        assert!(suggestion(&GenerationError::InvalidResponse("eof".to_string())).is_none());
    }
}
