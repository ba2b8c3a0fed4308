use replyforge_protocols::provider::GenerationRequest;
use replyforge_protocols::GenerationError;

use super::*;
use crate::api::{ApiResponse, Choice, ChoiceMessage};

#[test]
fn test_build_request_uses_profile_defaults() {
    let provider = OpenAiProvider::new("sk-test".to_string());
    let api = provider.build_request(&GenerationRequest::new("hello"));

    assert_eq!(api.model, "gpt-4o-mini");
    assert!(api.max_tokens.is_none());
    assert_eq!(api.messages[0].content, "hello");
}

#[test]
fn test_request_serialization_skips_absent_options() {
    let provider = OpenAiProvider::new("sk-test".to_string());
    let api = provider.build_request(&GenerationRequest::new("hello"));
    let json = serde_json::to_string(&api).unwrap();

    assert!(!json.contains("max_tokens"));
    assert!(!json.contains("temperature"));
}

#[test]
fn test_error_from_rate_limit_body() {
    let body = r#"{"error":{"message":"Rate limit reached","type":"tokens"}}"#;
    let err = error_from_body(429, body);
    assert_eq!(err, GenerationError::RateLimited);
}

#[test]
fn test_parse_response_takes_first_choice() {
    let response = ApiResponse {
        model: "gpt-4o-mini".to_string(),
        choices: vec![
            Choice {
                message: ChoiceMessage {
                    content: Some("First.".to_string()),
                },
            },
            Choice {
                message: ChoiceMessage {
                    content: Some("Second.".to_string()),
                },
            },
        ],
    };
    let parsed = parse_response(response).unwrap();
    assert_eq!(parsed.text, "First.");
    assert_eq!(parsed.model, "gpt-4o-mini");
}

#[test]
fn test_parse_response_rejects_empty_choices() {
    let response = ApiResponse {
        model: "gpt-4o-mini".to_string(),
        choices: vec![],
    };
    assert!(matches!(
        parse_response(response),
        Err(GenerationError::InvalidResponse(_))
    ));
}
