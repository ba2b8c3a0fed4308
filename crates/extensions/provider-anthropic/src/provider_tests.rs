use replyforge_protocols::provider::GenerationRequest;

use super::*;
use crate::api::{ApiResponse, ContentBlock};

#[test]
fn test_build_request_uses_profile_defaults() {
    let provider = AnthropicProvider::new("sk-test".to_string());
    let api = provider.build_request(&GenerationRequest::new("hello"));

    assert_eq!(api.model, "claude-3-5-sonnet-20241022");
    assert_eq!(api.max_tokens, 1024);
    assert_eq!(api.messages.len(), 1);
    assert_eq!(api.messages[0].role, "user");
    assert_eq!(api.messages[0].content, "hello");
}

#[test]
fn test_build_request_honors_overrides() {
    let provider = AnthropicProvider::new("sk-test".to_string()).with_model("claude-3-haiku");
    let api = provider.build_request(
        &GenerationRequest::new("hi")
            .with_max_tokens(256)
            .with_model("claude-override"),
    );

    assert_eq!(api.model, "claude-override");
    assert_eq!(api.max_tokens, 256);
}

#[test]
fn test_request_serializes_to_messages_shape() {
    let provider = AnthropicProvider::new("sk-test".to_string());
    let api = provider.build_request(&GenerationRequest::new("hello"));
    let json = serde_json::to_value(&api).unwrap();

    assert_eq!(json["messages"][0]["role"], "user");
    assert!(json["max_tokens"].is_number());
    assert!(json.get("temperature").is_none());
}

#[test]
fn test_error_from_documented_body() {
    let body = r#"{"error":{"message":"invalid x-api-key","type":"authentication_error"}}"#;
    let err = error_from_body(401, body);
    assert!(matches!(
        err,
        replyforge_protocols::GenerationError::AuthenticationFailed(m) if m.contains("invalid x-api-key")
    ));
}

#[test]
fn test_error_from_opaque_body() {
    let err = error_from_body(500, "upstream exploded");
    assert!(err.to_string().contains("upstream exploded"));
}

#[test]
fn test_parse_response_joins_text_blocks() {
    let response = ApiResponse {
        model: "claude-3-5-sonnet-20241022".to_string(),
        content: vec![
            ContentBlock::Text {
                text: "Hello ".to_string(),
            },
            ContentBlock::Text {
                text: "there.".to_string(),
            },
        ],
    };
    let parsed = parse_response(response).unwrap();
    assert_eq!(parsed.text, "Hello there.");
}

#[test]
fn test_parse_response_rejects_empty_content() {
    let response = ApiResponse {
        model: "claude-3-5-sonnet-20241022".to_string(),
        content: vec![],
    };
    assert!(parse_response(response).is_err());
}
