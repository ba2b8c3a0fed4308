//! CDP wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing CDP command.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Incoming CDP message: either a command response or an event.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorObject>,
    pub method: Option<String>,
}

/// Error object inside a CDP response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorObject {
    pub code: i64,
    pub message: String,
}

/// `/json/version` payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserVersion {
    #[serde(default)]
    pub browser: String,
    pub web_socket_debugger_url: String,
}

/// One entry of `/json/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_skips_empty_fields() {
        let req = CdpRequest {
            id: 7,
            method: "DOM.getDocument".to_string(),
            params: None,
            session_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(!json.contains("params"));
        assert!(!json.contains("sessionId"));
    }

    #[test]
    fn test_response_with_error_parses() {
        let json = r#"{"id":3,"error":{"code":-32000,"message":"No node with given id found"}}"#;
        let resp: CdpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id, Some(3));
        assert_eq!(resp.error.unwrap().code, -32000);
    }

    #[test]
    fn test_page_info_parses_type_field() {
        let json = r#"{"id":"ABC","title":"Inbox","url":"https://example.com/messaging/","type":"page"}"#;
        let info: PageInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.kind, "page");
        assert!(info.url.contains("/messaging/"));
    }
}
