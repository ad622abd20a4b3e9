use crate::slots::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of `POST /api/send`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RelayedRequest {
    pub endpoint: String,
    pub method: Method,
    pub payload: Value,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

/// Reply of `POST /api/send`. The relay answers failures with a 500 and this same shape.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RelayedResponse {
    pub success: bool,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `GET /api/logs`: the relay's preformatted dashboard lines.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RelayLogs {
    #[serde(default)]
    pub logs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_omits_headers_when_none_are_configured() {
        let request = RelayedRequest {
            endpoint: "https://example.com/hook".to_string(),
            method: Method::Post,
            payload: json!({"a": 1}),
            headers: HashMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"endpoint": "https://example.com/hook", "method": "POST", "payload": {"a": 1}})
        );
    }

    #[test]
    fn failure_reply_parses_without_status() {
        let reply: RelayedResponse =
            serde_json::from_str(r#"{"success": false, "error": "Error sending request: boom"}"#)
                .unwrap();
        assert!(!reply.success);
        assert_eq!(reply.status_code, None);
        assert_eq!(reply.error.as_deref(), Some("Error sending request: boom"));
    }
}
