//! HTTP DTOs for the chat endpoint.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use serde::{Deserialize, Serialize};

/// One user turn, as posted by the widget or an API client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Tenant the conversation belongs to.
    pub tenant_id: String,
    /// Existing thread id, or absent to start a new thread.
    #[serde(default)]
    pub thread_id: Option<String>,
    /// The user's message.
    pub message: String,
}

/// The turn's result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The agent's answer.
    pub answer: String,
    /// Whether the thread is escalated to human support.
    pub escalated: bool,
    /// Ticket created by this turn, if any.
    pub ticket_id: Option<String>,
    /// The thread id to continue the conversation with.
    pub thread_id: String,
}

/// Generic error body; internal details never leave the process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Health probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the process is serving.
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_deserializes_camel_case() {
        let raw = r#"{"tenantId": "acme", "threadId": null, "message": "hi"}"#;
        let request: ChatRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.tenant_id, "acme");
        assert!(request.thread_id.is_none());
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn chat_request_thread_id_is_optional() {
        let raw = r#"{"tenantId": "acme", "message": "hi"}"#;
        let request: ChatRequest = serde_json::from_str(raw).unwrap();
        assert!(request.thread_id.is_none());
    }

    #[test]
    fn chat_response_serializes_camel_case() {
        let response = ChatResponse {
            answer: "Hello!".to_string(),
            escalated: false,
            ticket_id: None,
            thread_id: "t-1".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["answer"], "Hello!");
        assert_eq!(json["escalated"], false);
        assert_eq!(json["ticketId"], serde_json::Value::Null);
        assert_eq!(json["threadId"], "t-1");
    }
}
