//! Chat completion request and response schemas.

use serde::{Deserialize, Serialize};

use super::enums::RoutingStrategy;
use crate::field::Field;
use crate::record::{impl_record, Overflow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ChatMessage {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Sampling parameters forwarded to the selected model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ChatParams {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub temperature: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub max_tokens: Field<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ResponseFormat {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    /// `"text"` or `"json_object"`.
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn new(format_type: impl Into<String>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            format_type: format_type.into(),
        }
    }
}

/// Body of `POST /chat/completions`.
///
/// `model` pins a specific model and bypasses the service's routing;
/// `routing_strategy` overrides the strategy of a pool service for this call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UnifiedChatRequest {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub service: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub params: Field<ChatParams>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub stream: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub model: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub routing_strategy: Field<RoutingStrategy>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub response_format: Field<ResponseFormat>,
}

impl UnifiedChatRequest {
    pub fn new(service: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            service: service.into(),
            messages,
            params: Field::Absent,
            stream: Field::Absent,
            model: Field::Absent,
            routing_strategy: Field::Absent,
            response_format: Field::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ChatChoice {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub index: i64,
    pub message: ChatMessage,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub finish_reason: Field<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct TokenUsage {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Routing the caller asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct RequestedRouting {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub service: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub model_override: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub routing_strategy: Field<Option<String>>,
}

/// Routing the gateway actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ActualRouting {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub provider: String,
    pub model: String,
    pub fallback_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct RoutingMetadata {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub requested_routing: RequestedRouting,
    pub actual_routing: ActualRouting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UnifiedChatResponse {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub usage: Field<TokenUsage>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub routing_metadata: Field<RoutingMetadata>,
}

impl UnifiedChatResponse {
    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}

impl_record!(
    ChatMessage,
    ChatParams,
    ResponseFormat,
    UnifiedChatRequest,
    ChatChoice,
    TokenUsage,
    RequestedRouting,
    ActualRouting,
    RoutingMetadata,
    UnifiedChatResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::{json, Value};

    #[test]
    fn minimal_request_encodes_only_set_keys() {
        let request = UnifiedChatRequest {
            stream: Field::Present(false),
            ..UnifiedChatRequest::new("openai-gpt-4", vec![ChatMessage::new("user", "hi")])
        };
        assert_eq!(
            Value::Object(request.encode().unwrap()),
            json!({"service": "openai-gpt-4", "messages": [{"role": "user", "content": "hi"}], "stream": false})
        );
    }

    #[test]
    fn full_request_round_trips() {
        let source = json!({
            "service": "pool",
            "messages": [{"role": "system", "content": "be brief"}, {"role": "user", "content": "hi", "name": "bob"}],
            "params": {"temperature": 0.2, "max_tokens": 256, "top_p": 0.9},
            "stream": true,
            "model": "gpt-4o",
            "routing_strategy": "LeastCost",
            "response_format": {"type": "json_object"},
            "trace_id": "t-1"
        });
        let request = UnifiedChatRequest::from_value(source.clone()).unwrap();
        assert_eq!(request.routing_strategy, Field::Present(RoutingStrategy::LeastCost));
        assert_eq!(request.response_format.get().unwrap().format_type, "json_object");
        assert_eq!(request.messages[1].additional_keys(), vec!["name"]);
        assert_eq!(request.params.get().unwrap().additional_properties["top_p"], json!(0.9));
        assert_eq!(request.additional_keys(), vec!["trace_id"]);
        assert_eq!(Value::Object(request.encode().unwrap()), source);
    }

    #[test]
    fn unknown_routing_strategy_is_rejected() {
        let err = UnifiedChatRequest::from_value(json!({
            "service": "pool",
            "messages": [],
            "routing_strategy": "Fastest"
        }))
        .unwrap_err();
        assert_eq!(err.schema(), "UnifiedChatRequest");
        assert!(err.message().contains("Fastest"), "{err}");
    }

    #[test]
    fn null_is_rejected_for_non_nullable_optional() {
        let err = UnifiedChatRequest::from_value(json!({"service": "s", "messages": [], "stream": null})).unwrap_err();
        assert_eq!(err.schema(), "UnifiedChatRequest");
    }

    #[test]
    fn response_decodes_with_and_without_metadata() {
        let bare = UnifiedChatResponse::from_slice(
            br#"{"id":"x","object":"chat.completion","created":1,"model":"m","choices":[{"index":0,"message":{"role":"assistant","content":"hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(bare.first_content(), Some("hello"));
        assert!(bare.usage.is_absent());
        assert!(bare.choices[0].finish_reason.is_absent());

        let full = json!({
            "id": "x",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}, "finish_reason": null}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4},
            "routing_metadata": {
                "requested_routing": {"service": "pool", "routing_strategy": "Health"},
                "actual_routing": {"provider": "openai", "model": "gpt-4o", "fallback_used": false, "attempts": 1}
            }
        });
        let response = UnifiedChatResponse::from_value(full.clone()).unwrap();
        assert!(response.choices[0].finish_reason.is_null());
        assert_eq!(response.usage.get().unwrap().total_tokens, 4);
        let metadata = response.routing_metadata.get().unwrap();
        assert!(metadata.requested_routing.model_override.is_absent());
        assert_eq!(metadata.actual_routing.additional_properties["attempts"], json!(1));
        assert_eq!(Value::Object(response.encode().unwrap()), full);
    }

    #[test]
    fn stray_key_matching_nested_field_stays_at_its_level() {
        let response = UnifiedChatResponse::from_value(json!({
            "id": "x",
            "object": "chat.completion",
            "created": 1,
            "model": "m",
            "choices": [],
            "content": "top-level stray"
        }))
        .unwrap();
        assert_eq!(response.additional_keys(), vec!["content"]);
        assert_eq!(response.first_content(), None);
    }
}
