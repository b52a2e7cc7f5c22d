use bytes::Bytes;

use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::record::{JsonObject, Record};
use crate::types::{UnifiedChatRequest, UnifiedChatResponse};

/// `POST /chat/completions`: route a chat request through a service.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateChatCompletion {
    pub request: UnifiedChatRequest,
}

impl CreateChatCompletion {
    pub fn new(request: UnifiedChatRequest) -> Self {
        Self { request }
    }
}

/// Outcome of a chat completion, by status code.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCompletionOutcome {
    /// 200: the completion body, left undecoded.
    Completion(CompletionBody),
    /// 401: missing or rejected credentials.
    Unauthorized(String),
    /// 500: routing or upstream failure.
    ServerError(String),
}

/// Body of a successful completion.
///
/// The gateway documents it as opaque since a streamed completion arrives as
/// server-sent events rather than one JSON object. `completion` decodes the
/// non-streamed form.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionBody(Bytes);

impl CompletionBody {
    pub fn completion(&self) -> Result<UnifiedChatResponse, SchemaError> {
        UnifiedChatResponse::from_slice(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl Endpoint for CreateChatCompletion {
    type Output = ChatCompletionOutcome;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "create_chat_completion",
        method: HttpMethod::Post,
        path: "/chat/completions",
        body_schema: Some(UnifiedChatRequest::SCHEMA),
        responses: &[
            (200, DecodeAs::RawBytes),
            (401, DecodeAs::OpaqueString),
            (500, DecodeAs::OpaqueString),
        ],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.request.encode().map(Some)
    }

    fn decode(status: u16, body: ResponseBody) -> Result<ChatCompletionOutcome, SchemaError> {
        match status {
            200 => Ok(ChatCompletionOutcome::Completion(CompletionBody(body.bytes()))),
            401 => body.text().map(ChatCompletionOutcome::Unauthorized),
            _ => body.text().map(ChatCompletionOutcome::ServerError),
        }
    }
}
