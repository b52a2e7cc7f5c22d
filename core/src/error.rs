//! Error types for the gateway client.
//!
//! # Design
//! `SchemaError` is its own type because the record codec raises it without
//! any knowledge of HTTP. `ApiError` wraps it together with the failures that
//! only exist once a request is on the wire: an undocumented status code and
//! a transport failure. Transport errors are boxed, not translated, so the
//! caller can downcast to the concrete ureq/reqwest error.

use bytes::Bytes;
use thiserror::Error;

/// A payload did not match the schema it was decoded against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema `{schema}`: {message}")]
pub struct SchemaError {
    schema: String,
    message: String,
}

impl SchemaError {
    pub fn new(schema: impl Into<String>, message: impl ToString) -> Self {
        Self {
            schema: schema.into(),
            message: message.to_string(),
        }
    }

    /// Name of the schema that failed to decode or encode.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A failure raised by the HTTP transport, carried through unmodified.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TransportError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The transport's own error, for downcasting.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.source
    }
}

/// Errors returned by `GatewayClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The response (or request) payload does not fit its schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The server returned a status the endpoint does not document and the
    /// client is configured to raise on it.
    #[error("unexpected status {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: u16, body: Bytes },

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint value cannot be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
