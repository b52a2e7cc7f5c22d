//! Endpoint descriptors, request building and status-code dispatch.
//!
//! # Design
//! An endpoint is a value (`ListRequestLogs { limit }`) whose type carries a
//! `const` `EndpointDescriptor`. Two pure functions do all the work:
//!
//! - `build_request` renders the path template, drops absent query
//!   parameters, encodes the body record and attaches shared headers.
//! - `parse_response` looks the status code up in the descriptor, applies the
//!   decode strategy and hands the result to the endpoint's `decode`.
//!
//! Every call variant in `client` goes through these two functions, which is
//! what keeps the blocking and async paths identical.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, SchemaError};
use crate::field::Field;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::record::{decode_list, json_kind, JsonObject, Record};
use crate::response::Response;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// How the body of a documented status code is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeAs {
    /// Parse as JSON and decode against the named schema.
    Schema(&'static str),
    /// Parse as a JSON array of the named schema.
    List(&'static str),
    /// A bare string message.
    OpaqueString,
    /// Passed through undecoded.
    RawBytes,
}

impl DecodeAs {
    /// A single record of schema `R`, named after `R::SCHEMA`.
    pub const fn record<R: Record>() -> Self {
        DecodeAs::Schema(R::SCHEMA)
    }

    /// An array of records of schema `R`.
    pub const fn records<R: Record>() -> Self {
        DecodeAs::List(R::SCHEMA)
    }
}

/// Static description of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the base URL, with `{param}` slots.
    pub path: &'static str,
    pub body_schema: Option<&'static str>,
    /// Documented status codes. Anything else is unmapped.
    pub responses: &'static [(u16, DecodeAs)],
}

impl EndpointDescriptor {
    pub fn strategy(&self, status: u16) -> Option<DecodeAs> {
        self.responses
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, strategy)| *strategy)
    }
}

/// A response body after its decode strategy has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Raw(Bytes),
}

impl ResponseBody {
    pub fn json(self, schema: &str) -> Result<Value, SchemaError> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(_) | ResponseBody::Raw(_) => {
                Err(SchemaError::new(schema, "expected a JSON body"))
            }
        }
    }

    pub fn record<R: Record>(self) -> Result<R, SchemaError> {
        R::from_value(self.json(R::SCHEMA)?)
    }

    pub fn records<R: Record>(self) -> Result<Vec<R>, SchemaError> {
        decode_list(self.json(R::SCHEMA)?)
    }

    /// Decode a non-record JSON value such as a boolean.
    pub fn value<T: DeserializeOwned>(self, schema: &str) -> Result<T, SchemaError> {
        serde_json::from_value(self.json(schema)?).map_err(|e| SchemaError::new(schema, e))
    }

    pub fn text(self) -> Result<String, SchemaError> {
        match self {
            ResponseBody::Text(text) | ResponseBody::Json(Value::String(text)) => Ok(text),
            ResponseBody::Json(other) => Err(SchemaError::new(
                "string",
                format!("expected a string, found {}", json_kind(&other)),
            )),
            ResponseBody::Raw(_) => Err(SchemaError::new("string", "expected a string body")),
        }
    }

    pub fn bytes(self) -> Bytes {
        match self {
            ResponseBody::Raw(bytes) => bytes,
            ResponseBody::Text(text) => Bytes::from(text),
            ResponseBody::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

/// One API operation: its descriptor, the parameters of a single call and
/// the mapping from decoded bodies to its output type.
pub trait Endpoint {
    /// Decoded payload, usually a tagged union when statuses map to
    /// different shapes.
    type Output;

    const DESCRIPTOR: EndpointDescriptor;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn query(&self) -> Query {
        Query::new()
    }

    /// Encoded body record. Must be `Some` exactly when the descriptor
    /// declares a body schema.
    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        Ok(None)
    }

    /// Turn the body of a documented status into the output type.
    fn decode(status: u16, body: ResponseBody) -> Result<Self::Output, SchemaError>;
}

/// Renders a query parameter value; `None` drops the parameter.
pub trait ToQuery {
    fn to_query(&self) -> Option<String>;
}

macro_rules! display_to_query {
    ($($ty:ty),+) => {
        $(
            impl ToQuery for $ty {
                fn to_query(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

display_to_query!(str, String, bool, i32, i64, u32, u64, f64);

impl<T: ToQuery + ?Sized> ToQuery for &T {
    fn to_query(&self) -> Option<String> {
        (**self).to_query()
    }
}

impl<T: ToQuery> ToQuery for Option<T> {
    fn to_query(&self) -> Option<String> {
        self.as_ref().and_then(ToQuery::to_query)
    }
}

impl<T: ToQuery> ToQuery for Field<T> {
    fn to_query(&self) -> Option<String> {
        self.get().and_then(ToQuery::to_query)
    }
}

/// Query parameters of one call, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: Vec<(&'static str, Option<String>)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &'static str, value: impl ToQuery) -> Self {
        self.params.push((name, value.to_query()));
        self
    }

    /// Pairs with every absent or null parameter removed.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.params
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
            .collect()
    }
}

/// Build the transport-ready request for one call.
pub fn build_request<E: Endpoint>(config: &ClientConfig, endpoint: &E) -> Result<HttpRequest, ApiError> {
    let descriptor = E::DESCRIPTOR;
    let url = render_url(config.base_url(), descriptor.path, &endpoint.path_params())?;

    let mut headers = Vec::with_capacity(config.headers().len() + 2);
    if config.header("user-agent").is_none() {
        headers.push(("User-Agent".to_string(), config.user_agent().to_string()));
    }
    headers.extend(config.headers().iter().cloned());

    let body = match (descriptor.body_schema, endpoint.body()?) {
        (Some(schema), Some(object)) => {
            set_header(&mut headers, "Content-Type", JSON_CONTENT_TYPE);
            Some(serde_json::to_string(&object).map_err(|e| SchemaError::new(schema, e))?)
        }
        (None, None) => None,
        (Some(schema), None) => {
            return Err(ApiError::InvalidRequest(format!(
                "{} requires a {schema} body",
                descriptor.name
            )))
        }
        (None, Some(_)) => {
            return Err(ApiError::InvalidRequest(format!(
                "{} does not take a body",
                descriptor.name
            )))
        }
    };

    Ok(HttpRequest {
        method: descriptor.method,
        url,
        query: endpoint.query().into_pairs(),
        headers,
        body,
    })
}

/// Decode a response according to the endpoint's status table.
pub fn parse_response<E: Endpoint>(
    config: &ClientConfig,
    response: HttpResponse,
) -> Result<Response<E::Output>, ApiError> {
    let descriptor = E::DESCRIPTOR;
    let parsed = match descriptor.strategy(response.status) {
        Some(strategy) => {
            let body = decode_body(strategy, &response.body)?;
            Some(E::decode(response.status, body)?)
        }
        None if config.raise_on_unexpected_status() => {
            warn!(operation = descriptor.name, status = response.status, "undocumented status code");
            return Err(ApiError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            });
        }
        None => {
            debug!(operation = descriptor.name, status = response.status, "undocumented status code, no payload");
            None
        }
    };

    Ok(Response {
        status_code: response.status,
        headers: response.headers,
        content: response.body,
        parsed,
    })
}

/// Apply a decode strategy to a raw body.
pub fn decode_body(strategy: DecodeAs, body: &Bytes) -> Result<ResponseBody, SchemaError> {
    match strategy {
        DecodeAs::Schema(schema) => serde_json::from_slice(body)
            .map(ResponseBody::Json)
            .map_err(|e| SchemaError::new(schema, format!("malformed JSON: {e}"))),
        DecodeAs::List(schema) => serde_json::from_slice(body)
            .map(ResponseBody::Json)
            .map_err(|e| SchemaError::new(format!("{schema}[]"), format!("malformed JSON: {e}"))),
        DecodeAs::OpaqueString => match serde_json::from_slice::<Value>(body) {
            Ok(Value::String(text)) => Ok(ResponseBody::Text(text)),
            _ => String::from_utf8(body.to_vec())
                .map(ResponseBody::Text)
                .map_err(|e| SchemaError::new("string", e)),
        },
        DecodeAs::RawBytes => Ok(ResponseBody::Raw(body.clone())),
    }
}

fn render_url(base: &Url, template: &str, params: &[(&'static str, String)]) -> Result<String, ApiError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ApiError::Configuration(format!("base URL '{base}' cannot carry a path")))?;
        segments.pop_if_empty();
        for segment in template.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| value.as_str())
                        .ok_or_else(|| {
                            ApiError::InvalidRequest(format!("missing path parameter `{name}` in {template}"))
                        })?;
                    segments.push(value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }
    Ok(url.into())
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use crate::record::{impl_record, Overflow};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(remote = "Self")]
    struct Note {
        #[serde(flatten)]
        additional_properties: Overflow,
        text: String,
    }

    impl_record!(Note);

    #[derive(Debug, PartialEq)]
    enum NoteOutcome {
        Note(Note),
        Denied(String),
    }

    struct GetNote {
        id: String,
        verbose: Field<bool>,
    }

    impl Endpoint for GetNote {
        type Output = NoteOutcome;

        const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
            name: "get_note",
            method: HttpMethod::Get,
            path: "/notes/{id}",
            body_schema: None,
            responses: &[(200, DecodeAs::record::<Note>()), (401, DecodeAs::OpaqueString)],
        };

        fn path_params(&self) -> Vec<(&'static str, String)> {
            vec![("id", self.id.clone())]
        }

        fn query(&self) -> Query {
            Query::new().param("verbose", &self.verbose)
        }

        fn decode(status: u16, body: ResponseBody) -> Result<NoteOutcome, SchemaError> {
            match status {
                200 => body.record().map(NoteOutcome::Note),
                _ => body.text().map(NoteOutcome::Denied),
            }
        }
    }

    struct PutNote {
        id: String,
        note: Note,
    }

    impl Endpoint for PutNote {
        type Output = String;

        const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
            name: "put_note",
            method: HttpMethod::Put,
            path: "/notes/{id}",
            body_schema: Some(Note::SCHEMA),
            responses: &[(200, DecodeAs::OpaqueString)],
        };

        fn path_params(&self) -> Vec<(&'static str, String)> {
            vec![("id", self.id.clone())]
        }

        fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
            self.note.encode().map(Some)
        }

        fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
            body.text()
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost:8030/v1").unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("x-request-id".to_string(), "r1".to_string())],
            body: Bytes::from(body.to_string()),
        }
    }

    fn get_note() -> GetNote {
        GetNote {
            id: "n1".to_string(),
            verbose: Field::Absent,
        }
    }

    #[test]
    fn absent_query_parameter_is_dropped() {
        let req = build_request(&config(), &get_note()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8030/v1/notes/n1");
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn present_query_parameter_is_rendered() {
        let endpoint = GetNote {
            verbose: Field::Present(true),
            ..get_note()
        };
        let req = build_request(&config(), &endpoint).unwrap();
        assert_eq!(req.query, vec![("verbose".to_string(), "true".to_string())]);
        assert_eq!(req.full_url(), "http://localhost:8030/v1/notes/n1?verbose=true");
    }

    #[test]
    fn null_query_values_are_dropped() {
        let pairs = Query::new()
            .param("a", None::<i64>)
            .param("b", Field::Present(None::<i64>))
            .param("c", Field::Present(Some(3_i64)))
            .into_pairs();
        assert_eq!(pairs, vec![("c".to_string(), "3".to_string())]);
    }

    #[test]
    fn path_parameters_are_segment_encoded() {
        let endpoint = GetNote {
            id: "a b/c".to_string(),
            ..get_note()
        };
        let req = build_request(&config(), &endpoint).unwrap();
        assert_eq!(req.url, "http://localhost:8030/v1/notes/a%20b%2Fc");
    }

    #[test]
    fn trailing_slash_on_base_url_is_ignored() {
        let config = ClientConfig::new("http://localhost:8030/v1/").unwrap();
        let req = build_request(&config, &get_note()).unwrap();
        assert_eq!(req.url, "http://localhost:8030/v1/notes/n1");
    }

    #[test]
    fn missing_path_parameter_is_invalid_request() {
        let err = render_url(config().base_url(), "/notes/{id}", &[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn body_carries_json_content_type_and_shared_headers() {
        let config = config().with_bearer_token("t0k").unwrap();
        let endpoint = PutNote {
            id: "n1".to_string(),
            note: Note {
                additional_properties: Overflow::new(),
                text: "hi".to_string(),
            },
        };
        let req = build_request(&config, &endpoint).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.header("content-type"), Some(JSON_CONTENT_TYPE));
        assert_eq!(req.header("authorization"), Some("Bearer t0k"));
        assert!(req.header("user-agent").is_some());
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"text": "hi"}));
    }

    #[test]
    fn mapped_status_decodes_schema() {
        let parsed = parse_response::<GetNote>(&config(), response(200, r#"{"text":"x","pinned":true}"#)).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.header("X-Request-Id"), Some("r1"));
        match parsed.parsed {
            Some(NoteOutcome::Note(note)) => {
                assert_eq!(note.text, "x");
                assert_eq!(note.additional_properties["pinned"], json!(true));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn mapped_status_decodes_opaque_string() {
        let parsed = parse_response::<GetNote>(&config(), response(401, r#""bad token""#)).unwrap();
        assert_eq!(parsed.parsed, Some(NoteOutcome::Denied("bad token".to_string())));

        let plain = parse_response::<GetNote>(&config(), response(401, "bad token")).unwrap();
        assert_eq!(plain.parsed, Some(NoteOutcome::Denied("bad token".to_string())));
    }

    #[test]
    fn unmapped_status_yields_empty_envelope() {
        let parsed = parse_response::<GetNote>(&config(), response(404, "missing")).unwrap();
        assert_eq!(parsed.status_code, 404);
        assert_eq!(parsed.content, Bytes::from_static(b"missing"));
        assert!(parsed.parsed.is_none());
    }

    #[test]
    fn unmapped_status_raises_when_configured() {
        let config = config().with_raise_on_unexpected_status(true);
        let err = parse_response::<GetNote>(&config, response(404, "missing")).unwrap_err();
        match err {
            ApiError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, Bytes::from_static(b"missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_schema_error_not_empty_payload() {
        let err = parse_response::<GetNote>(&config(), response(200, "{oops")).unwrap_err();
        assert!(matches!(err, ApiError::Schema(_)));

        let err = parse_response::<GetNote>(&config(), response(200, r#"{"title":"no text"}"#)).unwrap_err();
        match err {
            ApiError::Schema(e) => assert_eq!(e.schema(), "Note"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_names_come_from_the_record() {
        assert_eq!(DecodeAs::record::<Note>(), DecodeAs::Schema("Note"));
        assert_eq!(DecodeAs::records::<Note>(), DecodeAs::List("Note"));

        let err = decode_body(DecodeAs::records::<Note>(), &Bytes::from_static(b"[{")).unwrap_err();
        assert_eq!(err.schema(), "Note[]");
        let list = decode_body(DecodeAs::records::<Note>(), &Bytes::from_static(br#"[{"text":"a"}]"#)).unwrap();
        assert_eq!(list.records::<Note>().unwrap()[0].text, "a");
    }

    #[test]
    fn raw_bytes_pass_through() {
        let body = decode_body(DecodeAs::RawBytes, &Bytes::from_static(b"\x00\x01")).unwrap();
        assert_eq!(body.bytes(), Bytes::from_static(b"\x00\x01"));
    }
}
