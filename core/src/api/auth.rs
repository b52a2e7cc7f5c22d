//! Session login, registration and logout.
//!
//! A successful login or registration answers with `{"user": {...}}` and a
//! `session_token` cookie. The body is documented as opaque, so it is handed
//! back as a `SessionBody`; `session_token` reads the cookie off the
//! envelope. `GetSession` sends that cookie back to look up its user.

use bytes::Bytes;
use serde_json::Value;

use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::record::{json_kind, JsonObject, Record};
use crate::response::Response;
use crate::types::{LoginReq, RegisterReq, UserProfileResponse};

const SESSION_COOKIE: &str = "session_token";

/// Body of a login or registration response.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionBody(Bytes);

impl SessionBody {
    /// Decode the `user` object of the session payload.
    pub fn user(&self) -> Result<UserProfileResponse, SchemaError> {
        let value: Value = serde_json::from_slice(&self.0)
            .map_err(|e| SchemaError::new("Session", format!("malformed JSON: {e}")))?;
        match value {
            Value::Object(mut object) => match object.remove("user") {
                Some(user) => UserProfileResponse::from_value(user),
                None => Err(SchemaError::new("Session", "missing field `user`")),
            },
            other => Err(SchemaError::new(
                "Session",
                format!("expected an object, found {}", json_kind(&other)),
            )),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// The session token set by a login or registration response, if any.
pub fn session_token<T>(response: &Response<T>) -> Option<&str> {
    response
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("set-cookie"))
        .find_map(|(_, value)| {
            let pair = value.split(';').next()?.trim();
            let (name, token) = pair.split_once('=')?;
            (name == SESSION_COOKIE && !token.is_empty()).then_some(token)
        })
}

/// Outcome of `GET /auth/me`, by status code.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// 200: `{"user": {...}}` for the session cookie sent.
    Active(SessionBody),
    /// 401: no cookie was sent or the session expired.
    Unauthenticated(String),
}

/// `GET /auth/me`. The session travels as a `Cookie` header set on the
/// client config.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GetSession;

impl Endpoint for GetSession {
    type Output = SessionOutcome;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_session",
        method: HttpMethod::Get,
        path: "/auth/me",
        body_schema: None,
        responses: &[(200, DecodeAs::RawBytes), (401, DecodeAs::OpaqueString)],
    };

    fn decode(status: u16, body: ResponseBody) -> Result<SessionOutcome, SchemaError> {
        match status {
            200 => Ok(SessionOutcome::Active(SessionBody(body.bytes()))),
            _ => body.text().map(SessionOutcome::Unauthenticated),
        }
    }
}

/// `POST /auth/login`
#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub credentials: LoginReq,
}

impl Login {
    pub fn new(credentials: LoginReq) -> Self {
        Self { credentials }
    }
}

impl Endpoint for Login {
    type Output = SessionBody;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "login",
        method: HttpMethod::Post,
        path: "/auth/login",
        body_schema: Some(LoginReq::SCHEMA),
        responses: &[(200, DecodeAs::RawBytes)],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.credentials.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<SessionBody, SchemaError> {
        Ok(SessionBody(body.bytes()))
    }
}

/// `POST /auth/register`
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    pub registration: RegisterReq,
}

impl Register {
    pub fn new(registration: RegisterReq) -> Self {
        Self { registration }
    }
}

impl Endpoint for Register {
    type Output = SessionBody;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "register",
        method: HttpMethod::Post,
        path: "/auth/register",
        body_schema: Some(RegisterReq::SCHEMA),
        responses: &[(200, DecodeAs::RawBytes)],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.registration.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<SessionBody, SchemaError> {
        Ok(SessionBody(body.bytes()))
    }
}

/// `POST /auth/logout`: clears the session cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Logout;

impl Endpoint for Logout {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "logout",
        method: HttpMethod::Post,
        path: "/auth/logout",
        body_schema: None,
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}
