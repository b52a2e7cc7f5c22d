//! The response envelope returned by the detailed call variants.

use bytes::Bytes;

use crate::http::find_header;

/// Full result of one call: status, headers, raw body and the decoded
/// payload, if the status had a decode strategy.
///
/// `parsed` is `None` only when the status code is undocumented and the
/// client is not configured to raise on it. A payload that fails to decode
/// is an error, never a `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub content: Bytes,
    pub parsed: Option<T>,
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn into_parsed(self) -> Option<T> {
        self.parsed
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status_code: self.status_code,
            headers: self.headers,
            content: self.content,
            parsed: self.parsed.map(f),
        }
    }
}
