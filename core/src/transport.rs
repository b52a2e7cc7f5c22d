//! Transports: the only place a call touches the network.
//!
//! `Transport` blocks the calling thread, `AsyncTransport` suspends. Both take
//! a fully built `HttpRequest` and hand back the raw `HttpResponse`; status
//! interpretation belongs to the endpoint layer, so every status code (4xx
//! and 5xx included) is returned as data rather than as an error.

use bytes::Bytes;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[cfg(feature = "blocking")]
pub use self::blocking::UreqTransport;
#[cfg(feature = "async")]
pub use self::nonblocking::ReqwestTransport;

/// Executes a request on the calling thread.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Host-supplied I/O: any closure from request to response is a transport.
impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Executes a request, yielding at the network boundary.
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(feature = "blocking")]
mod blocking {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::HttpMethod;

    /// Blocking transport over a ureq agent.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new(config: &ClientConfig) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(config.timeout())
                .build()
                .new_agent();
            Self { agent }
        }

        pub fn from_agent(agent: ureq::Agent) -> Self {
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let url = request.full_url();
            let headers = request.headers;
            let response = match (request.method, request.body) {
                (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
                (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
                (HttpMethod::Post, Some(body)) => {
                    with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
                }
                (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
                (HttpMethod::Put, Some(body)) => {
                    with_headers(self.agent.put(&url), &headers).send(body.as_bytes())
                }
                (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
            };
            let mut response = response.map_err(TransportError::new)?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response.body_mut().read_to_vec().map_err(TransportError::new)?;

            Ok(HttpResponse {
                status,
                headers,
                body: Bytes::from(body),
            })
        }
    }

    fn with_headers<B>(
        builder: ureq::RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> ureq::RequestBuilder<B> {
        headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name.as_str(), value.as_str()))
    }
}

#[cfg(feature = "async")]
mod nonblocking {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http::HttpMethod;

    /// Async transport over a reqwest client.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }
            let http = builder
                .build()
                .map_err(|e| ApiError::Configuration(format!("failed to create HTTP client: {e}")))?;
            Ok(Self { http })
        }

        pub fn from_client(http: reqwest::Client) -> Self {
            Self { http }
        }
    }

    #[async_trait::async_trait]
    impl AsyncTransport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };
            let mut builder = self.http.request(method, request.full_url());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(TransportError::new)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response.bytes().await.map_err(TransportError::new)?;

            Ok(HttpResponse { status, headers, body })
        }
    }
}
