//! The gateway client and its four call variants.
//!
//! # Design
//! `GatewayClient` holds a shared, read-only `ClientConfig` and a transport.
//! Each endpoint call is split in the same two halves everywhere:
//! `build` produces an `HttpRequest`, `parse` consumes an `HttpResponse`.
//! The call variants only differ in how the round trip in between runs:
//!
//! | variant | transport | returns |
//! |---|---|---|
//! | `call_detailed` | `Transport` | full `Response` envelope |
//! | `call` | `Transport` | parsed payload only |
//! | `call_detailed_async` | `AsyncTransport` | full `Response` envelope |
//! | `call_async` | `AsyncTransport` | parsed payload only |
//!
//! Hosts that do their own I/O can use `build` and `parse` directly.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::endpoint::{build_request, parse_response, Endpoint};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::response::Response;
#[cfg(feature = "async")]
use crate::transport::AsyncTransport;
use crate::transport::Transport;
#[cfg(feature = "async")]
use crate::transport::ReqwestTransport;
#[cfg(feature = "blocking")]
use crate::transport::UreqTransport;

/// Client over the bundled blocking transport.
#[cfg(feature = "blocking")]
pub type BlockingClient = GatewayClient<UreqTransport>;

/// Client over the bundled async transport.
#[cfg(feature = "async")]
pub type AsyncClient = GatewayClient<ReqwestTransport>;

/// Typed client for the gateway API.
#[derive(Debug, Clone)]
pub struct GatewayClient<T> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl<T> GatewayClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `endpoint` without sending it.
    pub fn build<E: Endpoint>(&self, endpoint: &E) -> Result<HttpRequest, ApiError> {
        build_request(&self.config, endpoint)
    }

    /// Decode a response received for endpoint `E`.
    pub fn parse<E: Endpoint>(&self, response: HttpResponse) -> Result<Response<E::Output>, ApiError> {
        parse_response::<E>(&self.config, response)
    }
}

impl<T: Clone> GatewayClient<T> {
    /// A new client sharing the transport, with `headers` added to (or
    /// replacing) the configured ones. `self` is left unchanged.
    pub fn with_headers<I, K, V>(&self, headers: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(self.with_config(self.config().clone().with_headers(headers)?))
    }

    /// A new client sharing the transport with a replaced configuration.
    ///
    /// The timeout of a bundled transport is fixed when the transport is
    /// created, so a changed timeout needs a new transport.
    pub fn with_config(&self, config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            transport: self.transport.clone(),
        }
    }
}

#[cfg(feature = "blocking")]
impl GatewayClient<UreqTransport> {
    pub fn blocking(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

#[cfg(feature = "async")]
impl GatewayClient<ReqwestTransport> {
    pub fn new_async(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> GatewayClient<T> {
    /// Execute `endpoint` on the calling thread and return the full envelope.
    #[instrument(skip_all, fields(operation = E::DESCRIPTOR.name))]
    pub fn call_detailed<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Output>, ApiError> {
        let request = self.build(endpoint)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        self.parse::<E>(response)
    }

    /// Execute `endpoint` on the calling thread and return only the payload.
    pub fn call<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>, ApiError> {
        self.call_detailed(endpoint).map(Response::into_parsed)
    }
}

#[cfg(feature = "async")]
impl<T: AsyncTransport> GatewayClient<T> {
    /// Async counterpart of `call_detailed`.
    #[instrument(skip_all, fields(operation = E::DESCRIPTOR.name))]
    pub async fn call_detailed_async<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Output>, ApiError> {
        let request = self.build(endpoint)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        self.parse::<E>(response)
    }

    /// Async counterpart of `call`.
    pub async fn call_async<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>, ApiError> {
        self.call_detailed_async(endpoint).await.map(Response::into_parsed)
    }
}
