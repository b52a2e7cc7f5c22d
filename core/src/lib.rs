//! Typed client for the MaWi LLM-routing gateway API.
//!
//! # Overview
//! Builds `HttpRequest` values from typed endpoint parameters, runs them
//! through a transport and decodes the `HttpResponse` by status code into
//! typed records. Request building and response parsing never touch the
//! network, so hosts that do their own I/O can use them directly.
//!
//! # Design
//! - `types` holds one record per wire schema. Optional fields are
//!   `Field<T>`, keeping "absent" apart from "null", and unknown keys survive
//!   a decode/encode round trip in each record's overflow map.
//! - `api` holds one endpoint type per operation. Its descriptor is `const`
//!   data: method, path template, body schema and the status-to-decoder
//!   table.
//! - `GatewayClient` exposes four call variants (blocking or async, envelope
//!   or payload) that all share `endpoint::build_request` and
//!   `endpoint::parse_response`.
//! - Bundled transports sit behind the `blocking` (ureq) and `async`
//!   (reqwest) features.

pub mod record;

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod field;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use client::GatewayClient;
#[cfg(feature = "async")]
pub use client::AsyncClient;
#[cfg(feature = "blocking")]
pub use client::BlockingClient;
pub use config::ClientConfig;
pub use endpoint::{DecodeAs, Endpoint, EndpointDescriptor};
pub use error::{ApiError, SchemaError, TransportError};
pub use field::Field;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use record::Record;
pub use response::Response;
#[cfg(feature = "async")]
pub use transport::{AsyncTransport, ReqwestTransport};
pub use transport::Transport;
#[cfg(feature = "blocking")]
pub use transport::UreqTransport;
