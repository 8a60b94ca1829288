//! Minimal blocking HTTP client for JSON/REST endpoints.
//!
//! # Overview
//! Issues one GET, POST or DELETE per call and returns the response body as
//! text with line terminators removed. Two layers are provided:
//! - `transport::send` takes an immutable `RequestSpec` and returns a fresh
//!   `HttpResponse` or a `RequestError` saying why the exchange failed.
//! - `RequestExecutor` keeps the "add headers, request, read status" pattern,
//!   returning an empty string on any failure.
//!
//! # Design
//! - No connection reuse, retries or streaming: every call opens and closes
//!   its own connection.
//! - `timeout_ms` bounds connection establishment only.
//! - Non-2xx statuses are data, not errors.

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use error::{ErrorKind, RequestError};
pub use executor::RequestExecutor;
pub use http::{HttpMethod, HttpResponse, PreparedRequest, RequestSpec};
pub use transport::{send, send_text};
