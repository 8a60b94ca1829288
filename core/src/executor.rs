//! Stateful convenience wrapper around `transport::send`.
//!
//! # Design
//! `RequestExecutor` keeps the familiar "add headers, then request, then read
//! the status" calling pattern. Pending headers and body are moved into an
//! immutable `RequestSpec` at the start of every call, so they are consumed
//! whether or not the call succeeds and can never leak into a later request.
//! The last-response state is reset before each call and is only populated
//! from a completed exchange.
//!
//! An executor is not meant to be shared between threads; use one instance per
//! in-flight request.

use crate::error::RequestError;
use crate::http::{add_capture, set_header, HttpMethod, HttpResponse, RequestSpec};
use crate::transport;

#[derive(Debug, Default)]
pub struct RequestExecutor {
    pending_headers: Vec<(String, String)>,
    pending_body: Option<String>,
    interests: Vec<String>,
    status: u16,
    last_response: String,
    header_values: Vec<(String, Option<String>)>,
}

impl RequestExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a header for the next request only.
    pub fn add_header(&mut self, key: &str, value: &str) {
        set_header(&mut self.pending_headers, key, value);
    }

    /// Set the body for the next request only.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.pending_body = Some(body.into());
    }

    /// Declare a response header to capture on every subsequent request.
    pub fn register_response_header(&mut self, key: &str) {
        add_capture(&mut self.interests, key);
    }

    /// Value of a registered response header from the last request, if the
    /// response carried it.
    pub fn response_header_value(&self, key: &str) -> Option<&str> {
        self.header_values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn clear_response_headers(&mut self) {
        self.interests.clear();
        self.header_values.clear();
    }

    /// Status code of the last completed request, or 0 if it failed.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn last_response(&self) -> &str {
        &self.last_response
    }

    /// Send a request built from the pending body, returning the response
    /// text or an empty string on failure.
    pub fn request(&mut self, method: HttpMethod, url: &str, timeout_ms: u64) -> String {
        let spec = RequestSpec::new(method, url).with_timeout_ms(timeout_ms);
        self.execute(spec)
    }

    /// Execute `spec` merged with the pending headers and body. Any failure
    /// yields an empty string; use `try_execute` to see why.
    pub fn execute(&mut self, spec: RequestSpec) -> String {
        match self.try_execute(spec) {
            Ok(response) => response.body,
            Err(_) => String::new(),
        }
    }

    /// Execute `spec` merged with the pending headers and body.
    ///
    /// Headers set on `spec` win over pending ones with the same name, and a
    /// body on `spec` wins over the pending body.
    pub fn try_execute(&mut self, spec: RequestSpec) -> Result<HttpResponse, RequestError> {
        let spec = self.take_pending(spec);
        self.reset_response();

        let response = transport::send(&spec)?;
        self.status = response.status;
        self.last_response = response.body.clone();
        self.header_values = response.headers.clone();
        Ok(response)
    }

    fn take_pending(&mut self, spec: RequestSpec) -> RequestSpec {
        let mut headers = std::mem::take(&mut self.pending_headers);
        for (name, value) in &spec.headers {
            set_header(&mut headers, name, value);
        }
        let mut capture = spec.capture;
        for name in &self.interests {
            add_capture(&mut capture, name);
        }
        let body = spec.body.or_else(|| self.pending_body.take());
        self.pending_body = None;

        RequestSpec {
            headers,
            body,
            capture,
            ..spec
        }
    }

    fn reset_response(&mut self) {
        self.status = 0;
        self.last_response.clear();
        self.header_values = self
            .interests
            .iter()
            .map(|name| (name.clone(), None))
            .collect();
    }
}
