//! HTTP request and response types described as plain data.
//!
//! # Design
//! A `RequestSpec` is an immutable description of one outgoing call. Turning
//! it into wire form (`PreparedRequest`) is a pure step, so header merging and
//! the `Content-Length` computation can be tested without a network. The
//! transport module executes a `PreparedRequest` and hands back an
//! `HttpResponse`, a fresh value per call with no state shared across calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent for this method.
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of GET, POST or DELETE.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Full description of one outgoing HTTP call.
///
/// `timeout_ms` bounds connection establishment only; `0` disables the
/// connect timeout. Header names are compared ASCII case-insensitively and
/// setting an existing name replaces its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub timeout_ms: u64,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Response header names to read back after the call.
    pub capture: Vec<String>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            timeout_ms: 0,
            headers: Vec::new(),
            body: None,
            capture: Vec::new(),
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: &str) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn delete(url: &str) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_capture(mut self, name: &str) -> Self {
        add_capture(&mut self.capture, name);
        self
    }

    /// Produce the wire form of this request.
    ///
    /// For a method that carries a payload, a body adds a `Content-Length`
    /// header equal to its UTF-8 byte length, replacing any caller value.
    /// A body on GET or DELETE is dropped.
    pub fn prepare(&self) -> PreparedRequest {
        let mut headers = self.headers.clone();
        let body = match &self.body {
            Some(body) if self.method.accepts_body() => {
                let bytes = body.as_bytes().to_vec();
                set_header(&mut headers, CONTENT_LENGTH, &bytes.len().to_string());
                Some(bytes)
            }
            Some(_) => {
                tracing::warn!(method = %self.method, url = %self.url, "request body ignored for method");
                None
            }
            None => None,
        };
        PreparedRequest {
            method: self.method,
            url: self.url.clone(),
            timeout_ms: self.timeout_ms,
            headers,
            body,
        }
    }
}

pub(crate) const CONTENT_LENGTH: &str = "Content-Length";

/// A request in the exact form it is written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub timeout_ms: u64,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Result of one completed HTTP exchange.
///
/// `body` is the decoded response text with line terminators removed.
/// `headers` holds one entry per header of interest, keyed by the lower-cased
/// name; the value is `None` when the response did not carry that header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Standard reason phrase for `status`, not the text the server sent.
    pub reason: Option<String>,
    pub headers: Vec<(String, Option<String>)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Concatenate the lines of `text`, dropping every `\r` and `\n`.
pub fn strip_line_terminators(text: &str) -> String {
    text.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

/// Insert or replace a header, matching names case-insensitively.
pub(crate) fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(entry) => entry.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

pub(crate) fn add_capture(capture: &mut Vec<String>, name: &str) {
    let name = name.to_ascii_lowercase();
    if !capture.contains(&name) {
        capture.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "PUT".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported HTTP method: PUT");
    }

    #[test]
    fn method_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HttpMethod::Delete).unwrap(), "\"DELETE\"");
    }

    #[test]
    fn with_header_overwrites_existing_name() {
        let spec = RequestSpec::get("http://localhost/")
            .with_header("Accept", "text/plain")
            .with_header("accept", "application/json");
        assert_eq!(
            spec.headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn prepare_without_body_sends_no_content_length() {
        let prepared = RequestSpec::get("http://localhost/todos/1").prepare();
        assert_eq!(prepared.method, HttpMethod::Get);
        assert!(prepared.body.is_none());
        assert!(prepared.header(CONTENT_LENGTH).is_none());
    }

    #[test]
    fn content_length_counts_utf8_bytes() {
        let prepared = RequestSpec::post("http://localhost/echo")
            .with_body("café")
            .prepare();
        assert_eq!(prepared.header("content-length"), Some("5"));
        assert_eq!(prepared.body.as_deref(), Some("café".as_bytes()));
    }

    #[test]
    fn content_length_replaces_caller_value() {
        let prepared = RequestSpec::post("http://localhost/echo")
            .with_header("content-length", "999")
            .with_body("abc")
            .prepare();
        let lengths: Vec<_> = prepared
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(CONTENT_LENGTH))
            .collect();
        assert_eq!(lengths.len(), 1);
        assert_eq!(prepared.header(CONTENT_LENGTH), Some("3"));
    }

    #[test]
    fn body_is_dropped_for_get_and_delete() {
        for spec in [
            RequestSpec::get("http://localhost/"),
            RequestSpec::delete("http://localhost/"),
        ] {
            let prepared = spec.with_body("ignored").prepare();
            assert!(prepared.body.is_none());
            assert!(prepared.header(CONTENT_LENGTH).is_none());
        }
    }

    #[test]
    fn capture_names_are_lowercased_and_deduplicated() {
        let spec = RequestSpec::get("http://localhost/")
            .with_capture("X-Request-Id")
            .with_capture("x-request-id");
        assert_eq!(spec.capture, vec!["x-request-id".to_string()]);
    }

    #[test]
    fn strip_line_terminators_concatenates_lines() {
        assert_eq!(strip_line_terminators("a\r\nb\nc\rd\n"), "abcd");
        assert_eq!(strip_line_terminators("single"), "single");
        assert_eq!(strip_line_terminators(""), "");
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 204,
            reason: Some("No Content".to_string()),
            headers: vec![
                ("x-echo-method".to_string(), Some("GET".to_string())),
                ("etag".to_string(), None),
            ],
            body: String::new(),
        };
        assert!(response.is_success());
        assert_eq!(response.header("X-Echo-Method"), Some("GET"));
        assert_eq!(response.header("etag"), None);
        assert_eq!(response.header("missing"), None);
    }
}
