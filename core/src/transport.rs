//! Blocking execution of a single HTTP exchange.
//!
//! # Design
//! `send` is stateless: each call builds its own agent, so nothing (headers,
//! body, status, connections) carries over from one call to the next. The
//! agent and response are owned by the call and dropped on every exit path,
//! which closes the underlying connection.
//!
//! HTTP error statuses are returned as data, so for a 4xx/5xx response the
//! body read is the server's error body. Proxy settings from the environment
//! are not applied.

use std::time::Duration;

use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use crate::error::RequestError;
use crate::http::{
    strip_line_terminators, HttpMethod, HttpResponse, PreparedRequest, RequestSpec, CONTENT_LENGTH,
};

/// Perform one HTTP exchange described by `spec`.
pub fn send(spec: &RequestSpec) -> Result<HttpResponse, RequestError> {
    let prepared = spec.prepare();
    tracing::info!(method = %prepared.method, url = %prepared.url, "sending request");

    let agent = agent(prepared.timeout_ms);
    let mut response = match dispatch(&agent, &prepared) {
        Ok(response) => response,
        Err(err) => {
            let err = RequestError::from_call(&prepared.url, err);
            tracing::warn!(url = %prepared.url, error = %err, "request failed");
            return Err(err);
        }
    };

    let status = response.status();
    let reason = status.canonical_reason().map(str::to_string);
    tracing::debug!(status = status.as_u16(), reason = ?reason, "response status");

    let headers: Vec<(String, Option<String>)> = spec
        .capture
        .iter()
        .map(|name| {
            let value = response
                .headers()
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            (name.clone(), value)
        })
        .collect();

    let bytes = match response.body_mut().read_to_vec() {
        Ok(bytes) => bytes,
        Err(err) => {
            let err = RequestError::from_read(&prepared.url, err);
            tracing::warn!(url = %prepared.url, error = %err, "reading response failed");
            return Err(err);
        }
    };
    let body = strip_line_terminators(&String::from_utf8_lossy(&bytes));
    tracing::debug!(body = %body, "response body");

    Ok(HttpResponse {
        status: status.as_u16(),
        reason,
        headers,
        body,
    })
}

/// Like `send`, but every failure collapses into an empty string.
pub fn send_text(spec: &RequestSpec) -> String {
    send(spec).map(|response| response.body).unwrap_or_default()
}

fn agent(timeout_ms: u64) -> Agent {
    let connect_timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_connect(connect_timeout)
        .proxy(None)
        .build()
        .new_agent()
}

fn dispatch(agent: &Agent, req: &PreparedRequest) -> Result<Response<Body>, ureq::Error> {
    match req.method {
        HttpMethod::Get => with_headers(agent.get(req.url.as_str()), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(req.url.as_str()), &req.headers).call(),
        HttpMethod::Post => {
            let builder = with_headers(agent.post(req.url.as_str()), &req.headers);
            match &req.body {
                Some(body) => builder.send(body.as_slice()),
                None => builder.send_empty(),
            }
        }
    }
}

// ureq writes Content-Length itself from the body slice, which has the same
// byte length as the prepared header.
fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
