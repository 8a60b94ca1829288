//! Error types for the request executor.
//!
//! # Design
//! Every failed exchange lands in exactly one `RequestError` variant so a
//! caller can tell a connect timeout from a refused connection from a broken
//! response body. Non-2xx statuses are not errors: they come back as an
//! `HttpResponse` carrying the server's error body.

use std::io;

/// Coarse classification of a `RequestError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Connection,
    Read,
}

/// Errors returned by `transport::send` and `RequestExecutor::try_execute`.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The connection was not established within the connect timeout.
    #[error("timed out connecting to {url}: {message}")]
    Timeout { url: String, message: String },

    /// No response was obtained: bad URL, DNS failure, refused connection,
    /// invalid header, or a failure while sending the request.
    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// The response head arrived but its body could not be read.
    #[error("reading response from {url} failed: {message}")]
    Read { url: String, message: String },
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::Timeout { .. } => ErrorKind::Timeout,
            RequestError::Connection { .. } => ErrorKind::Connection,
            RequestError::Read { .. } => ErrorKind::Read,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            RequestError::Timeout { url, .. }
            | RequestError::Connection { url, .. }
            | RequestError::Read { url, .. } => url,
        }
    }

    /// Classify an error raised before a response head was received.
    pub(crate) fn from_call(url: &str, err: ureq::Error) -> Self {
        let url = url.to_string();
        let message = err.to_string();
        match err {
            ureq::Error::Timeout(_) => RequestError::Timeout { url, message },
            ureq::Error::Io(ref e) if e.kind() == io::ErrorKind::TimedOut => {
                RequestError::Timeout { url, message }
            }
            _ => RequestError::Connection { url, message },
        }
    }

    pub(crate) fn from_read(url: &str, err: ureq::Error) -> Self {
        RequestError::Read {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
