//! I/O boundary traits for testability
//!
//! The booking service is reached only through [`Transport`], allowing
//! services to be tested with a recording fake instead of a live host.

use std::fmt;

use thiserror::Error;

/// HTTP verbs used against the booking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
        };
        f.write_str(name)
    }
}

/// Transport-level failures. Every variant is fatal for the invocation.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid url {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{method} {path} failed: {source}")]
    Network {
        method: HttpMethod,
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{method} {path} returned HTTP {status}")]
    Status {
        method: HttpMethod,
        path: String,
        status: u16,
        body: String,
    },
}

impl TransportError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Authenticated request/response round trip against the configured host.
pub trait Transport: Send + Sync {
    /// Send `method` to `path` (relative to the API root) with an optional
    /// JSON body. Returns the response body on 2xx.
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, TransportError>;
}
