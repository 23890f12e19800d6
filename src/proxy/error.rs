//! Error taxonomy for the forwarding path.
//!
//! Every failure is scoped to its own request: the handler converts the
//! error into a well-formed HTTP response and the serving process keeps
//! accepting connections.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A request-scoped forwarding failure.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The request target does not carry a scheme this proxy forwards.
    /// The origin is never contacted.
    #[error("unsupported protocol scheme {0:?}")]
    UnsupportedScheme(String),

    /// The outbound call to the origin failed (connect, DNS, TLS, protocol).
    #[error("origin request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The configured origin-call deadline elapsed.
    #[error("origin request timed out after {0:?}")]
    UpstreamTimeout(Duration),
}

impl ProxyError {
    /// The status code surfaced to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::UnsupportedScheme(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) | ProxyError::UpstreamTimeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            // Client error: the message names the offending scheme.
            ProxyError::UnsupportedScheme(_) => {
                tracing::warn!(error = %self, "rejecting request");
                (self.status(), format!("{}\n", self)).into_response()
            }
            // Origin errors: log the cause, hand the caller a generic body.
            ProxyError::Upstream(_) | ProxyError::UpstreamTimeout(_) => {
                tracing::error!(error = %self, "forwarding failed");
                (self.status(), "origin request failed\n").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_rejection_is_a_client_error() {
        let err = ProxyError::UnsupportedScheme("ftp".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "unsupported protocol scheme \"ftp\"");
    }

    #[test]
    fn timeouts_surface_as_server_errors() {
        let err = ProxyError::UpstreamTimeout(Duration::from_secs(5));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
