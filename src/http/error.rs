//! Proxy error type and its mapping to client responses.

use std::error::Error as StdError;
use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors that end a proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream could not be reached or the exchange failed mid-flight.
    #[error("upstream request to {uri} failed: {source}")]
    Upstream {
        uri: String,
        #[source]
        source: BoxError,
    },

    /// The upstream URI could not be assembled from the configured origin.
    #[error("invalid upstream uri: {0}")]
    UpstreamUri(#[source] axum::http::Error),
}

impl ProxyError {
    /// Status code reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { source, .. } if timed_out(&**source) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::UpstreamUri(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::GATEWAY_TIMEOUT => "Upstream request timed out",
            StatusCode::BAD_GATEWAY => "Upstream request failed",
            _ => "Internal proxy error",
        };
        (status, body).into_response()
    }
}

/// True if any error in the source chain is an I/O timeout.
fn timed_out(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<io::Error>() {
            if io.kind() == io::ErrorKind::TimedOut {
                return true;
            }
        }
        current = err.source();
    }
    false
}
