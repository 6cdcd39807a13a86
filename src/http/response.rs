//! Response handling and transformation.
//!
//! # Responsibilities
//! - Rewrite `Location` on upstream redirects into the public namespace
//! - Leave status, every other header, and the body stream untouched
//!
//! # Design Decisions
//! - Fail open: a `Location` that can't be read or rewritten is passed through
//! - Only 3xx responses are touched

use axum::body::Body;
use axum::http::header::{InvalidHeaderValue, ToStrError, LOCATION};
use axum::http::{HeaderValue, Response};
use thiserror::Error;

use crate::config::Upstreams;
use crate::routing::rewrite_location;

/// Why a `Location` header was passed through without rewriting.
#[derive(Debug, Error)]
pub enum RedirectRewriteError {
    #[error("Location header is not visible ASCII: {0}")]
    Unreadable(#[from] ToStrError),

    #[error("rewritten Location `{value}` is not a valid header value: {source}")]
    InvalidValue {
        value: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

/// Rewrite the `Location` header of a redirect response in place.
pub fn rewrite_redirect(response: &mut Response<Body>, request_path: &str, upstreams: &Upstreams) {
    if !response.status().is_redirection() {
        return;
    }
    let Some(location) = response.headers().get(LOCATION) else {
        return;
    };

    match rewritten_location(location, request_path, upstreams) {
        Ok(Some(value)) => {
            tracing::debug!(
                request_path = %request_path,
                from = ?location,
                to = ?value,
                "Rewrote redirect location"
            );
            response.headers_mut().insert(LOCATION, value);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(
                request_path = %request_path,
                error = %e,
                "Passing redirect location through unchanged"
            );
        }
    }
}

/// The replacement header value, or `None` when the location is already correct.
fn rewritten_location(
    location: &HeaderValue,
    request_path: &str,
    upstreams: &Upstreams,
) -> Result<Option<HeaderValue>, RedirectRewriteError> {
    let current = location.to_str()?;
    let rewritten = rewrite_location(current, request_path, upstreams);
    if rewritten == current {
        return Ok(None);
    }

    HeaderValue::from_str(&rewritten)
        .map(Some)
        .map_err(|source| RedirectRewriteError::InvalidValue {
            value: rewritten,
            source,
        })
}
