//! Request forwarding to the resolved upstream.
//!
//! # Responsibilities
//! - Build the upstream URI (origin scheme + authority, forward path, raw query)
//! - Replay method, headers and body against the upstream
//! - Hand the upstream response back as a streaming axum response
//!
//! # Design Decisions
//! - The query is copied from the inbound request byte for byte
//! - Bodies are streamed in both directions, never buffered
//! - Headers pass through untouched, `Host` included
//! - The client never follows redirects; 3xx responses come back as-is

use axum::body::Body;
use axum::http::{Request, Uri};
use axum::response::Response;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::upstreams::authority;
use crate::http::error::ProxyError;
use crate::routing::RoutingTarget;

/// Pooled HTTP/1.1 client speaking `http` and `https` to the origins.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the client shared by every request.
pub fn upstream_client() -> UpstreamClient {
    let connector = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();

    Client::builder(TokioExecutor::new()).build(connector)
}

/// Upstream URI for `target`, carrying the inbound query string unchanged.
pub fn upstream_uri(target: &RoutingTarget<'_>, query: Option<&str>) -> Result<Uri, ProxyError> {
    let base = target.upstream_base;
    let path_and_query = match query {
        Some(query) => format!("{}?{}", target.forward_path, query),
        None => target.forward_path.clone(),
    };

    Uri::builder()
        .scheme(base.scheme())
        .authority(authority(base).unwrap_or_default())
        .path_and_query(path_and_query)
        .build()
        .map_err(ProxyError::UpstreamUri)
}

/// Forward `request` to the upstream described by `target`.
pub async fn forward(
    client: &UpstreamClient,
    request: Request<Body>,
    target: &RoutingTarget<'_>,
) -> Result<Response<Body>, ProxyError> {
    let uri = upstream_uri(target, request.uri().query())?;
    let (mut parts, body) = request.into_parts();

    tracing::debug!(
        method = %parts.method,
        origin = %target.origin,
        upstream = %uri,
        "Forwarding request"
    );

    parts.uri = uri.clone();
    let upstream = client
        .request(Request::from_parts(parts, body))
        .await
        .map_err(|e| ProxyError::Upstream {
            uri: uri.to_string(),
            source: e.into(),
        })?;

    let (parts, body) = upstream.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}
