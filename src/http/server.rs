//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single routing handler
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Dispatch each request: resolve → forward → rewrite redirect

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::Upstreams;
use crate::http::request::{forward, upstream_client, UpstreamClient};
use crate::http::response::rewrite_redirect;
use crate::routing::{normalize_path, resolve};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstreams: Arc<Upstreams>,
    pub client: UpstreamClient,
}

/// HTTP server for the edge router.
pub struct RouterServer {
    router: Router,
    upstreams: Arc<Upstreams>,
}

impl RouterServer {
    /// Create a new server dispatching between the given upstreams.
    pub fn new(upstreams: Upstreams) -> Self {
        let upstreams = Arc::new(upstreams);

        let state = AppState {
            upstreams: upstreams.clone(),
            client: upstream_client(),
        };

        Self {
            router: Self::build_router(state),
            upstreams,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(route_request))
            .route("/", any(route_request))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            primary = %self.upstreams.primary(),
            secondary = %self.upstreams.secondary(),
            secondary_prefix = %self.upstreams.secondary_prefix().as_str(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main routing handler.
/// Resolves the origin, forwards the request, and rewrites redirects.
///
/// The path is normalized once up front; the same value picks the origin,
/// is sent upstream and anchors relative redirects.
async fn route_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = normalize_path(request.uri().path(), state.upstreams.primary());
    let method = request.method().clone();
    let target = resolve(&path, &state.upstreams);

    tracing::debug!(
        method = %method,
        path = %path,
        origin = %target.origin,
        "Routing request"
    );

    let mut response = match forward(&state.client, request, &target).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                method = %method,
                path = %path,
                origin = %target.origin,
                error = %e,
                "Upstream error"
            );
            return e.into_response();
        }
    };

    rewrite_redirect(&mut response, &path, &state.upstreams);
    response
}
