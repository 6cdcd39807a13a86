//! Edge request router library.
//!
//! Routes each request to one of two upstream origins by path prefix and
//! keeps upstream redirects inside the router's public namespace.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{RouterConfig, Upstreams};
pub use http::RouterServer;
pub use lifecycle::Shutdown;
