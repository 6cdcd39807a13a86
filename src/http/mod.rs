//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, single catch-all handler)
//!     → routing::resolve (pick origin)
//!     → request.rs (build upstream URL, stream request to origin)
//!     → response.rs (rewrite redirect Location)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ProxyError;
pub use server::RouterServer;
