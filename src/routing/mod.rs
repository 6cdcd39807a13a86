//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (secondary prefix? → Origin + forward path)
//!     → matcher.rs (prefix evaluation)
//!
//! Upstream 3xx response
//!     → rewrite.rs (Location → public namespace)
//! ```
//!
//! # Design Decisions
//! - Both operations are pure functions over the validated `Upstreams`
//! - Deterministic: same input always resolves to the same origin
//! - No regex in hot path (prefix matching only)

pub mod matcher;
pub mod rewrite;
pub mod router;

pub use rewrite::{rewrite_location, LocationRef};
pub use router::{normalize_path, resolve, Origin, RoutingTarget};
