//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PRIMARY_UPSTREAM_URL, SECONDARY_UPSTREAM_URL, ...)
//!     → validation.rs (semantic checks)
//!     → Upstreams (validated, immutable)
//!     → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod upstreams;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, RouterConfig, UpstreamConfig};
pub use upstreams::Upstreams;
pub use validation::{validate_config, ValidationError};
