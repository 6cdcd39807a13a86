//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → tower_http TraceLayer spans (one per request)
//!
//! logging.rs installs the subscriber that writes them to stdout.
//! ```

pub mod logging;

pub use logging::init_logging;
