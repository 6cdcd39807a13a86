//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Prefix under which the secondary upstream is mounted.
pub const DEFAULT_SECONDARY_PREFIX: &str = "/painrelief";

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The two upstream origins and the secondary mount prefix.
    pub upstreams: UpstreamConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream origins, as written in the config file or environment.
///
/// Values stay raw strings here; [`validate_config`](super::validation::validate_config)
/// turns them into [`Upstreams`](super::Upstreams).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin mounted at the namespace root.
    pub primary_url: Option<String>,

    /// Origin mounted under `secondary_prefix`.
    pub secondary_url: Option<String>,

    /// Path prefix selecting the secondary origin (case-sensitive).
    pub secondary_prefix: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primary_url: None,
            secondary_url: None,
            secondary_prefix: DEFAULT_SECONDARY_PREFIX.to_string(),
        }
    }
}

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "edge_router=info,tower_http=info".to_string(),
            log_format: LogFormat::Full,
        }
    }
}
