//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Upstream URLs must be absolute `http`/`https` URLs with a host
//! - The secondary prefix must be a usable path prefix
//! - The bind address must be a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<Upstreams, Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;
use crate::config::upstreams::Upstreams;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{name} is not set")]
    MissingUpstream { name: &'static str },

    #[error("{name} `{value}` is not a valid absolute URL: {reason}")]
    InvalidUpstream {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{name} `{value}` must use http or https")]
    UnsupportedScheme { name: &'static str, value: String },

    #[error("{name} `{value}` has no host")]
    MissingHost { name: &'static str, value: String },

    #[error("secondary prefix `{0}` must start with `/` and must not end with `/`")]
    InvalidPrefix(String),

    #[error("bind address `{0}` is not a socket address")]
    InvalidBindAddress(String),
}

/// Validate the configuration, producing the immutable upstream set.
pub fn validate_config(config: &RouterConfig) -> Result<Upstreams, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let primary = validate_upstream(
        "PRIMARY_UPSTREAM_URL",
        config.upstreams.primary_url.as_deref(),
    )
    .map_err(|e| errors.push(e))
    .ok();

    let secondary = validate_upstream(
        "SECONDARY_UPSTREAM_URL",
        config.upstreams.secondary_url.as_deref(),
    )
    .map_err(|e| errors.push(e))
    .ok();

    let prefix = &config.upstreams.secondary_prefix;
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::InvalidPrefix(prefix.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match (primary, secondary) {
        (Some(primary), Some(secondary)) if errors.is_empty() => {
            Ok(Upstreams::new(primary, secondary, prefix.clone()))
        }
        _ => Err(errors),
    }
}

fn validate_upstream(name: &'static str, value: Option<&str>) -> Result<Url, ValidationError> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(ValidationError::MissingUpstream { name }),
    };

    let url = Url::parse(value).map_err(|e| ValidationError::InvalidUpstream {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme {
            name,
            value: value.to_string(),
        });
    }

    if url.host_str().is_none() {
        return Err(ValidationError::MissingHost {
            name,
            value: value.to_string(),
        });
    }

    Ok(url)
}
