//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::ValidationError;

pub const PRIMARY_UPSTREAM_URL: &str = "PRIMARY_UPSTREAM_URL";
pub const SECONDARY_UPSTREAM_URL: &str = "SECONDARY_UPSTREAM_URL";
pub const SECONDARY_PREFIX: &str = "ROUTER_SECONDARY_PREFIX";
pub const BIND_ADDRESS: &str = "ROUTER_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from an optional TOML file, then apply environment overrides.
///
/// Without a file every field starts from its default.
pub fn load_config(path: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&content)?
        }
        None => RouterConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overlay values found through `lookup` onto the configuration.
pub fn apply_env_overrides<F>(config: &mut RouterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(PRIMARY_UPSTREAM_URL) {
        config.upstreams.primary_url = Some(url);
    }
    if let Some(url) = lookup(SECONDARY_UPSTREAM_URL) {
        config.upstreams.secondary_url = Some(url);
    }
    if let Some(prefix) = lookup(SECONDARY_PREFIX) {
        config.upstreams.secondary_prefix = prefix;
    }
    if let Some(addr) = lookup(BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
}
