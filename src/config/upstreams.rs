//! Validated, immutable upstream configuration.

use url::Url;

use crate::routing::matcher::PathPrefixMatcher;
use crate::routing::Origin;

/// The two origins the router can dispatch to.
///
/// Built once at startup by [`validate_config`](super::validation::validate_config)
/// and shared read-only behind an `Arc` for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Upstreams {
    primary: Url,
    secondary: Url,
    secondary_prefix: PathPrefixMatcher,
    primary_authority: Option<String>,
    secondary_authority: Option<String>,
}

impl Upstreams {
    /// Assemble upstreams from already-validated URLs.
    ///
    /// Both URLs are expected to be absolute `http(s)` URLs with a host.
    pub fn new(primary: Url, secondary: Url, secondary_prefix: impl Into<String>) -> Self {
        let primary_authority = authority(&primary);
        let secondary_authority = authority(&secondary);
        Self {
            primary,
            secondary,
            secondary_prefix: PathPrefixMatcher::new(secondary_prefix),
            primary_authority,
            secondary_authority,
        }
    }

    pub fn primary(&self) -> &Url {
        &self.primary
    }

    pub fn secondary(&self) -> &Url {
        &self.secondary
    }

    pub fn secondary_prefix(&self) -> &PathPrefixMatcher {
        &self.secondary_prefix
    }

    /// Base URL for the given origin.
    pub fn base_url(&self, origin: Origin) -> &Url {
        match origin {
            Origin::Primary => &self.primary,
            Origin::Secondary => &self.secondary,
        }
    }

    /// Which configured origin, if any, serves the given URL's authority.
    ///
    /// The secondary is checked first, so identical authorities resolve
    /// to the secondary.
    pub fn origin_of(&self, url: &Url) -> Option<Origin> {
        let candidate = authority(url)?;
        if self.secondary_authority.as_deref() == Some(candidate.as_str()) {
            Some(Origin::Secondary)
        } else if self.primary_authority.as_deref() == Some(candidate.as_str()) {
            Some(Origin::Primary)
        } else {
            None
        }
    }
}

/// `host[:port]`, with the port omitted when it is the scheme default.
pub(crate) fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
