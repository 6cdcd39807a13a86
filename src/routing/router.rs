//! Target resolution.
//!
//! # Responsibilities
//! - Pick the upstream origin for a request path
//! - Produce the path to forward, which is always the inbound path
//! - Normalize the inbound path once, before any decision is made
//!
//! # Design Decisions
//! - Pure function over immutable config (thread-safe without locks)
//! - Never fails: anything that isn't under the secondary prefix goes to the primary
//! - The secondary prefix is kept on the forwarded path, the secondary
//!   origin serves its content under it

use url::Url;

use crate::config::Upstreams;

/// One of the two configured origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Mounted at the namespace root.
    Primary,
    /// Mounted under the secondary prefix.
    Secondary,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Primary => "primary",
            Origin::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a single request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTarget<'a> {
    pub origin: Origin,
    pub upstream_base: &'a Url,
    pub forward_path: String,
}

/// `path` with `.` and `..` segments (plain or percent-encoded) resolved,
/// exactly as URL parsing resolves them when `base` is given this path.
///
/// Routing, forwarding and redirect rewriting all work on this one value.
pub fn normalize_path(path: &str, base: &Url) -> String {
    let mut url = base.clone();
    url.set_path(path);
    url.path().to_string()
}

/// Resolve the upstream for `path`.
///
/// `path` is expected to be normalized already (see [`normalize_path`]).
pub fn resolve<'a>(path: &str, upstreams: &'a Upstreams) -> RoutingTarget<'a> {
    let origin = if upstreams.secondary_prefix().matches(path) {
        Origin::Secondary
    } else {
        Origin::Primary
    };

    RoutingTarget {
        origin,
        upstream_base: upstreams.base_url(origin),
        forward_path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstreams() -> Upstreams {
        Upstreams::new(
            Url::parse("https://primary.example").unwrap(),
            Url::parse("https://secondary.example").unwrap(),
            "/painrelief",
        )
    }

    #[test]
    fn test_prefixed_paths_go_to_secondary_unmodified() {
        let up = upstreams();
        for path in ["/painrelief", "/painrelief/", "/painrelief/en/page", "/painreliefx"] {
            let target = resolve(path, &up);
            assert_eq!(target.origin, Origin::Secondary, "{path}");
            assert_eq!(target.upstream_base, up.secondary());
            assert_eq!(target.forward_path, path);
        }
    }

    #[test]
    fn test_other_paths_go_to_primary_unmodified() {
        let up = upstreams();
        for path in ["/", "/en", "/fr", "/en/page", "", "not-a-path", "/PAINRELIEF", "/x/painrelief"] {
            let target = resolve(path, &up);
            assert_eq!(target.origin, Origin::Primary, "{path}");
            assert_eq!(target.upstream_base, up.primary());
            assert_eq!(target.forward_path, path);
        }
    }

    #[test]
    fn test_normalize_path_resolves_dot_segments() {
        let base = Url::parse("https://primary.example").unwrap();
        assert_eq!(normalize_path("/painrelief/%2e%2e/en", &base), "/en");
        assert_eq!(normalize_path("/en/%2E%2e/painrelief/x", &base), "/painrelief/x");
        assert_eq!(normalize_path("/painrelief/../admin", &base), "/admin");
        assert_eq!(normalize_path("/painrelief/./en/.%2e/fr", &base), "/painrelief/fr");
        assert_eq!(normalize_path("/../../", &base), "/");
    }

    #[test]
    fn test_normalize_path_keeps_plain_paths() {
        let base = Url::parse("https://primary.example/site/").unwrap();
        for path in ["/", "/en", "/painrelief", "/painrelief/en/page%20two", "/a..b/c."] {
            assert_eq!(normalize_path(path, &base), path);
        }
    }

    #[test]
    fn test_decision_matches_normalized_path() {
        let up = upstreams();

        let path = normalize_path("/painrelief/%2e%2e/en", up.primary());
        let target = resolve(&path, &up);
        assert_eq!(target.origin, Origin::Primary);
        assert_eq!(target.forward_path, "/en");

        let path = normalize_path("/en/%2e%2e/painrelief/x", up.primary());
        let target = resolve(&path, &up);
        assert_eq!(target.origin, Origin::Secondary);
        assert_eq!(target.forward_path, "/painrelief/x");
    }
}
