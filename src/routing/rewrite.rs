//! Redirect `Location` rewriting.
//!
//! Keeps redirects issued by either origin inside the router's public
//! namespace: the secondary origin lives under its prefix, the primary at
//! the root, anything else is left alone.

use url::{ParseError, Url};

use crate::config::Upstreams;
use crate::routing::Origin;

/// A `Location` value, classified by how it parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRef<'a> {
    /// Absolute URL with a scheme.
    Absolute(Url),
    /// Relative reference (`/contact`, `contact`, `//host/x`).
    Relative(&'a str),
    /// Looks absolute but doesn't parse.
    Malformed(&'a str),
}

impl<'a> LocationRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        match Url::parse(value) {
            Ok(url) => LocationRef::Absolute(url),
            Err(ParseError::RelativeUrlWithoutBase) => LocationRef::Relative(value),
            Err(_) => LocationRef::Malformed(value),
        }
    }
}

/// Rewrite a redirect target for a request that arrived on `request_path`.
///
/// Absolute URLs pointing at a configured origin become root-relative paths
/// (prefixed for the secondary). Relative values are prefixed only when the
/// request itself was under the secondary prefix. Everything else is
/// returned unchanged.
pub fn rewrite_location(location: &str, request_path: &str, upstreams: &Upstreams) -> String {
    let prefix = upstreams.secondary_prefix();

    match LocationRef::parse(location) {
        LocationRef::Absolute(url) => match upstreams.origin_of(&url) {
            Some(Origin::Secondary) => format!("{}{}", prefix.as_str(), path_and_query(&url)),
            Some(Origin::Primary) => path_and_query(&url),
            None => location.to_string(),
        },
        LocationRef::Relative(relative) => {
            if prefix.matches(request_path) && !prefix.matches(relative) {
                let sep = if relative.starts_with('/') { "" } else { "/" };
                format!("{}{}{}", prefix.as_str(), sep, relative)
            } else {
                relative.to_string()
            }
        }
        LocationRef::Malformed(value) => value.to_string(),
    }
}

/// Path plus `?query`, dropping an empty query and any fragment.
fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
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
    fn test_parse_classification() {
        assert!(matches!(
            LocationRef::parse("https://a.example/x"),
            LocationRef::Absolute(_)
        ));
        assert_eq!(LocationRef::parse("/contact"), LocationRef::Relative("/contact"));
        assert_eq!(LocationRef::parse("contact"), LocationRef::Relative("contact"));
        assert_eq!(
            LocationRef::parse("https://bad host/x"),
            LocationRef::Malformed("https://bad host/x")
        );
    }

    #[test]
    fn test_secondary_host_gets_prefix() {
        let up = upstreams();
        assert_eq!(
            rewrite_location("https://secondary.example/en/contact", "/painrelief/x", &up),
            "/painrelief/en/contact"
        );
        assert_eq!(
            rewrite_location("https://secondary.example/en?lang=en&x=1#top", "/", &up),
            "/painrelief/en?lang=en&x=1"
        );
    }

    #[test]
    fn test_primary_host_becomes_root_relative() {
        let up = upstreams();
        assert_eq!(rewrite_location("https://primary.example/fr", "/fr", &up), "/fr");
        assert_eq!(rewrite_location("https://primary.example", "/painrelief/en", &up), "/");
        assert_eq!(rewrite_location("http://primary.example/en?", "/", &up), "/en");
    }

    #[test]
    fn test_external_host_unchanged() {
        let up = upstreams();
        assert_eq!(
            rewrite_location("https://other.example/z", "/painrelief/x", &up),
            "https://other.example/z"
        );
        assert_eq!(
            rewrite_location("https://secondary.example:8443/z", "/painrelief/x", &up),
            "https://secondary.example:8443/z"
        );
    }

    #[test]
    fn test_relative_in_secondary_context() {
        let up = upstreams();
        assert_eq!(rewrite_location("/contact", "/painrelief/en", &up), "/painrelief/contact");
        assert_eq!(rewrite_location("contact", "/painrelief/en", &up), "/painrelief/contact");
        assert_eq!(
            rewrite_location("/contact?x=1", "/painrelief", &up),
            "/painrelief/contact?x=1"
        );
    }

    #[test]
    fn test_relative_already_prefixed() {
        let up = upstreams();
        assert_eq!(
            rewrite_location("/painrelief/contact", "/painrelief/en", &up),
            "/painrelief/contact"
        );
    }

    #[test]
    fn test_relative_in_primary_context_unchanged() {
        let up = upstreams();
        assert_eq!(rewrite_location("/contact", "/en", &up), "/contact");
        assert_eq!(rewrite_location("contact", "/", &up), "contact");
    }

    #[test]
    fn test_malformed_unchanged() {
        let up = upstreams();
        assert_eq!(
            rewrite_location("https://bad host/x", "/painrelief/en", &up),
            "https://bad host/x"
        );
        assert_eq!(rewrite_location("http://[::1/", "/painrelief", &up), "http://[::1/");
    }
}
