//! Alternate hosts and reverse URL matching.
//!
//! A URL pasted by a user may point at the primary endpoint or at one of the
//! vendor's other domains: a CDN, a public bucket domain, a friendly download
//! host. Each [`AlternateHost`] pairs a host pattern with the way bucket and
//! key are laid out under it.

use serde::Serialize;

use crate::codec::decode_key;

/// How a host is compared against a URL host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// The URL host equals the base, or is a subdomain of it.
    Exact(String),
    /// The URL host is exactly one extra label in front of `suffix`.
    Wildcard {
        /// Domain the wildcard label sits in front of.
        suffix: String,
    },
}

impl HostPattern {
    /// Returns the subdomain part of `host` in front of this pattern, or
    /// `None` if the host does not match. An exact or wildcard hit yields `""`.
    fn strip<'h>(&self, host: &'h str) -> Option<&'h str> {
        match self {
            Self::Exact(base) => {
                if host == base {
                    return Some("");
                }
                host.strip_suffix(base.as_str())?
                    .strip_suffix('.')
                    .filter(|prefix| !prefix.is_empty())
            }
            Self::Wildcard { suffix } => {
                let label = host.strip_suffix(suffix.as_str())?.strip_suffix('.')?;
                (!label.is_empty() && !label.contains('.')).then_some("")
            }
        }
    }
}

/// Where bucket and key live in a URL under a matched host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStyle {
    /// `bucket.host/key`.
    VirtualHosted,
    /// `host/bucket/key`.
    PathStyle,
    /// `host/<prefix>/bucket/key`.
    PathPrefix(String),
    /// `host/key`, the host serving a single known bucket.
    FixedBucket(String),
}

/// A host pattern plus its bucket/key layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateHost {
    /// Host pattern.
    pub pattern: HostPattern,
    /// Layout of bucket and key under the host.
    pub style: MatchStyle,
}

impl AlternateHost {
    /// An exact-host (or virtual-hosted subdomain) alternate.
    pub fn exact(host: impl Into<String>, style: MatchStyle) -> Self {
        Self {
            pattern: HostPattern::Exact(host.into().to_ascii_lowercase()),
            style,
        }
    }

    /// A single-label wildcard alternate (`*.suffix`).
    pub fn wildcard(suffix: impl Into<String>, style: MatchStyle) -> Self {
        Self {
            pattern: HostPattern::Wildcard {
                suffix: suffix.into().to_ascii_lowercase(),
            },
            style,
        }
    }

    /// Try to extract a bucket and key from a lower-cased host and a raw path.
    #[must_use]
    pub fn match_parts(&self, host: &str, path: &str) -> Option<ObjectLocation> {
        let subdomain = self.pattern.strip(host)?;
        let path = path.strip_prefix('/').unwrap_or(path);

        let (bucket, key) = match &self.style {
            MatchStyle::VirtualHosted => {
                if subdomain.is_empty() {
                    return None;
                }
                (subdomain, path)
            }
            _ if !subdomain.is_empty() => return None,
            MatchStyle::PathStyle => path.split_once('/')?,
            MatchStyle::PathPrefix(prefix) => path
                .strip_prefix(prefix.as_str())?
                .strip_prefix('/')?
                .split_once('/')?,
            MatchStyle::FixedBucket(bucket) => (bucket.as_str(), path),
        };

        let bucket = decode_key(bucket);
        let key = decode_key(key);
        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(ObjectLocation { bucket, key })
    }
}

/// A bucket and object key recovered from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLocation {
    /// Bucket name.
    pub bucket: String,
    /// Decoded object key.
    pub key: String,
}

/// Split a URL (scheme optional) into a lower-cased host and its path.
/// Query and fragment are dropped; a missing path becomes `/`.
pub(crate) fn split_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.is_empty() {
        return None;
    }
    Some((host.to_ascii_lowercase(), path.to_owned()))
}

/// Strip scheme and trailing slashes from a user-supplied host value.
pub(crate) fn normalize_host(value: &str) -> String {
    let value = value.trim();
    let value = value.split_once("://").map_or(value, |(_, rest)| rest);
    value.trim_end_matches('/').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_split_url_with_and_without_scheme() {
        assert_eq!(
            split_url("https://Bucket.S3.amazonaws.com/a/b.txt?x=1#frag"),
            Some(("bucket.s3.amazonaws.com".to_owned(), "/a/b.txt".to_owned()))
        );
        assert_eq!(
            split_url("cdn.example.com/photo.jpg"),
            Some(("cdn.example.com".to_owned(), "/photo.jpg".to_owned()))
        );
        assert_eq!(
            split_url("https://cdn.example.com"),
            Some(("cdn.example.com".to_owned(), "/".to_owned()))
        );
        assert_eq!(split_url("https:///key"), None);
    }

    #[test]
    fn test_should_match_virtual_hosted_subdomain() {
        let alt = AlternateHost::exact("s3.us-east-1.amazonaws.com", MatchStyle::VirtualHosted);
        let loc = alt
            .match_parts("my-bucket.s3.us-east-1.amazonaws.com", "/dir/file%20name.txt")
            .unwrap();
        assert_eq!(loc.bucket, "my-bucket");
        assert_eq!(loc.key, "dir/file name.txt");
        assert!(alt.match_parts("s3.us-east-1.amazonaws.com", "/b/k").is_none());
    }

    #[test]
    fn test_should_match_path_style_host() {
        let alt = AlternateHost::exact("s3.us-east-1.amazonaws.com", MatchStyle::PathStyle);
        let loc = alt
            .match_parts("s3.us-east-1.amazonaws.com", "/my-bucket/a/b.txt")
            .unwrap();
        assert_eq!(loc.bucket, "my-bucket");
        assert_eq!(loc.key, "a/b.txt");
        assert!(alt
            .match_parts("x.s3.us-east-1.amazonaws.com", "/my-bucket/a")
            .is_none());
    }

    #[test]
    fn test_should_require_bucket_and_key() {
        let alt = AlternateHost::exact("host.example", MatchStyle::PathStyle);
        assert!(alt.match_parts("host.example", "/bucket-only").is_none());
        assert!(alt.match_parts("host.example", "/bucket/").is_none());
        assert!(alt.match_parts("host.example", "/").is_none());
    }

    #[test]
    fn test_should_match_single_label_wildcard() {
        let alt = AlternateHost::wildcard(
            "backblazeb2.com",
            MatchStyle::PathPrefix("file".to_owned()),
        );
        let loc = alt
            .match_parts("f004.backblazeb2.com", "/file/photos/cat.jpg")
            .unwrap();
        assert_eq!(loc.bucket, "photos");
        assert_eq!(loc.key, "cat.jpg");
        assert!(alt
            .match_parts("s3.us-west-004.backblazeb2.com", "/file/photos/cat.jpg")
            .is_none());
        assert!(alt
            .match_parts("f004.backblazeb2.com", "/photos/cat.jpg")
            .is_none());
    }

    #[test]
    fn test_should_match_fixed_bucket_domain() {
        let alt = AlternateHost::exact(
            "cdn.example.com",
            MatchStyle::FixedBucket("assets".to_owned()),
        );
        let loc = alt.match_parts("cdn.example.com", "/img/logo.png").unwrap();
        assert_eq!(loc.bucket, "assets");
        assert_eq!(loc.key, "img/logo.png");
    }

    #[test]
    fn test_should_normalize_host_values() {
        assert_eq!(normalize_host("https://CDN.example.com/"), "cdn.example.com");
        assert_eq!(normalize_host("minio:9000"), "minio:9000");
    }
}
