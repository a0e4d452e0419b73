//! Object key encoding and URL construction.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::ProviderError;
use crate::profile::{AddressingStyle, Endpoint};

/// Characters percent-encoded in object keys: everything except the
/// RFC 3986 unreserved set `[A-Za-z0-9_.~-]` and the `/` separator. Must
/// agree with the SigV4 canonical URI so the sent path is the signed path.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Encode an object key for use in a URL path.
///
/// Leading slashes are stripped and the key is percent-decoded first, so an
/// already-encoded key is not encoded twice. Returns an empty string when
/// the key contains a `..` segment or a NUL byte.
///
/// # Examples
///
/// ```
/// use rustbucket_provider::codec::encode_key;
///
/// assert_eq!(encode_key("/photos/cat pic.jpg"), "photos/cat%20pic.jpg");
/// assert_eq!(encode_key("photos/cat%20pic.jpg"), "photos/cat%20pic.jpg");
/// assert_eq!(encode_key("a/../etc/passwd"), "");
/// ```
#[must_use]
pub fn encode_key(key: &str) -> String {
    let decoded = percent_decode_str(key.trim_start_matches('/')).decode_utf8_lossy();
    let decoded = decoded.trim_start_matches('/');
    if decoded.contains('\0') || decoded.split('/').any(|segment| segment == "..") {
        return String::new();
    }
    utf8_percent_encode(decoded, KEY_ENCODE_SET).to_string()
}

/// Percent-decode a key or path fragment, replacing invalid UTF-8 sequences.
#[must_use]
pub fn decode_key(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// Host and path a request for a bucket/key is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// `http` or `https`.
    pub scheme: &'static str,
    /// Host header value.
    pub host: String,
    /// Encoded path, always starting with `/`. Also the canonical URI.
    pub path: String,
}

impl RequestTarget {
    /// Full URL with an optional already-encoded query string.
    ///
    /// The root path is omitted so bucket and service URLs carry no
    /// trailing slash.
    #[must_use]
    pub fn url(&self, query: &str) -> String {
        let mut url = format!("{}://{}", self.scheme, self.host);
        if self.path != "/" {
            url.push_str(&self.path);
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

/// Compute the request target for `bucket`/`key` on `endpoint`.
///
/// An empty bucket addresses the service root; an empty key addresses the
/// bucket itself.
pub fn request_target(
    endpoint: &Endpoint,
    bucket: &str,
    key: &str,
    style: AddressingStyle,
) -> Result<RequestTarget, ProviderError> {
    if bucket.contains(['/', '?', '#']) || bucket.chars().any(char::is_whitespace) {
        return Err(ProviderError::InvalidLocation(format!(
            "invalid bucket name: {bucket:?}"
        )));
    }

    let encoded = if key.is_empty() {
        String::new()
    } else {
        let encoded = encode_key(key);
        if encoded.is_empty() {
            return Err(ProviderError::InvalidLocation(format!(
                "rejected object key: {key:?}"
            )));
        }
        encoded
    };

    if bucket.is_empty() {
        if !encoded.is_empty() {
            return Err(ProviderError::InvalidLocation(
                "object key given without a bucket".to_owned(),
            ));
        }
        return Ok(RequestTarget {
            scheme: endpoint.scheme.as_str(),
            host: endpoint.host.clone(),
            path: "/".to_owned(),
        });
    }

    let (host, path) = match style {
        AddressingStyle::PathStyle if encoded.is_empty() => {
            (endpoint.host.clone(), format!("/{bucket}"))
        }
        AddressingStyle::PathStyle => (endpoint.host.clone(), format!("/{bucket}/{encoded}")),
        AddressingStyle::VirtualHosted => (format!("{bucket}.{}", endpoint.host), format!("/{encoded}")),
    };

    Ok(RequestTarget {
        scheme: endpoint.scheme.as_str(),
        host,
        path,
    })
}

/// Build the public URL of `bucket`/`object` on `endpoint` in the given style.
///
/// ```
/// use rustbucket_provider::{AddressingStyle, ProviderProfile, Vendor};
/// use rustbucket_provider::codec::build_url;
///
/// let profile = ProviderProfile::builder(Vendor::Aws).build().unwrap();
/// let endpoint = profile.resolve("eu-west-1").unwrap();
/// assert_eq!(
///     build_url(&endpoint, "my-bucket", "a b.txt", AddressingStyle::VirtualHosted).unwrap(),
///     "https://my-bucket.s3.eu-west-1.amazonaws.com/a%20b.txt"
/// );
/// ```
pub fn build_url(
    endpoint: &Endpoint,
    bucket: &str,
    object: &str,
    style: AddressingStyle,
) -> Result<String, ProviderError> {
    Ok(request_target(endpoint, bucket, object, style)?.url(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Scheme;

    fn endpoint(path_style: bool) -> Endpoint {
        Endpoint {
            host: "s3.us-east-1.amazonaws.com".to_owned(),
            path_style,
            region: "us-east-1".to_owned(),
            signing_region: "us-east-1".to_owned(),
            scheme: Scheme::Https,
        }
    }

    #[test]
    fn test_should_encode_reserved_characters() {
        assert_eq!(encode_key("a+b=c&d"), "a%2Bb%3Dc%26d");
        assert_eq!(encode_key("dir/sub dir/x~y.txt"), "dir/sub%20dir/x~y.txt");
        assert_eq!(encode_key("dir/x%7Ey.txt"), "dir/x~y.txt");
        assert_eq!(encode_key("über.txt"), "%C3%BCber.txt");
    }

    #[test]
    fn test_should_strip_leading_slashes() {
        assert_eq!(encode_key("///a/b"), "a/b");
        assert_eq!(encode_key("%2Fa"), "a");
    }

    #[test]
    fn test_should_reject_traversal_and_nul() {
        assert_eq!(encode_key(".."), "");
        assert_eq!(encode_key("a/../b"), "");
        assert_eq!(encode_key("a/%2E%2E/b"), "");
        assert_eq!(encode_key("a%00b"), "");
        assert_eq!(encode_key("a/..b/c"), "a/..b/c");
    }

    #[test]
    fn test_should_be_idempotent_through_decode() {
        for key in [
            "plain.txt",
            "dir/with space/file (1).jpg",
            "unicode/日本語.txt",
            "symbols/a+b&c=d?e#f",
            "already%20encoded",
        ] {
            let once = encode_key(key);
            assert_eq!(encode_key(&decode_key(&once)), once, "key {key}");
        }
    }

    #[test]
    fn test_should_build_path_style_urls() {
        let ep = endpoint(true);
        assert_eq!(
            build_url(&ep, "bucket", "a/b.txt", AddressingStyle::PathStyle).unwrap(),
            "https://s3.us-east-1.amazonaws.com/bucket/a/b.txt"
        );
        assert_eq!(
            build_url(&ep, "bucket", "", AddressingStyle::PathStyle).unwrap(),
            "https://s3.us-east-1.amazonaws.com/bucket"
        );
    }

    #[test]
    fn test_should_build_virtual_hosted_urls() {
        let ep = endpoint(false);
        assert_eq!(
            build_url(&ep, "bucket", "a/b.txt", AddressingStyle::VirtualHosted).unwrap(),
            "https://bucket.s3.us-east-1.amazonaws.com/a/b.txt"
        );
        assert_eq!(
            build_url(&ep, "bucket", "", AddressingStyle::VirtualHosted).unwrap(),
            "https://bucket.s3.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn test_should_reject_traversal_key_in_url() {
        let ep = endpoint(true);
        assert!(matches!(
            build_url(&ep, "bucket", "../secret", AddressingStyle::PathStyle),
            Err(ProviderError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_should_target_service_root_without_bucket() {
        let target = request_target(&endpoint(false), "", "", AddressingStyle::VirtualHosted).unwrap();
        assert_eq!(target.host, "s3.us-east-1.amazonaws.com");
        assert_eq!(target.path, "/");
        assert_eq!(target.url("x-id=1"), "https://s3.us-east-1.amazonaws.com?x-id=1");
        assert!(request_target(&endpoint(true), "", "key", AddressingStyle::PathStyle).is_err());
    }
}
