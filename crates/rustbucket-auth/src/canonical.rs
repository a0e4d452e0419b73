//! Canonical request construction for AWS Signature Version 4.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! The canonical query string produced here is also the query string placed
//! on the wire, so what is signed is exactly what is sent.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved characters (`A-Z a-z 0-9 - _ . ~`).
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A canonical request. Every header given is signed.
///
/// Rendering with `Display` (or [`ToString`]) yields the exact text that is
/// hashed into the string to sign.
///
/// # Examples
///
/// ```
/// use rustbucket_auth::canonical::CanonicalRequest;
///
/// let canonical = CanonicalRequest::new("GET", "/test.txt", "")
///     .header("Host", "examplebucket.s3.amazonaws.com")
///     .payload_hash("UNSIGNED-PAYLOAD");
/// assert_eq!(canonical.signed_headers(), "host");
/// assert_eq!(
///     canonical.to_string(),
///     "GET\n/test.txt\n\nhost:examplebucket.s3.amazonaws.com\n\nhost\nUNSIGNED-PAYLOAD"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalRequest<'a> {
    method: &'a str,
    uri: String,
    query: &'a str,
    headers: Vec<(String, String)>,
    payload_hash: &'a str,
}

impl<'a> CanonicalRequest<'a> {
    /// Start a canonical request. `query` must already be canonical (see
    /// [`canonical_query_string`]); `path` may be encoded or not.
    #[must_use]
    pub fn new(method: &'a str, path: &str, query: &'a str) -> Self {
        Self {
            method,
            uri: canonical_uri(path),
            query,
            headers: Vec::new(),
            payload_hash: "",
        }
    }

    /// Add a signed header. Names are lowercased and values trimmed with
    /// inner whitespace runs squeezed to one space; a repeated name is
    /// joined with a comma.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
        match self.headers.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => {
                let at = self.headers.partition_point(|(n, _)| *n < name);
                self.headers.insert(at, (name, value));
            }
        }
        self
    }

    /// Set the hashed payload line (hex SHA-256 or `UNSIGNED-PAYLOAD`).
    #[must_use]
    pub fn payload_hash(mut self, hash: &'a str) -> Self {
        self.payload_hash = hash;
        self
    }

    /// Semicolon-separated, sorted names of the signed headers.
    #[must_use]
    pub fn signed_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl fmt::Display for CanonicalRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}:{value}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers())?;
        f.write_str(self.payload_hash)
    }
}

/// Canonical URI: each path segment decoded, then encoded on its own.
/// An already-encoded path comes out unchanged; an empty path becomes `/`.
///
/// ```
/// use rustbucket_auth::canonical::canonical_uri;
///
/// assert_eq!(canonical_uri("/my-bucket/my file.txt"), "/my-bucket/my%20file.txt");
/// assert_eq!(canonical_uri(""), "/");
/// ```
#[must_use]
pub fn canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_owned();
    }
    path.split('/')
        .map(|segment| uri_encode(&uri_decode(segment)))
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the canonical query string from decoded `(key, value)` pairs.
///
/// Keys and values are percent-encoded independently, then sorted by key and
/// by value for duplicate keys. Empty values keep their `=`.
///
/// # Examples
///
/// ```
/// use rustbucket_auth::canonical::canonical_query_string;
///
/// let params = vec![
///     ("prefix".to_owned(), "2024/".to_owned()),
///     ("list-type".to_owned(), "2".to_owned()),
///     ("delete".to_owned(), String::new()),
/// ];
/// assert_eq!(canonical_query_string(&params), "delete=&list-type=2&prefix=2024%2F");
/// ```
#[must_use]
pub fn canonical_query_string(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (uri_encode(k), uri_encode(v)))
        .collect();
    encoded.sort_unstable();

    let mut out = String::new();
    for (k, v) in encoded {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&k);
        out.push('=');
        out.push_str(&v);
    }
    out
}

/// Split a raw query string into decoded `(key, value)` pairs.
#[must_use]
pub fn parse_query_string(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| match param.split_once('=') {
            Some((k, v)) => (uri_decode(k), uri_decode(v)),
            None => (uri_decode(param), String::new()),
        })
        .collect()
}

/// Percent-encode with the SigV4 rules (`/` included).
#[must_use]
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

fn uri_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_should_keep_root_and_encoded_paths() {
        assert_eq!(canonical_uri("/"), "/");
        assert_eq!(canonical_uri("/photos/cat%20pic.jpg"), "/photos/cat%20pic.jpg");
        assert_eq!(canonical_uri("/photos/cat pic.jpg"), "/photos/cat%20pic.jpg");
        assert_eq!(canonical_uri("/x%7Ey"), "/x~y");
        assert_eq!(canonical_uri("/bucket/a+b"), "/bucket/a%2Bb");
    }

    #[test]
    fn test_should_encode_query_keys_and_values_independently() {
        let params = pairs(&[("response-content-disposition", "attachment; filename=\"a b.txt\"")]);
        assert_eq!(
            canonical_query_string(&params),
            "response-content-disposition=attachment%3B%20filename%3D%22a%20b.txt%22"
        );
    }

    #[test]
    fn test_should_produce_same_query_regardless_of_order() {
        let a = pairs(&[("max-keys", "10"), ("list-type", "2"), ("prefix", "x/y")]);
        let b = pairs(&[("prefix", "x/y"), ("list-type", "2"), ("max-keys", "10")]);
        assert_eq!(canonical_query_string(&a), canonical_query_string(&b));
        assert_eq!(canonical_query_string(&a), "list-type=2&max-keys=10&prefix=x%2Fy");
    }

    #[test]
    fn test_should_sort_duplicate_query_keys_by_value() {
        let params = pairs(&[("k", "b"), ("k", "a")]);
        assert_eq!(canonical_query_string(&params), "k=a&k=b");
    }

    #[test]
    fn test_should_keep_equals_for_empty_values() {
        assert_eq!(canonical_query_string(&pairs(&[("cors", "")])), "cors=");
        assert_eq!(canonical_query_string(&[]), "");
    }

    #[test]
    fn test_should_parse_query_string_into_decoded_pairs() {
        let parsed = parse_query_string("prefix=2024%2F&delete&x=a%20b");
        assert_eq!(
            parsed,
            pairs(&[("prefix", "2024/"), ("delete", ""), ("x", "a b")])
        );
        assert_eq!(canonical_query_string(&parsed), "delete=&prefix=2024%2F&x=a%20b");
    }

    #[test]
    fn test_should_sort_squeeze_and_join_headers() {
        let canonical = CanonicalRequest::new("PUT", "/k", "")
            .header("X-Amz-Meta-Tag", "b")
            .header("Host", "  bucket.example.com  ")
            .header("x-amz-meta-tag", "a    c")
            .payload_hash("UNSIGNED-PAYLOAD");
        assert_eq!(canonical.signed_headers(), "host;x-amz-meta-tag");
        assert_eq!(
            canonical.to_string(),
            "PUT\n/k\n\nhost:bucket.example.com\nx-amz-meta-tag:b,a c\n\nhost;x-amz-meta-tag\nUNSIGNED-PAYLOAD"
        );
    }

    #[test]
    fn test_should_match_published_get_object_example() {
        use sha2::{Digest, Sha256};

        let empty = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        let canonical = CanonicalRequest::new("GET", "/test.txt", "")
            .header("x-amz-date", "20130524T000000Z")
            .header("range", "bytes=0-9")
            .header("x-amz-content-sha256", empty)
            .header("host", "examplebucket.s3.amazonaws.com")
            .payload_hash(empty)
            .to_string();

        assert_eq!(
            canonical,
            format!(
                "GET\n/test.txt\n\nhost:examplebucket.s3.amazonaws.com\nrange:bytes=0-9\n\
                 x-amz-content-sha256:{empty}\nx-amz-date:20130524T000000Z\n\n\
                 host;range;x-amz-content-sha256;x-amz-date\n{empty}"
            )
        );
        assert_eq!(
            hex::encode(Sha256::digest(canonical.as_bytes())),
            "7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972"
        );
    }
}
