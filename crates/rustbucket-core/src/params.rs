//! Well-known keys for the provider parameter bag.
//!
//! Provider profiles carry a free-form `String -> String` map. The keys below
//! are the ones the resolver and the client understand; anything else is
//! stored but ignored.

/// Account identifier substituted into `{account_id}` (required by Cloudflare R2).
pub const ACCOUNT_ID: &str = "account_id";

/// Host (and optional port) of a generic S3-compatible endpoint, substituted into `{endpoint}`.
pub const ENDPOINT: &str = "endpoint";

/// Whether URLs use `https` (default) or `http`.
pub const USE_HTTPS: &str = "use_https";

/// Force path-style (`true`) or virtual-hosted (`false`) addressing regardless of the vendor default.
pub const PATH_STYLE: &str = "path_style";

/// Region placed in the credential scope instead of the addressing region.
pub const SIGNING_REGION: &str = "signing_region";

/// Use the legacy global `s3.amazonaws.com` host for `us-east-1` on AWS.
pub const USE_STANDARD_ENDPOINT: &str = "use_standard_endpoint";

/// Prefix for per-bucket CDN domains: `cdn_domain.<bucket> = cdn.example.com`.
pub const CDN_DOMAIN_PREFIX: &str = "cdn_domain.";

/// Prefix for per-bucket public-read domains: `public_domain.<bucket> = pub-xyz.r2.dev`.
pub const PUBLIC_DOMAIN_PREFIX: &str = "public_domain.";

/// Parse a parameter value as a boolean, accepting `"1"` and `"true"` (case-insensitive).
///
/// # Examples
///
/// ```
/// use rustbucket_core::params::parse_bool;
///
/// assert!(parse_bool("TRUE"));
/// assert!(!parse_bool("no"));
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
