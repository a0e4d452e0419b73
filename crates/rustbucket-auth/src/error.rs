//! Error types for request signing.

/// Errors that can occur while signing requests or checking presigned URLs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No usable credentials were found.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// A computed header value is not a valid HTTP header value.
    #[error("invalid header value for {0}")]
    InvalidHeaderValue(String),

    /// The presigned URL could not be parsed.
    #[error("invalid presigned URL: {0}")]
    InvalidPresignedUrl(String),

    /// A required presigned query parameter is missing.
    #[error("missing required query parameter: {0}")]
    MissingQueryParam(String),

    /// The signing algorithm is not `AWS4-HMAC-SHA256`.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The credential does not match `AKID/date/region/service/aws4_request`
    /// or names a different access key.
    #[error("invalid credential")]
    InvalidCredential,

    /// The computed signature does not match the provided signature.
    #[error("signature does not match")]
    SignatureDoesNotMatch,

    /// The presigned URL is past `X-Amz-Date` + `X-Amz-Expires`.
    #[error("request has expired")]
    RequestExpired,
}
