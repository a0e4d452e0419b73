//! Validation errors for model values.

/// A model value violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A CORS rule is malformed.
    #[error("invalid CORS rule: {0}")]
    InvalidCorsRule(String),

    /// A lifecycle rule is malformed.
    #[error("invalid lifecycle rule: {0}")]
    InvalidLifecycleRule(String),

    /// An HTTP method is not allowed in CORS rules.
    #[error("unsupported CORS method: {0}")]
    UnsupportedCorsMethod(String),
}
