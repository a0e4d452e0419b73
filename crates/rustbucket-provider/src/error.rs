//! Error types for provider resolution.

/// Errors raised while constructing a provider profile or resolving endpoints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The vendor identifier is not in the vendor table.
    #[error("unknown vendor: {0}")]
    UnknownVendor(String),

    /// A mandatory parameter is missing or the endpoint template could not be resolved.
    #[error("invalid provider configuration: {0}")]
    InvalidConfiguration(String),

    /// The region is not valid for a vendor with a strict region policy.
    #[error("region {region:?} is not supported by {vendor}; valid regions: {valid}")]
    InvalidRegion {
        /// Vendor identifier.
        vendor: String,
        /// Requested region, empty when none was given.
        region: String,
        /// Comma-separated region codes the vendor accepts.
        valid: String,
    },

    /// The bucket name or object key cannot be placed in a URL.
    #[error("invalid object location: {0}")]
    InvalidLocation(String),
}
