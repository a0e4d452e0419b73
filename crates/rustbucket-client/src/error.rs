//! Unified client error taxonomy.

use rustbucket_auth::AuthError;
use rustbucket_model::ModelError;
use rustbucket_provider::ProviderError;
use rustbucket_xml::{ErrorEnvelope, XmlError};

use crate::transport::TransportError;

/// Errors returned by [`S3Client`](crate::S3Client) operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The vendor profile, region or credentials are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A call argument was rejected before any request was sent.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The transport could not complete the exchange.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The response body could not be read as the expected XML.
    #[error("malformed response: {0}")]
    WireFormat(#[from] XmlError),

    /// The server answered with an error.
    #[error("{code} ({status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// S3 error code, or the HTTP reason phrase when the body had none.
        code: String,
        /// Error message.
        message: String,
        /// Resource named in the error body.
        resource: Option<String>,
        /// Request id from the error body or `x-amz-request-id`.
        request_id: Option<String>,
    },

    /// The vendor does not offer this operation.
    #[error("{operation} is not supported by {vendor}")]
    UnsupportedOperation {
        /// Operation name.
        operation: &'static str,
        /// Vendor label.
        vendor: &'static str,
    },
}

impl ClientError {
    /// Build a [`ClientError::Remote`] from a parsed error body.
    #[must_use]
    pub fn remote(status: u16, envelope: ErrorEnvelope) -> Self {
        Self::Remote {
            status,
            code: envelope.code,
            message: envelope.message,
            resource: envelope.resource,
            request_id: envelope.request_id,
        }
    }

    /// HTTP status of a remote error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// S3 error code of a remote error.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidLocation(_) => Self::InvalidParameters(err.to_string()),
            _ => Self::InvalidConfiguration(err.to_string()),
        }
    }
}

impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials(_) => Self::InvalidConfiguration(err.to_string()),
            _ => Self::InvalidParameters(err.to_string()),
        }
    }
}

impl From<ModelError> for ClientError {
    fn from(err: ModelError) -> Self {
        Self::InvalidParameters(err.to_string())
    }
}
