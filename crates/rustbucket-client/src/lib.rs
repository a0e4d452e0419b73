//! S3-compatible storage client.
//!
//! [`S3Client`] resolves the vendor endpoint once, then for every operation
//! builds the request URL, signs it with SigV4, hands it to a [`Transport`]
//! and normalizes the XML answer into `rustbucket_model` types. Errors from
//! every layer are folded into [`ClientError`].
//!
//! The HTTP stack is pluggable. Enable the `reqwest` feature for
//! [`ReqwestTransport`], or implement [`Transport`] yourself.

pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{MAX_DELETE_KEYS, S3Client};
pub use error::ClientError;
pub use request::{GetObjectOutput, ListObjectsRequest, PutObjectOutput};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Transport, TransportError};
