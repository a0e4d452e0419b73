//! XML layer of rustbucket.
//!
//! Responses are parsed into a namespace-free [`XmlValue`] tree and then read
//! by per-operation extractors into `rustbucket-model` types. Request bodies
//! (CORS, lifecycle, batch delete) are written with quick-xml.
//!
//! # S3 XML conventions
//!
//! - Namespace: `http://s3.amazonaws.com/doc/2006-03-01/`
//! - Booleans: lowercase `true`/`false`
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

pub mod error;
pub mod extract;
pub mod serialize;
pub mod tree;

pub use error::XmlError;
pub use extract::ErrorEnvelope;
pub use serialize::{S3_NAMESPACE, S3Serialize, cors_to_xml, delete_to_xml, lifecycle_to_xml, to_xml};
pub use tree::{XmlDocument, XmlElement, XmlValue, as_sequence, parse};
