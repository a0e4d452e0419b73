//! Failures reading or writing S3 XML.

use std::io;

/// Errors raised by the XML layer.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// Writing a request body failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// An attribute could not be read.
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// An element the response must carry is absent.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// Start and end tags do not pair up.
    #[error("unbalanced document: {0}")]
    Unbalanced(String),

    /// Element text could not be decoded or converted.
    #[error("invalid text: {0}")]
    InvalidText(String),
}
