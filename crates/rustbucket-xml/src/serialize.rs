//! Request bodies: CORS and lifecycle configurations and batch deletes.
//!
//! Bodies are written in the S3 namespace with an XML declaration, which
//! every supported vendor accepts.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use rustbucket_model::{
    CorsConfiguration, CorsRule, LifecycleConfiguration, LifecycleRule, Transition,
};

use crate::error::XmlError;

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Writes a value as child elements of the current XML element.
pub trait S3Serialize {
    /// Serialize this value into `writer`.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a complete document under `root_element`.
pub fn to_xml<T: S3Serialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element(root_element)
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v)?;
    }
    Ok(())
}

fn write_optional_u32<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<u32>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.to_string())?;
    }
    Ok(())
}

impl S3Serialize for CorsRule {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("CORSRule").write_inner_content(|w| {
            write_optional_text(w, "ID", self.id.as_deref())?;
            for h in &self.allowed_headers {
                write_text_element(w, "AllowedHeader", h)?;
            }
            for m in &self.allowed_methods {
                write_text_element(w, "AllowedMethod", m.as_str())?;
            }
            for o in &self.allowed_origins {
                write_text_element(w, "AllowedOrigin", o)?;
            }
            for h in &self.expose_headers {
                write_text_element(w, "ExposeHeader", h)?;
            }
            write_optional_u32(w, "MaxAgeSeconds", self.max_age_seconds)?;
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for CorsConfiguration {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for rule in &self.rules {
            rule.serialize_xml(writer)?;
        }
        Ok(())
    }
}

impl S3Serialize for Transition {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("Transition")
            .write_inner_content(|w| {
                write_optional_text(w, "Date", self.date.as_deref())?;
                write_optional_u32(w, "Days", self.days)?;
                write_text_element(w, "StorageClass", &self.storage_class)?;
                Ok(())
            })?;
        Ok(())
    }
}

impl S3Serialize for LifecycleRule {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Rule").write_inner_content(|w| {
            write_optional_text(w, "ID", self.id.as_deref())?;
            w.create_element("Filter").write_inner_content(|f| {
                write_text_element(f, "Prefix", &self.prefix)
            })?;
            write_text_element(w, "Status", self.status.as_str())?;

            let has_expiration = self.expiration_days.is_some()
                || self.expiration_date.is_some()
                || self.expired_object_delete_marker.is_some();
            if has_expiration {
                w.create_element("Expiration").write_inner_content(|e| {
                    write_optional_text(e, "Date", self.expiration_date.as_deref())?;
                    write_optional_u32(e, "Days", self.expiration_days)?;
                    if let Some(marker) = self.expired_object_delete_marker {
                        write_text_element(
                            e,
                            "ExpiredObjectDeleteMarker",
                            if marker { "true" } else { "false" },
                        )?;
                    }
                    Ok(())
                })?;
            }
            for transition in &self.transitions {
                transition.serialize_xml(w)?;
            }
            if let Some(days) = self.noncurrent_version_expiration_days {
                w.create_element("NoncurrentVersionExpiration")
                    .write_inner_content(|n| {
                        write_text_element(n, "NoncurrentDays", &days.to_string())
                    })?;
            }
            if let Some(days) = self.abort_incomplete_multipart_upload_days {
                w.create_element("AbortIncompleteMultipartUpload")
                    .write_inner_content(|a| {
                        write_text_element(a, "DaysAfterInitiation", &days.to_string())
                    })?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for LifecycleConfiguration {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for rule in &self.rules {
            rule.serialize_xml(writer)?;
        }
        Ok(())
    }
}

/// Body of a batch delete request.
#[derive(Debug, Clone, Copy)]
pub struct DeleteObjects<'a> {
    /// Keys to remove.
    pub keys: &'a [String],
    /// Ask the server to report failures only.
    pub quiet: bool,
}

impl S3Serialize for DeleteObjects<'_> {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if self.quiet {
            write_text_element(writer, "Quiet", "true")?;
        }
        for key in self.keys {
            writer
                .create_element("Object")
                .write_inner_content(|w| write_text_element(w, "Key", key))?;
        }
        Ok(())
    }
}

/// `<CORSConfiguration>` body for put-bucket-cors.
pub fn cors_to_xml(config: &CorsConfiguration) -> Result<Vec<u8>, XmlError> {
    to_xml("CORSConfiguration", config)
}

/// `<LifecycleConfiguration>` body for put-bucket-lifecycle.
pub fn lifecycle_to_xml(config: &LifecycleConfiguration) -> Result<Vec<u8>, XmlError> {
    to_xml("LifecycleConfiguration", config)
}

/// `<Delete>` body for a batch delete.
pub fn delete_to_xml(keys: &[String], quiet: bool) -> Result<Vec<u8>, XmlError> {
    to_xml("Delete", &DeleteObjects { keys, quiet })
}

#[cfg(test)]
mod tests {
    use rustbucket_model::{CorsMethod, LifecycleStatus};

    use super::*;
    use crate::extract;

    #[test]
    fn test_should_write_cors_configuration() {
        let config = CorsConfiguration {
            rules: vec![CorsRule {
                id: Some("web".to_owned()),
                allowed_methods: vec![CorsMethod::Get, CorsMethod::Head],
                allowed_origins: vec!["https://a.example.com".to_owned()],
                allowed_headers: vec!["*".to_owned()],
                expose_headers: vec!["ETag".to_owned()],
                max_age_seconds: Some(0),
            }],
        };
        let xml = String::from_utf8(cors_to_xml(&config).unwrap()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"<CORSConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">"#));
        assert!(xml.contains("<AllowedMethod>GET</AllowedMethod><AllowedMethod>HEAD</AllowedMethod>"));
        assert!(xml.contains("<MaxAgeSeconds>0</MaxAgeSeconds>"));
        assert_eq!(extract::cors_configuration(xml.as_bytes()).unwrap(), config);
    }

    #[test]
    fn test_should_omit_absent_max_age() {
        let config = CorsConfiguration {
            rules: vec![CorsRule {
                allowed_methods: vec![CorsMethod::Put],
                allowed_origins: vec!["*".to_owned()],
                ..CorsRule::default()
            }],
        };
        let xml = String::from_utf8(cors_to_xml(&config).unwrap()).unwrap();
        assert!(!xml.contains("MaxAgeSeconds"));
        assert!(!xml.contains("<ID>"));
    }

    #[test]
    fn test_should_write_lifecycle_configuration() {
        let config = LifecycleConfiguration {
            rules: vec![LifecycleRule {
                id: Some("logs".to_owned()),
                status: LifecycleStatus::Enabled,
                prefix: "logs/".to_owned(),
                expiration_days: Some(30),
                abort_incomplete_multipart_upload_days: Some(7),
                ..LifecycleRule::default()
            }],
        };
        let xml = String::from_utf8(lifecycle_to_xml(&config).unwrap()).unwrap();
        assert!(xml.contains("<Filter><Prefix>logs/</Prefix></Filter><Status>Enabled</Status>"));
        assert!(xml.contains("<Expiration><Days>30</Days></Expiration>"));
        assert!(xml.contains(
            "<AbortIncompleteMultipartUpload><DaysAfterInitiation>7</DaysAfterInitiation></AbortIncompleteMultipartUpload>"
        ));
        assert_eq!(extract::lifecycle_configuration(xml.as_bytes()).unwrap(), config);
    }

    #[test]
    fn test_should_write_delete_body_with_escaped_keys() {
        let keys = vec!["a.txt".to_owned(), "b & c.txt".to_owned()];
        let xml = String::from_utf8(delete_to_xml(&keys, true).unwrap()).unwrap();
        assert!(xml.contains(r#"<Delete xmlns="http://s3.amazonaws.com/doc/2006-03-01/"><Quiet>true</Quiet>"#));
        assert!(xml.contains("<Object><Key>a.txt</Key></Object>"));
        assert!(xml.contains("<Object><Key>b &amp; c.txt</Key></Object>"));
    }
}
