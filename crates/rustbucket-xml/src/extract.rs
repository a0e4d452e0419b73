//! Per-operation extractors from parsed XML into the normalized model.
//!
//! Every extractor accepts the payload either as the document root or one
//! level below it, reads collections through [`as_sequence`], and applies
//! explicit defaults for fields vendors omit.

use rustbucket_model::{
    BucketLocation, CopyObjectResult, CorsConfiguration, CorsMethod, CorsRule, DeleteError,
    DeleteResult, DeletedObject, LifecycleConfiguration, LifecycleRule, LifecycleStatus,
    ListBucketsOutput, ListObjectsOutput, MimeResolver, NormalizedBucket, NormalizedObject,
    Owner, PageCursor, Transition,
};
use tracing::{debug, warn};

use crate::error::XmlError;
use crate::tree::{XmlDocument, XmlValue, as_sequence, parse};

/// Parsed `<Error>` body of a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// S3 error code, e.g. `NoSuchKey`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Resource the error refers to.
    pub resource: Option<String>,
    /// Request id reported by the server.
    pub request_id: Option<String>,
}

fn text_or_default(value: &XmlValue, name: &str) -> String {
    value.child_text(name).unwrap_or_default().to_owned()
}

fn optional_text(value: &XmlValue, name: &str) -> Option<String> {
    value
        .child_text(name)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn parse_number<T: std::str::FromStr>(value: &XmlValue, name: &str) -> Result<Option<T>, XmlError>
where
    T::Err: std::fmt::Display,
{
    match value.child_text(name).map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|e| XmlError::InvalidText(format!("invalid {name} '{text}': {e}"))),
    }
}

fn parse_flag(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

/// Look for a pagination field on the payload, then anywhere in the document.
fn pagination_field<'a>(doc: &'a XmlDocument, body: &'a XmlValue, name: &str) -> Option<&'a str> {
    body.get(name)
        .or_else(|| doc.value.find(name))
        .map(XmlValue::text)
        .filter(|text| !text.is_empty())
}

/// Extract a list-buckets response.
pub fn list_buckets(xml: &[u8]) -> Result<ListBucketsOutput, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("ListAllMyBucketsResult");

    let buckets = as_sequence(body.get("Buckets").and_then(|b| b.get("Bucket")))
        .into_iter()
        .filter_map(|bucket| {
            let name = bucket.child_text("Name").unwrap_or_default();
            (!name.is_empty()).then(|| NormalizedBucket {
                name: name.to_owned(),
                creation_date: text_or_default(bucket, "CreationDate"),
            })
        })
        .collect::<Vec<_>>();

    let owner = body.get("Owner").map(|owner| Owner {
        id: text_or_default(owner, "ID"),
        display_name: text_or_default(owner, "DisplayName"),
    });

    let token = pagination_field(&doc, body, "ContinuationToken").map(str::to_owned);
    let truncated = pagination_field(&doc, body, "IsTruncated").is_some_and(parse_flag)
        || token.is_some();

    debug!(count = buckets.len(), truncated, "extracted bucket listing");
    Ok(ListBucketsOutput {
        buckets,
        owner,
        cursor: PageCursor::new(truncated, token),
    })
}

/// Extract a list-objects response, version 1 or 2.
///
/// The next-page token is `NextContinuationToken` (v2), then `NextMarker`
/// (v1). A truncated v1 listing without `NextMarker` continues after its
/// last key.
pub fn list_objects(
    xml: &[u8],
    resolver: &dyn MimeResolver,
) -> Result<ListObjectsOutput, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("ListBucketResult");

    let objects = as_sequence(body.get("Contents"))
        .into_iter()
        .filter_map(|item| {
            let key = item.child_text("Key").filter(|key| !key.is_empty())?;
            let size = item
                .child_text("Size")
                .and_then(|size| size.trim().parse().ok())
                .unwrap_or(0);
            Some(NormalizedObject::new(
                key,
                item.child_text("LastModified").unwrap_or_default(),
                item.child_text("ETag").unwrap_or_default(),
                size,
                item.child_text("StorageClass").unwrap_or_default(),
                resolver,
            ))
        })
        .collect::<Vec<_>>();

    let common_prefixes = as_sequence(body.get("CommonPrefixes"))
        .into_iter()
        .filter_map(|item| item.child_text("Prefix").filter(|p| !p.is_empty()))
        .map(str::to_owned)
        .collect::<Vec<_>>();

    let truncated = pagination_field(&doc, body, "IsTruncated").is_some_and(parse_flag);
    let is_v2 = body.get("KeyCount").is_some()
        || body.get("ContinuationToken").is_some()
        || body.get("StartAfter").is_some();
    let token = pagination_field(&doc, body, "NextContinuationToken")
        .or_else(|| pagination_field(&doc, body, "NextMarker"))
        .map(str::to_owned)
        .or_else(|| {
            (truncated && !is_v2)
                .then(|| objects.last().map(|o| o.key.clone()))
                .flatten()
        });

    let key_count = match parse_number::<usize>(body, "KeyCount")? {
        Some(count) => count,
        None => objects.len() + common_prefixes.len(),
    };

    debug!(
        objects = objects.len(),
        prefixes = common_prefixes.len(),
        truncated,
        "extracted object listing"
    );
    Ok(ListObjectsOutput {
        cursor: PageCursor::new(truncated, token),
        prefix: text_or_default(body, "Prefix"),
        delimiter: text_or_default(body, "Delimiter"),
        key_count,
        objects,
        common_prefixes,
    })
}

/// Extract a get-bucket-cors response. Unknown methods are skipped, and a
/// rule left with no method or no origin is dropped.
pub fn cors_configuration(xml: &[u8]) -> Result<CorsConfiguration, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("CORSConfiguration");

    let mut rules = Vec::new();
    for item in as_sequence(body.get("CORSRule")) {
        let texts = |name: &str| -> Vec<String> {
            as_sequence(item.get(name))
                .into_iter()
                .map(XmlValue::text)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
                .collect()
        };
        let allowed_methods: Vec<CorsMethod> = texts("AllowedMethod")
            .iter()
            .filter_map(|method| match method.parse::<CorsMethod>() {
                Ok(method) => Some(method),
                Err(e) => {
                    warn!(error = %e, "skipping CORS method");
                    None
                }
            })
            .collect();
        let allowed_origins = texts("AllowedOrigin");
        let id = optional_text(item, "ID");
        if allowed_methods.is_empty() || allowed_origins.is_empty() {
            warn!(id = ?id, "skipping CORS rule without a usable method or origin");
            continue;
        }

        rules.push(CorsRule {
            id,
            allowed_methods,
            allowed_origins,
            allowed_headers: texts("AllowedHeader"),
            expose_headers: texts("ExposeHeader"),
            max_age_seconds: parse_number(item, "MaxAgeSeconds")?,
        });
    }
    Ok(CorsConfiguration { rules })
}

/// Extract a get-bucket-lifecycle response.
pub fn lifecycle_configuration(xml: &[u8]) -> Result<LifecycleConfiguration, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("LifecycleConfiguration");

    let mut rules = Vec::new();
    for item in as_sequence(body.get("Rule")) {
        let prefix = item
            .child_text("Prefix")
            .or_else(|| item.get("Filter").and_then(|f| f.child_text("Prefix")))
            .or_else(|| {
                item.get("Filter")
                    .and_then(|f| f.get("And"))
                    .and_then(|and| and.child_text("Prefix"))
            })
            .unwrap_or_default()
            .to_owned();

        let expiration = item.get("Expiration");
        let transitions = as_sequence(item.get("Transition"))
            .into_iter()
            .map(|t| -> Result<Transition, XmlError> {
                Ok(Transition {
                    days: parse_number(t, "Days")?,
                    date: optional_text(t, "Date"),
                    storage_class: text_or_default(t, "StorageClass"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        rules.push(LifecycleRule {
            id: optional_text(item, "ID"),
            status: LifecycleStatus::from(item.child_text("Status").unwrap_or_default()),
            prefix,
            expiration_days: expiration.map(|e| parse_number(e, "Days")).transpose()?.flatten(),
            expiration_date: expiration.and_then(|e| optional_text(e, "Date")),
            expired_object_delete_marker: expiration
                .and_then(|e| e.child_text("ExpiredObjectDeleteMarker"))
                .map(parse_flag),
            transitions,
            noncurrent_version_expiration_days: item
                .get("NoncurrentVersionExpiration")
                .map(|n| parse_number(n, "NoncurrentDays"))
                .transpose()?
                .flatten(),
            abort_incomplete_multipart_upload_days: item
                .get("AbortIncompleteMultipartUpload")
                .map(|a| parse_number(a, "DaysAfterInitiation"))
                .transpose()?
                .flatten(),
        });
    }
    Ok(LifecycleConfiguration { rules })
}

/// Extract a copy-object response.
pub fn copy_object_result(xml: &[u8]) -> Result<CopyObjectResult, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("CopyObjectResult");
    Ok(CopyObjectResult {
        etag: rustbucket_model::object::normalize_etag(body.child_text("ETag").unwrap_or_default()),
        last_modified: text_or_default(body, "LastModified"),
    })
}

/// Extract a batch-delete response into removed and failed keys.
pub fn delete_result(xml: &[u8]) -> Result<DeleteResult, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("DeleteResult");

    let deleted = as_sequence(body.get("Deleted"))
        .into_iter()
        .map(|item| DeletedObject {
            key: text_or_default(item, "Key"),
            version_id: optional_text(item, "VersionId"),
        })
        .collect();
    let errors = as_sequence(body.get("Error"))
        .into_iter()
        .map(|item| DeleteError {
            key: text_or_default(item, "Key"),
            code: text_or_default(item, "Code"),
            message: text_or_default(item, "Message"),
            version_id: optional_text(item, "VersionId"),
        })
        .collect();

    Ok(DeleteResult { deleted, errors })
}

/// Extract a get-bucket-location response.
pub fn bucket_location(xml: &[u8]) -> Result<BucketLocation, XmlError> {
    let doc = parse(xml)?;
    let constraint = if doc.root == "LocationConstraint" {
        doc.value.text()
    } else {
        doc.value.child_text("LocationConstraint").unwrap_or_default()
    };
    Ok(BucketLocation::from_constraint(constraint))
}

/// Extract the `<Error>` envelope of a failed request.
///
/// # Errors
///
/// Returns [`XmlError::MissingElement`] when the body parses but carries no
/// error code.
pub fn error_envelope(xml: &[u8]) -> Result<ErrorEnvelope, XmlError> {
    let doc = parse(xml)?;
    let body = doc.body("Error");
    let code = body
        .child_text("Code")
        .filter(|code| !code.is_empty())
        .ok_or_else(|| XmlError::MissingElement("Error/Code".to_owned()))?;

    Ok(ErrorEnvelope {
        code: code.to_owned(),
        message: text_or_default(body, "Message"),
        resource: optional_text(body, "Resource"),
        request_id: optional_text(body, "RequestId"),
    })
}

#[cfg(test)]
mod tests {
    use rustbucket_model::{GuessMimeResolver, MimeCategory};

    use super::*;

    const LIST_V2_TWO: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>photos</Name>
  <Prefix>2024/</Prefix>
  <KeyCount>2</KeyCount>
  <MaxKeys>1000</MaxKeys>
  <Delimiter>/</Delimiter>
  <IsTruncated>true</IsTruncated>
  <NextContinuationToken>token-2</NextContinuationToken>
  <Contents>
    <Key>2024/cat.jpg</Key>
    <LastModified>2024-06-01T10:00:00.000Z</LastModified>
    <ETag>&quot;9b2cf535f27731c974343645a3985328&quot;</ETag>
    <Size>2048</Size>
    <StorageClass>STANDARD_IA</StorageClass>
  </Contents>
  <Contents>
    <Key>2024/notes.txt</Key>
    <LastModified>2024-06-02T10:00:00.000Z</LastModified>
    <ETag>"abc"</ETag>
    <Size>12</Size>
  </Contents>
  <CommonPrefixes><Prefix>2024/raw/</Prefix></CommonPrefixes>
</ListBucketResult>"#;

    #[test]
    fn test_should_extract_two_objects() {
        let output = list_objects(LIST_V2_TWO, &GuessMimeResolver).unwrap();
        assert_eq!(output.objects.len(), 2);
        assert_eq!(output.objects[0].etag, "9b2cf535f27731c974343645a3985328");
        assert_eq!(output.objects[0].storage_class, "STANDARD_IA");
        assert_eq!(output.objects[0].mime_category, MimeCategory::Image);
        assert_eq!(output.objects[1].storage_class, "STANDARD");
        assert_eq!(output.objects[1].filename, "notes.txt");
        assert_eq!(output.common_prefixes, vec!["2024/raw/".to_owned()]);
        assert_eq!(output.prefix, "2024/");
        assert_eq!(output.delimiter, "/");
        assert_eq!(output.key_count, 2);
        assert_eq!(output.cursor.continuation_token(), Some("token-2"));
    }

    #[test]
    fn test_should_extract_single_object_as_sequence() {
        let xml = br"<ListBucketResult><IsTruncated>false</IsTruncated>
            <Contents><Key>only.bin</Key></Contents></ListBucketResult>";
        let output = list_objects(xml, &GuessMimeResolver).unwrap();
        assert_eq!(output.objects.len(), 1);
        assert_eq!(output.objects[0].size, 0);
        assert_eq!(output.objects[0].etag, "");
        assert!(!output.cursor.is_truncated());
        assert_eq!(output.cursor.continuation_token(), None);
        assert_eq!(output.key_count, 1);
    }

    #[test]
    fn test_should_extract_empty_listing() {
        let xml = br#"<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/"><Name>b</Name><KeyCount>0</KeyCount><IsTruncated>false</IsTruncated></ListBucketResult>"#;
        let output = list_objects(xml, &GuessMimeResolver).unwrap();
        assert!(output.objects.is_empty());
        assert!(output.common_prefixes.is_empty());
        assert!(!output.cursor.has_next());
    }

    #[test]
    fn test_should_continue_v1_listing_after_last_key() {
        let xml = br"<ListBucketResult><Marker></Marker><IsTruncated>true</IsTruncated>
            <Contents><Key>a</Key></Contents><Contents><Key>b</Key></Contents></ListBucketResult>";
        let output = list_objects(xml, &GuessMimeResolver).unwrap();
        assert_eq!(output.cursor.continuation_token(), Some("b"));

        let xml = br"<ListBucketResult><IsTruncated>true</IsTruncated><NextMarker>m</NextMarker>
            <Contents><Key>a</Key></Contents></ListBucketResult>";
        let output = list_objects(xml, &GuessMimeResolver).unwrap();
        assert_eq!(output.cursor.continuation_token(), Some("m"));
    }

    #[test]
    fn test_should_find_truncation_in_wrapped_document() {
        let xml = br"<Response><ListBucketResult><Contents><Key>a</Key></Contents></ListBucketResult>
            <Paging><IsTruncated>true</IsTruncated><NextContinuationToken>t</NextContinuationToken></Paging></Response>";
        let output = list_objects(xml, &GuessMimeResolver).unwrap();
        assert_eq!(output.objects.len(), 1);
        assert!(output.cursor.has_next());
        assert_eq!(output.cursor.continuation_token(), Some("t"));
    }

    #[test]
    fn test_should_extract_buckets() {
        let xml = br#"<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <Owner><ID>owner-1</ID><DisplayName>alice</DisplayName></Owner>
            <Buckets>
              <Bucket><Name>alpha</Name><CreationDate>2024-01-01T00:00:00.000Z</CreationDate></Bucket>
              <Bucket><Name>beta</Name></Bucket>
            </Buckets></ListAllMyBucketsResult>"#;
        let output = list_buckets(xml).unwrap();
        assert_eq!(output.buckets.len(), 2);
        assert_eq!(output.buckets[1].name, "beta");
        assert_eq!(output.buckets[1].creation_date, "");
        assert_eq!(output.owner.unwrap().display_name, "alice");
        assert!(!output.cursor.is_truncated());

        let single = list_buckets(b"<ListAllMyBucketsResult><Buckets><Bucket><Name>solo</Name></Bucket></Buckets></ListAllMyBucketsResult>").unwrap();
        assert_eq!(single.buckets.len(), 1);
    }

    #[test]
    fn test_should_extract_cors_rules() {
        let xml = br#"<CORSConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <CORSRule>
              <ID>web</ID>
              <AllowedMethod>GET</AllowedMethod>
              <AllowedMethod>PUT</AllowedMethod>
              <AllowedOrigin>https://app.example.com</AllowedOrigin>
              <AllowedHeader>*</AllowedHeader>
              <MaxAgeSeconds>0</MaxAgeSeconds>
            </CORSRule>
            <CORSRule>
              <AllowedMethod>HEAD</AllowedMethod>
              <AllowedOrigin>*</AllowedOrigin>
            </CORSRule>
          </CORSConfiguration>"#;
        let config = cors_configuration(xml).unwrap();
        assert!(config.has_cors());
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].id.as_deref(), Some("web"));
        assert_eq!(config.rules[0].allowed_methods, vec![CorsMethod::Get, CorsMethod::Put]);
        assert_eq!(config.rules[0].max_age_seconds, Some(0));
        assert_eq!(config.rules[1].max_age_seconds, None);
        assert_eq!(config.rules[1].allowed_headers, Vec::<String>::new());
    }

    #[test]
    fn test_should_drop_cors_rules_without_known_methods() {
        let xml = br"<CORSConfiguration>
            <CORSRule>
              <ID>patch-only</ID>
              <AllowedMethod>PATCH</AllowedMethod>
              <AllowedOrigin>*</AllowedOrigin>
            </CORSRule>
            <CORSRule>
              <AllowedMethod>GET</AllowedMethod>
            </CORSRule>
          </CORSConfiguration>";
        let config = cors_configuration(xml).unwrap();
        assert!(config.rules.is_empty());
        assert!(!config.has_cors());

        let xml = br"<CORSConfiguration>
            <CORSRule>
              <AllowedMethod>PATCH</AllowedMethod>
              <AllowedOrigin>*</AllowedOrigin>
            </CORSRule>
            <CORSRule>
              <ID>read</ID>
              <AllowedMethod>PATCH</AllowedMethod>
              <AllowedMethod>GET</AllowedMethod>
              <AllowedOrigin>*</AllowedOrigin>
            </CORSRule>
          </CORSConfiguration>";
        let config = cors_configuration(xml).unwrap();
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].id.as_deref(), Some("read"));
        assert_eq!(config.rules[0].allowed_methods, vec![CorsMethod::Get]);
    }

    #[test]
    fn test_should_extract_lifecycle_rules() {
        let xml = br"<LifecycleConfiguration>
            <Rule>
              <ID>logs</ID>
              <Filter><Prefix>logs/</Prefix></Filter>
              <Status>Enabled</Status>
              <Expiration><Days>30</Days></Expiration>
              <Transition><Days>7</Days><StorageClass>GLACIER</StorageClass></Transition>
              <AbortIncompleteMultipartUpload><DaysAfterInitiation>3</DaysAfterInitiation></AbortIncompleteMultipartUpload>
            </Rule>
            <Rule>
              <Prefix>tmp/</Prefix>
              <Status>Disabled</Status>
              <NoncurrentVersionExpiration><NoncurrentDays>10</NoncurrentDays></NoncurrentVersionExpiration>
            </Rule>
          </LifecycleConfiguration>";
        let config = lifecycle_configuration(xml).unwrap();
        assert_eq!(config.rules.len(), 2);
        let logs = &config.rules[0];
        assert_eq!(logs.prefix, "logs/");
        assert_eq!(logs.expiration_days, Some(30));
        assert_eq!(logs.transitions[0].storage_class, "GLACIER");
        assert_eq!(logs.abort_incomplete_multipart_upload_days, Some(3));
        let tmp = &config.rules[1];
        assert_eq!(tmp.status, LifecycleStatus::Disabled);
        assert_eq!(tmp.prefix, "tmp/");
        assert_eq!(tmp.noncurrent_version_expiration_days, Some(10));
    }

    #[test]
    fn test_should_split_deleted_and_errors() {
        let xml = br#"<DeleteResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <Deleted><Key>a.txt</Key></Deleted>
            <Error><Key>b.txt</Key><Code>AccessDenied</Code><Message>Access Denied</Message></Error>
          </DeleteResult>"#;
        let result = delete_result(xml).unwrap();
        assert_eq!(result.success_count(), 1);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.deleted[0].key, "a.txt");
        assert_eq!(result.errors[0].key, "b.txt");
        assert_eq!(result.errors[0].code, "AccessDenied");
    }

    #[test]
    fn test_should_extract_copy_result_and_location() {
        let copy = copy_object_result(
            br#"<CopyObjectResult><LastModified>2025-01-01T00:00:00.000Z</LastModified><ETag>"e1"</ETag></CopyObjectResult>"#,
        )
        .unwrap();
        assert_eq!(copy.etag, "e1");
        assert_eq!(copy.last_modified, "2025-01-01T00:00:00.000Z");

        let us = bucket_location(br#"<LocationConstraint xmlns="http://s3.amazonaws.com/doc/2006-03-01/"/>"#)
            .unwrap();
        assert_eq!(us.region, "us-east-1");
        let eu = bucket_location(b"<LocationConstraint>EU</LocationConstraint>").unwrap();
        assert_eq!(eu.region, "eu-west-1");
    }

    #[test]
    fn test_should_extract_error_envelope() {
        let envelope = error_envelope(
            b"<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><Resource>/b/k</Resource><RequestId>r-1</RequestId></Error>",
        )
        .unwrap();
        assert_eq!(envelope.code, "NoSuchKey");
        assert_eq!(envelope.resource.as_deref(), Some("/b/k"));
        assert_eq!(envelope.request_id.as_deref(), Some("r-1"));

        let wrapped =
            error_envelope(b"<ErrorResponse><Error><Code>SlowDown</Code></Error></ErrorResponse>").unwrap();
        assert_eq!(wrapped.code, "SlowDown");
        assert!(error_envelope(b"<Error><Message>no code</Message></Error>").is_err());
    }

    #[test]
    fn test_should_fail_on_malformed_xml() {
        assert!(list_objects(b"<ListBucketResult><Contents>", &GuessMimeResolver).is_err());
        assert!(delete_result(b"<<>>").is_err());
    }
}
