//! Objects, buckets and object metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::media::{MimeCategory, MimeResolver};

/// Storage class reported when a listing omits it.
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD";

/// Prefix of user metadata headers.
const USER_METADATA_PREFIX: &str = "x-amz-meta-";

/// Strip the surrounding quotes (plain or XML-escaped) from an ETag.
///
/// ```
/// use rustbucket_model::object::normalize_etag;
///
/// assert_eq!(normalize_etag("\"d41d8cd98f00b204e9800998ecf8427e\""), "d41d8cd98f00b204e9800998ecf8427e");
/// assert_eq!(normalize_etag("&quot;abc&quot;"), "abc");
/// ```
#[must_use]
pub fn normalize_etag(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("&quot;")
        .and_then(|s| s.strip_suffix("&quot;"))
        .unwrap_or(trimmed);
    trimmed.trim_matches('"').to_owned()
}

/// An object as listed by any vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedObject {
    /// Full object key.
    pub key: String,
    /// Last-modified timestamp as sent by the server.
    pub last_modified: String,
    /// ETag without quotes.
    pub etag: String,
    /// Size in bytes.
    pub size: i64,
    /// Storage class, `STANDARD` when not reported.
    pub storage_class: String,
    /// Last path segment of the key.
    pub filename: String,
    /// Coarse media category.
    pub mime_category: MimeCategory,
}

impl NormalizedObject {
    /// Build an object from raw listing fields, applying the defaults.
    pub fn new(
        key: impl Into<String>,
        last_modified: impl Into<String>,
        etag: &str,
        size: i64,
        storage_class: &str,
        resolver: &dyn MimeResolver,
    ) -> Self {
        let key = key.into();
        let filename = filename_of(&key).to_owned();
        let mime_category = if key.ends_with('/') {
            MimeCategory::Folder
        } else {
            MimeCategory::from_mime(&resolver.resolve(&filename))
        };
        let storage_class = if storage_class.trim().is_empty() {
            DEFAULT_STORAGE_CLASS.to_owned()
        } else {
            storage_class.trim().to_owned()
        };

        Self {
            key,
            last_modified: last_modified.into(),
            etag: normalize_etag(etag),
            size,
            storage_class,
            filename,
            mime_category,
        }
    }
}

/// Last non-empty path segment of a key.
#[must_use]
pub fn filename_of(key: &str) -> &str {
    key.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// A bucket as listed by any vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBucket {
    /// Bucket name.
    pub name: String,
    /// Creation timestamp as sent by the server (may be empty).
    pub creation_date: String,
}

/// Bucket owner reported by list-buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Canonical user id.
    pub id: String,
    /// Display name.
    pub display_name: String,
}

/// Metadata returned by a `HEAD` object request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// `Content-Length`.
    pub size: i64,
    /// `Content-Type`.
    pub content_type: String,
    /// ETag without quotes.
    pub etag: String,
    /// `Last-Modified`.
    pub last_modified: String,
    /// `x-amz-storage-class`, `STANDARD` when absent.
    pub storage_class: String,
    /// `x-amz-meta-*` headers, keyed without the prefix.
    pub user_metadata: BTreeMap<String, String>,
}

impl ObjectMetadata {
    /// Read metadata from response headers.
    #[must_use]
    pub fn from_headers(headers: &http::HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        };

        let user_metadata = headers
            .iter()
            .filter_map(|(name, value)| {
                let key = name.as_str().strip_prefix(USER_METADATA_PREFIX)?;
                Some((key.to_owned(), value.to_str().ok()?.to_owned()))
            })
            .collect();

        let storage_class = get("x-amz-storage-class");
        Self {
            size: get("content-length").parse().unwrap_or(0),
            content_type: get("content-type"),
            etag: normalize_etag(&get("etag")),
            last_modified: get("last-modified"),
            storage_class: if storage_class.is_empty() {
                DEFAULT_STORAGE_CLASS.to_owned()
            } else {
                storage_class
            },
            user_metadata,
        }
    }
}
