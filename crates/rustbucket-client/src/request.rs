//! Operation inputs and outputs that have no counterpart in the model crate.

use bytes::Bytes;
use rustbucket_model::ObjectMetadata;

/// Parameters of a list-objects (v2) request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsRequest {
    /// Only keys starting with this prefix.
    pub prefix: Option<String>,
    /// Group keys sharing a prefix up to this delimiter.
    pub delimiter: Option<String>,
    /// Token from the previous page.
    pub continuation_token: Option<String>,
    /// Start listing after this key.
    pub start_after: Option<String>,
    /// Page size hint.
    pub max_keys: Option<u32>,
}

impl ListObjectsRequest {
    /// List keys under `prefix`, grouping by `/`.
    #[must_use]
    pub fn folder(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            delimiter: Some("/".to_owned()),
            ..Self::default()
        }
    }

    pub(crate) fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![("list-type".to_owned(), "2".to_owned())];
        let optional = [
            ("prefix", self.prefix.clone()),
            ("delimiter", self.delimiter.clone()),
            ("continuation-token", self.continuation_token.clone()),
            ("start-after", self.start_after.clone()),
            ("max-keys", self.max_keys.map(|n| n.to_string())),
        ];
        query.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| Some((name.to_owned(), value.filter(|v| !v.is_empty())?))),
        );
        query
    }
}

/// Body and metadata of a downloaded object.
#[derive(Debug, Clone)]
pub struct GetObjectOutput {
    /// Metadata from the response headers.
    pub metadata: ObjectMetadata,
    /// Object content.
    pub body: Bytes,
}

/// Result of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutObjectOutput {
    /// ETag of the stored object, without quotes.
    pub etag: String,
    /// Version id, for versioned buckets.
    pub version_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_build_list_query_without_empty_values() {
        let request = ListObjectsRequest {
            prefix: Some("2024/".to_owned()),
            delimiter: Some(String::new()),
            max_keys: Some(100),
            ..ListObjectsRequest::default()
        };
        assert_eq!(
            request.query(),
            vec![
                ("list-type".to_owned(), "2".to_owned()),
                ("prefix".to_owned(), "2024/".to_owned()),
                ("max-keys".to_owned(), "100".to_owned()),
            ]
        );
    }

    #[test]
    fn test_should_build_folder_request() {
        let request = ListObjectsRequest::folder("photos/");
        assert_eq!(request.prefix.as_deref(), Some("photos/"));
        assert_eq!(request.delimiter.as_deref(), Some("/"));
    }
}
