//! Paginated listing outputs.

use serde::{Deserialize, Serialize};

use crate::object::{NormalizedBucket, NormalizedObject, Owner};

/// Pagination state of a listing.
///
/// The continuation token is only kept while the listing is truncated. A
/// truncated listing without a token is terminal: there is nothing to
/// request next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    is_truncated: bool,
    continuation_token: String,
}

impl PageCursor {
    /// Build a cursor, dropping the token when the listing is not truncated.
    ///
    /// ```
    /// use rustbucket_model::PageCursor;
    ///
    /// let cursor = PageCursor::new(false, Some("stale".to_owned()));
    /// assert_eq!(cursor.continuation_token(), None);
    /// ```
    #[must_use]
    pub fn new(is_truncated: bool, continuation_token: Option<String>) -> Self {
        let continuation_token = if is_truncated {
            continuation_token.unwrap_or_default()
        } else {
            String::new()
        };
        Self {
            is_truncated,
            continuation_token,
        }
    }

    /// A cursor for a complete listing.
    #[must_use]
    pub fn complete() -> Self {
        Self::default()
    }

    /// Whether the server reported more results.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.is_truncated
    }

    /// Token to pass to the next request, if any.
    #[must_use]
    pub fn continuation_token(&self) -> Option<&str> {
        (!self.continuation_token.is_empty()).then_some(self.continuation_token.as_str())
    }

    /// Whether another page can be requested.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.is_truncated && !self.continuation_token.is_empty()
    }
}

/// Result of a list-objects request (v1 or v2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsOutput {
    /// Objects in this page.
    pub objects: Vec<NormalizedObject>,
    /// Common prefixes ("folders") when a delimiter was used.
    pub common_prefixes: Vec<String>,
    /// Pagination state.
    pub cursor: PageCursor,
    /// Prefix echoed by the server.
    pub prefix: String,
    /// Delimiter echoed by the server.
    pub delimiter: String,
    /// `KeyCount`, or the number of objects and prefixes when absent.
    pub key_count: usize,
}

/// Result of a list-buckets request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketsOutput {
    /// Buckets in this page.
    pub buckets: Vec<NormalizedBucket>,
    /// Owner, when reported.
    pub owner: Option<Owner>,
    /// Pagination state.
    pub cursor: PageCursor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_keep_token_only_when_truncated() {
        let cursor = PageCursor::new(true, Some("next".to_owned()));
        assert!(cursor.has_next());
        assert_eq!(cursor.continuation_token(), Some("next"));

        let cursor = PageCursor::new(false, Some("next".to_owned()));
        assert!(!cursor.is_truncated());
        assert_eq!(cursor.continuation_token(), None);
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_should_treat_truncated_without_token_as_terminal() {
        let cursor = PageCursor::new(true, None);
        assert!(cursor.is_truncated());
        assert!(!cursor.has_next());

        let cursor = PageCursor::new(true, Some(String::new()));
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_should_serialize_cursor_in_camel_case() {
        let json = serde_json::to_string(&PageCursor::new(true, Some("t".to_owned()))).unwrap();
        assert_eq!(json, r#"{"isTruncated":true,"continuationToken":"t"}"#);
    }
}
