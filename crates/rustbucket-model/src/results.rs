//! Results of copy, batch delete and bucket location requests.

use serde::{Deserialize, Serialize};

/// Result of a server-side copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyObjectResult {
    /// ETag of the new object, without quotes.
    pub etag: String,
    /// Last-modified timestamp of the new object.
    pub last_modified: String,
}

/// A key removed by a batch delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedObject {
    /// Object key.
    pub key: String,
    /// Version id, for versioned buckets.
    pub version_id: Option<String>,
}

/// A key a batch delete failed to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteError {
    /// Object key.
    pub key: String,
    /// S3 error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Version id, for versioned buckets.
    pub version_id: Option<String>,
}

/// Outcome of a batch delete. Each key appears in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Removed keys.
    pub deleted: Vec<DeletedObject>,
    /// Failed keys.
    pub errors: Vec<DeleteError>,
}

impl DeleteResult {
    /// Number of removed keys.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.deleted.len()
    }

    /// Number of failed keys.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether every key was removed.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Region a bucket lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketLocation {
    /// Region code.
    pub region: String,
}

impl BucketLocation {
    /// Interpret a `LocationConstraint` value. Empty means `us-east-1`, and
    /// the legacy `EU` means `eu-west-1`.
    ///
    /// ```
    /// use rustbucket_model::BucketLocation;
    ///
    /// assert_eq!(BucketLocation::from_constraint("").region, "us-east-1");
    /// assert_eq!(BucketLocation::from_constraint("EU").region, "eu-west-1");
    /// assert_eq!(BucketLocation::from_constraint("ap-south-1").region, "ap-south-1");
    /// ```
    #[must_use]
    pub fn from_constraint(constraint: &str) -> Self {
        let region = match constraint.trim() {
            "" => "us-east-1",
            "EU" => "eu-west-1",
            other => other,
        };
        Self {
            region: region.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_count_delete_outcomes() {
        let result = DeleteResult {
            deleted: vec![DeletedObject {
                key: "a.txt".to_owned(),
                version_id: None,
            }],
            errors: vec![DeleteError {
                key: "b.txt".to_owned(),
                code: "AccessDenied".to_owned(),
                message: "Access Denied".to_owned(),
                version_id: None,
            }],
        };
        assert_eq!(result.success_count(), 1);
        assert_eq!(result.error_count(), 1);
        assert!(!result.is_complete_success());
        assert!(DeleteResult::default().is_complete_success());
    }
}
