//! Per-call request options and per-operation timeout hints.
//!
//! Timeouts are hints handed to the transport; nothing in rustbucket enforces
//! them. A call-site [`RequestOptions::timeout`] wins over the configured
//! [`OperationTimeouts`] table.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options supplied with every client call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Explicit timeout for this call. `None` defers to the operation table.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options with an explicit timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Timeout hints keyed by operation name (`"head_object"`, `"list_objects"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTimeouts {
    /// Fallback for operations without an entry.
    pub default: Duration,
    /// Per-operation entries.
    pub operations: BTreeMap<String, Duration>,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        let operations = [
            ("head_object", 10),
            ("list_buckets", 15),
            ("get_bucket_location", 15),
            ("list_objects", 30),
            ("delete_objects", 60),
            ("copy_object", 120),
            ("get_object", 120),
            ("put_object", 300),
        ]
        .into_iter()
        .map(|(name, secs)| (name.to_owned(), Duration::from_secs(secs)))
        .collect();

        Self {
            default: Duration::from_secs(30),
            operations,
        }
    }
}

impl OperationTimeouts {
    /// Timeout hint for the named operation.
    #[must_use]
    pub fn for_operation(&self, operation: &str) -> Duration {
        self.operations
            .get(operation)
            .copied()
            .unwrap_or(self.default)
    }

    /// Replace the entry for one operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>, timeout: Duration) -> Self {
        self.operations.insert(operation.into(), timeout);
        self
    }

    /// Resolve the effective timeout for a call.
    #[must_use]
    pub fn resolve(&self, operation: &str, options: &RequestOptions) -> Duration {
        options
            .timeout
            .unwrap_or_else(|| self.for_operation(operation))
    }
}
