//! Bucket lifecycle configuration.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Maximum number of rules S3 accepts in one configuration.
pub const MAX_LIFECYCLE_RULES: usize = 1000;

/// Whether a lifecycle rule is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleStatus {
    /// Rule is applied.
    #[default]
    Enabled,
    /// Rule is kept but not applied.
    Disabled,
}

impl LifecycleStatus {
    /// Returns the string value of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LifecycleStatus {
    fn from(s: &str) -> Self {
        match s {
            "Disabled" => Self::Disabled,
            _ => Self::Enabled,
        }
    }
}

/// Transition of objects to another storage class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Days after creation.
    pub days: Option<u32>,
    /// Fixed date (ISO 8601).
    pub date: Option<String>,
    /// Target storage class.
    pub storage_class: String,
}

/// One lifecycle rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRule {
    /// Optional rule id.
    pub id: Option<String>,
    /// Rule status.
    pub status: LifecycleStatus,
    /// Key prefix filter; empty applies to the whole bucket.
    pub prefix: String,
    /// Expire current versions this many days after creation.
    pub expiration_days: Option<u32>,
    /// Expire current versions on this date.
    pub expiration_date: Option<String>,
    /// Remove expired delete markers.
    pub expired_object_delete_marker: Option<bool>,
    /// Storage class transitions.
    pub transitions: Vec<Transition>,
    /// Expire noncurrent versions this many days after they become noncurrent.
    pub noncurrent_version_expiration_days: Option<u32>,
    /// Abort incomplete multipart uploads after this many days.
    pub abort_incomplete_multipart_upload_days: Option<u32>,
}

impl LifecycleRule {
    /// Check the rule invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidLifecycleRule`] when the rule has no
    /// action, uses zero days, or mixes expiration days and date.
    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |msg: &str| Err(ModelError::InvalidLifecycleRule(msg.to_owned()));

        let has_action = self.expiration_days.is_some()
            || self.expiration_date.is_some()
            || self.expired_object_delete_marker == Some(true)
            || !self.transitions.is_empty()
            || self.noncurrent_version_expiration_days.is_some()
            || self.abort_incomplete_multipart_upload_days.is_some();
        if !has_action {
            return invalid("rule must specify at least one action");
        }
        if self.expiration_days.is_some() && self.expiration_date.is_some() {
            return invalid("expiration days and date are mutually exclusive");
        }
        let zero_days = [
            self.expiration_days,
            self.noncurrent_version_expiration_days,
            self.abort_incomplete_multipart_upload_days,
        ]
        .contains(&Some(0));
        if zero_days {
            return invalid("day counts must be positive");
        }
        if self
            .transitions
            .iter()
            .any(|t| t.storage_class.is_empty() || (t.days.is_none() && t.date.is_none()))
        {
            return invalid("transition needs a storage class and days or date");
        }
        if self.id.as_ref().is_some_and(|id| id.len() > 255) {
            return invalid("rule id longer than 255 characters");
        }
        Ok(())
    }
}

/// A bucket's lifecycle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleConfiguration {
    /// Rules.
    pub rules: Vec<LifecycleRule>,
}

impl LifecycleConfiguration {
    /// Whether any rule is configured.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Validate every rule and the rule count.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.rules.is_empty() {
            return Err(ModelError::InvalidLifecycleRule(
                "configuration has no rules".to_owned(),
            ));
        }
        if self.rules.len() > MAX_LIFECYCLE_RULES {
            return Err(ModelError::InvalidLifecycleRule(format!(
                "at most {MAX_LIFECYCLE_RULES} rules are allowed"
            )));
        }
        self.rules.iter().try_for_each(LifecycleRule::validate)
    }
}
