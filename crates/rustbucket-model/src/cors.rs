//! Bucket CORS configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Maximum number of rules S3 accepts in one configuration.
pub const MAX_CORS_RULES: usize = 100;

/// HTTP methods allowed in a CORS rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CorsMethod {
    /// `GET`.
    Get,
    /// `PUT`.
    Put,
    /// `POST`.
    Post,
    /// `DELETE`.
    Delete,
    /// `HEAD`.
    Head,
}

impl CorsMethod {
    /// Returns the string value of this method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl std::fmt::Display for CorsMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorsMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            _ => Err(ModelError::UnsupportedCorsMethod(s.to_owned())),
        }
    }
}

/// One CORS rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsRule {
    /// Optional rule id.
    pub id: Option<String>,
    /// Allowed methods; must not be empty.
    pub allowed_methods: Vec<CorsMethod>,
    /// Allowed origins; must not be empty.
    pub allowed_origins: Vec<String>,
    /// Allowed request headers.
    pub allowed_headers: Vec<String>,
    /// Response headers exposed to the browser.
    pub expose_headers: Vec<String>,
    /// Preflight cache time. `Some(0)` is sent as `0`; `None` is omitted.
    pub max_age_seconds: Option<u32>,
}

impl CorsRule {
    /// Check the rule invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCorsRule`] when methods or origins are
    /// empty, or an origin or header carries more than one `*` wildcard.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.allowed_methods.is_empty() {
            return Err(ModelError::InvalidCorsRule(
                "at least one allowed method is required".to_owned(),
            ));
        }
        if self.allowed_origins.iter().all(|o| o.trim().is_empty()) {
            return Err(ModelError::InvalidCorsRule(
                "at least one allowed origin is required".to_owned(),
            ));
        }
        if let Some(origin) = self
            .allowed_origins
            .iter()
            .chain(&self.allowed_headers)
            .find(|v| v.matches('*').count() > 1)
        {
            return Err(ModelError::InvalidCorsRule(format!(
                "{origin:?} contains more than one wildcard"
            )));
        }
        if self.id.as_ref().is_some_and(|id| id.len() > 255) {
            return Err(ModelError::InvalidCorsRule(
                "rule id longer than 255 characters".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A bucket's CORS configuration. No rules means CORS is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfiguration {
    /// Rules in evaluation order.
    pub rules: Vec<CorsRule>,
}

impl CorsConfiguration {
    /// Whether any rule is configured.
    #[must_use]
    pub fn has_cors(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Validate every rule and the rule count.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.rules.is_empty() {
            return Err(ModelError::InvalidCorsRule(
                "configuration has no rules".to_owned(),
            ));
        }
        if self.rules.len() > MAX_CORS_RULES {
            return Err(ModelError::InvalidCorsRule(format!(
                "at most {MAX_CORS_RULES} rules are allowed"
            )));
        }
        self.rules.iter().try_for_each(CorsRule::validate)
    }
}
