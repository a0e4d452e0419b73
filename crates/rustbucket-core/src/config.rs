//! Client configuration.
//!
//! Provides [`ClientConfig`], the read-only input a client is constructed
//! from: vendor, region, credentials and the provider parameter bag.
//! Values can be built in code with the typed builder or loaded from
//! environment variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::options::OperationTimeouts;
use crate::params::{self, parse_bool};

/// Configuration for one storage client session.
///
/// # Examples
///
/// ```
/// use rustbucket_core::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .vendor("wasabi".into())
///     .region("eu-central-1".into())
///     .access_key_id("AKID".into())
///     .secret_access_key("secret".into())
///     .build();
/// assert_eq!(config.vendor, "wasabi");
/// assert_eq!(config.log_level, "info");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Vendor identifier (`aws`, `cloudflare_r2`, `generic`, ...).
    #[builder(default = String::from("aws"))]
    pub vendor: String,

    /// Region code. Empty selects the vendor default.
    #[builder(default)]
    pub region: String,

    /// Access key ID.
    #[builder(default)]
    pub access_key_id: String,

    /// Secret access key. Never serialized.
    #[builder(default)]
    #[serde(skip_serializing, default)]
    pub secret_access_key: String,

    /// Provider parameter bag (see [`crate::params`]).
    #[builder(default)]
    pub parameters: BTreeMap<String, String>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Timeout hints per operation.
    #[builder(default)]
    pub timeouts: OperationTimeouts,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("vendor", &self.vendor)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("parameters", &self.parameters)
            .field("log_level", &self.log_level)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Environment variables copied verbatim into the parameter bag.
const PARAMETER_ENV_VARS: &[(&str, &str)] = &[
    ("RUSTBUCKET_ACCOUNT_ID", params::ACCOUNT_ID),
    ("RUSTBUCKET_ENDPOINT", params::ENDPOINT),
    ("RUSTBUCKET_USE_HTTPS", params::USE_HTTPS),
    ("RUSTBUCKET_PATH_STYLE", params::PATH_STYLE),
    ("RUSTBUCKET_SIGNING_REGION", params::SIGNING_REGION),
    ("RUSTBUCKET_USE_STANDARD_ENDPOINT", params::USE_STANDARD_ENDPOINT),
];

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `RUSTBUCKET_VENDOR` | `aws` |
    /// | `RUSTBUCKET_REGION` | *(vendor default)* |
    /// | `RUSTBUCKET_ACCESS_KEY_ID` / `AWS_ACCESS_KEY_ID` | *(empty)* |
    /// | `RUSTBUCKET_SECRET_ACCESS_KEY` / `AWS_SECRET_ACCESS_KEY` | *(empty)* |
    /// | `RUSTBUCKET_ACCOUNT_ID` | *(unset)* |
    /// | `RUSTBUCKET_ENDPOINT` | *(unset)* |
    /// | `RUSTBUCKET_USE_HTTPS` | *(unset, https)* |
    /// | `RUSTBUCKET_PATH_STYLE` | *(unset, vendor default)* |
    /// | `RUSTBUCKET_SIGNING_REGION` | *(unset)* |
    /// | `RUSTBUCKET_USE_STANDARD_ENDPOINT` | *(unset)* |
    /// | `RUSTBUCKET_DEFAULT_TIMEOUT_SECS` | `30` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("RUSTBUCKET_VENDOR") {
            config.vendor = v;
        }
        if let Ok(v) = std::env::var("RUSTBUCKET_REGION") {
            config.region = v;
        }
        if let Ok(v) =
            std::env::var("RUSTBUCKET_ACCESS_KEY_ID").or_else(|_| std::env::var("AWS_ACCESS_KEY_ID"))
        {
            config.access_key_id = v;
        }
        if let Ok(v) = std::env::var("RUSTBUCKET_SECRET_ACCESS_KEY")
            .or_else(|_| std::env::var("AWS_SECRET_ACCESS_KEY"))
        {
            config.secret_access_key = v;
        }
        for (var, key) in PARAMETER_ENV_VARS {
            if let Ok(v) = std::env::var(var) {
                config.parameters.insert((*key).to_owned(), v);
            }
        }
        if let Ok(v) = std::env::var("RUSTBUCKET_DEFAULT_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => config.timeouts.default = std::time::Duration::from_secs(secs),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid RUSTBUCKET_DEFAULT_TIMEOUT_SECS"),
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Whether the parameter bag enables the given boolean flag.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.parameters.get(key).is_some_and(|v| parse_bool(v))
    }
}
