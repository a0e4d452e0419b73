//! Provider profiles and endpoint resolution.
//!
//! A [`ProviderProfile`] binds a [`Vendor`] to the user's parameters
//! (account id, custom endpoint, CDN domains, toggles). It is validated once
//! by [`ProviderProfileBuilder::build`] and immutable afterwards, so it can
//! be shared freely between tasks.

use std::collections::BTreeMap;

use rustbucket_core::ClientConfig;
use rustbucket_core::params::{self, parse_bool};
use serde::Serialize;
use tracing::{debug, warn};

use crate::alternate::{AlternateHost, MatchStyle, ObjectLocation, normalize_host, split_url};
use crate::codec::{self, RequestTarget};
use crate::error::ProviderError;
use crate::region::{self, RegionPolicy};
use crate::vendor::{Capabilities, Vendor, VendorSpec};

/// URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTPS.
    Https,
}

impl Scheme {
    /// Returns the scheme string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket addressing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingStyle {
    /// `host/bucket/key`.
    PathStyle,
    /// `bucket.host/key`.
    VirtualHosted,
}

/// A resolved endpoint for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Endpoint host (and port, for custom endpoints).
    pub host: String,
    /// Whether buckets are addressed in the path.
    pub path_style: bool,
    /// Region the endpoint was resolved for.
    pub region: String,
    /// Region placed in the SigV4 credential scope.
    pub signing_region: String,
    /// URL scheme.
    pub scheme: Scheme,
}

impl Endpoint {
    /// The addressing style of this endpoint.
    #[must_use]
    pub fn style(&self) -> AddressingStyle {
        if self.path_style {
            AddressingStyle::PathStyle
        } else {
            AddressingStyle::VirtualHosted
        }
    }

    /// Request target for `bucket`/`key` in this endpoint's style.
    pub fn target(&self, bucket: &str, key: &str) -> Result<RequestTarget, ProviderError> {
        codec::request_target(self, bucket, key, self.style())
    }

    /// URL of `bucket`/`key` in this endpoint's style.
    pub fn object_url(&self, bucket: &str, key: &str) -> Result<String, ProviderError> {
        codec::build_url(self, bucket, key, self.style())
    }
}

/// An immutable, validated vendor profile.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    spec: &'static VendorSpec,
    parameters: BTreeMap<String, String>,
    custom_endpoint: Option<String>,
    scheme: Scheme,
    path_style: bool,
}

/// Builder for [`ProviderProfile`].
#[derive(Debug, Clone)]
pub struct ProviderProfileBuilder {
    vendor: Vendor,
    parameters: BTreeMap<String, String>,
}

impl ProviderProfileBuilder {
    /// Set one parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Set several parameters.
    #[must_use]
    pub fn parameters<K, V>(mut self, parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Validate the parameters and build the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidConfiguration`] when a required
    /// parameter is missing or the custom endpoint is not a bare host.
    pub fn build(self) -> Result<ProviderProfile, ProviderError> {
        let spec = self.vendor.spec();
        let parameters = self.parameters;

        for required in spec.required_params {
            if parameters.get(*required).is_none_or(|v| v.trim().is_empty()) {
                return Err(ProviderError::InvalidConfiguration(format!(
                    "{} requires the `{required}` parameter",
                    spec.label
                )));
            }
        }

        let mut implied_scheme = None;
        let custom_endpoint = match parameters.get(params::ENDPOINT) {
            Some(raw) if !raw.trim().is_empty() => {
                let raw = raw.trim();
                if raw.starts_with("http://") {
                    implied_scheme = Some(Scheme::Http);
                }
                let host = normalize_host(raw);
                if host.contains('/') || host.contains('{') {
                    return Err(ProviderError::InvalidConfiguration(format!(
                        "endpoint must be a host with optional port, got {raw:?}"
                    )));
                }
                Some(host)
            }
            _ => None,
        };

        let scheme = match parameters.get(params::USE_HTTPS) {
            Some(v) if parse_bool(v) => Scheme::Https,
            Some(_) => Scheme::Http,
            None => implied_scheme.unwrap_or(Scheme::Https),
        };
        let path_style = parameters
            .get(params::PATH_STYLE)
            .map_or(spec.path_style, |v| parse_bool(v));

        Ok(ProviderProfile {
            spec,
            parameters,
            custom_endpoint,
            scheme,
            path_style,
        })
    }
}

impl ProviderProfile {
    /// Start building a profile for `vendor`.
    #[must_use]
    pub fn builder(vendor: Vendor) -> ProviderProfileBuilder {
        ProviderProfileBuilder {
            vendor,
            parameters: BTreeMap::new(),
        }
    }

    /// Build a profile from the vendor id and parameter bag of a client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProviderError> {
        let vendor: Vendor = config.vendor.parse()?;
        Self::builder(vendor)
            .parameters(config.parameters.clone())
            .build()
    }

    /// Vendor of this profile.
    #[must_use]
    pub fn vendor(&self) -> Vendor {
        self.spec.vendor
    }

    /// Static vendor description.
    #[must_use]
    pub fn spec(&self) -> &'static VendorSpec {
        self.spec
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    /// Optional features this vendor supports.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.spec.capabilities
    }

    /// Parameter value, if set.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Whether buckets are addressed in the path.
    #[must_use]
    pub fn path_style(&self) -> bool {
        self.path_style
    }

    /// Resolve the endpoint for `region`.
    ///
    /// An empty or unknown region is replaced by the default, rejected, or
    /// accepted verbatim depending on the vendor's [`RegionPolicy`]. Strict
    /// vendors bill per region and never pick one silently.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidRegion`] listing the accepted codes
    /// when a strict vendor gets an empty or unknown region, or
    /// [`ProviderError::InvalidConfiguration`] if the endpoint template still
    /// has unresolved placeholders.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustbucket_provider::{ProviderProfile, Vendor};
    ///
    /// let profile = ProviderProfile::builder(Vendor::Aws).build().unwrap();
    /// assert_eq!(profile.resolve("us-east-1").unwrap().host, "s3.us-east-1.amazonaws.com");
    ///
    /// let profile = ProviderProfile::builder(Vendor::Aws)
    ///     .parameter("use_standard_endpoint", "true")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(profile.resolve("us-east-1").unwrap().host, "s3.amazonaws.com");
    /// ```
    pub fn resolve(&self, region: &str) -> Result<Endpoint, ProviderError> {
        let (code, raw_code) = self.select_region(region.trim())?;

        let host = if self.spec.vendor == Vendor::Aws
            && code == "us-east-1"
            && self
                .parameter(params::USE_STANDARD_ENDPOINT)
                .is_some_and(parse_bool)
        {
            "s3.amazonaws.com".to_owned()
        } else {
            self.render_host(&raw_code)?
        };

        let signing_region = match (self.spec.forced_signing_region, self.parameter(params::SIGNING_REGION)) {
            (Some(forced), _) => forced.to_owned(),
            (None, Some(over)) if !over.trim().is_empty() => over.trim().to_owned(),
            _ => code.clone(),
        };

        debug!(
            vendor = %self.spec.vendor,
            region = %code,
            host = %host,
            path_style = self.path_style,
            "Resolved endpoint"
        );

        Ok(Endpoint {
            host,
            path_style: self.path_style,
            region: code,
            signing_region,
            scheme: self.scheme,
        })
    }

    /// Alternate hosts for a resolved endpoint, in matching order: per-bucket
    /// CDN domains, per-bucket public domains, then the vendor's own hosts.
    #[must_use]
    pub fn alternate_hosts(&self, endpoint: &Endpoint) -> Vec<AlternateHost> {
        let mut hosts = Vec::new();
        for prefix in [params::CDN_DOMAIN_PREFIX, params::PUBLIC_DOMAIN_PREFIX] {
            for (key, value) in &self.parameters {
                let Some(bucket) = key.strip_prefix(prefix) else {
                    continue;
                };
                let host = normalize_host(value);
                if bucket.is_empty() || host.is_empty() {
                    continue;
                }
                hosts.push(AlternateHost::exact(
                    host,
                    MatchStyle::FixedBucket(bucket.to_owned()),
                ));
            }
        }
        hosts.extend((self.spec.alternates)(endpoint));
        hosts
    }

    /// Recover bucket and key from a URL pointing at this provider.
    ///
    /// The primary host is tried first in the profile's addressing style,
    /// then every alternate host in order. The first match wins. Returns
    /// `Ok(None)` when no host matches or the URL lacks a bucket or key.
    pub fn reverse_match(
        &self,
        region: &str,
        url: &str,
    ) -> Result<Option<ObjectLocation>, ProviderError> {
        let endpoint = self.resolve(region)?;
        let Some((host, path)) = split_url(url) else {
            return Ok(None);
        };

        let primary_style = if endpoint.path_style {
            MatchStyle::PathStyle
        } else {
            MatchStyle::VirtualHosted
        };
        let primary = AlternateHost::exact(&endpoint.host, primary_style);

        Ok(std::iter::once(primary)
            .chain(self.alternate_hosts(&endpoint))
            .find_map(|alt| alt.match_parts(&host, &path)))
    }

    fn select_region(&self, requested: &str) -> Result<(String, String), ProviderError> {
        let spec = self.spec;
        if let Some(info) = region::lookup(spec.regions, requested) {
            return Ok((info.code.to_owned(), info.raw_code.to_owned()));
        }
        let default = || match region::lookup(spec.regions, spec.default_region) {
            Some(info) => (info.code.to_owned(), info.raw_code.to_owned()),
            None => (spec.default_region.to_owned(), spec.default_region.to_owned()),
        };

        match spec.region_policy {
            RegionPolicy::Any | RegionPolicy::Fallback if requested.is_empty() => Ok(default()),
            RegionPolicy::Any => Ok((requested.to_owned(), requested.to_owned())),
            RegionPolicy::Fallback => {
                warn!(
                    vendor = %spec.vendor,
                    requested,
                    fallback = spec.default_region,
                    "Unknown region, using vendor default"
                );
                Ok(default())
            }
            RegionPolicy::Strict => Err(ProviderError::InvalidRegion {
                vendor: spec.vendor.as_str().to_owned(),
                region: requested.to_owned(),
                valid: spec
                    .regions
                    .iter()
                    .map(|r| r.code)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn render_host(&self, raw_region: &str) -> Result<String, ProviderError> {
        let region_prefix = if raw_region.is_empty() {
            String::new()
        } else {
            format!("{raw_region}.")
        };

        let mut host = self
            .spec
            .endpoint_pattern
            .replace("{region_prefix}", &region_prefix)
            .replace("{region}", raw_region);
        if let Some(account_id) = self.parameter(params::ACCOUNT_ID) {
            host = host.replace("{account_id}", account_id.trim());
        }
        if let Some(endpoint) = &self.custom_endpoint {
            host = host.replace("{endpoint}", endpoint);
        }

        if host.contains(['{', '}']) || host.is_empty() {
            return Err(ProviderError::InvalidConfiguration(format!(
                "unresolved endpoint template for {}: {host}",
                self.spec.label
            )));
        }
        Ok(host.to_ascii_lowercase())
    }
}
