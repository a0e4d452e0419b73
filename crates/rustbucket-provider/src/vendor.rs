//! The vendor table.
//!
//! Every supported vendor is described by a static [`VendorSpec`]: endpoint
//! template, default addressing style, region table and policy, required
//! parameters, capabilities and a hook listing the vendor's alternate hosts.
//! Vendor-specific behavior is data plus function pointers, selected by
//! [`Vendor`].

use std::str::FromStr;

use serde::Serialize;

use crate::alternate::{AlternateHost, MatchStyle};
use crate::error::ProviderError;
use crate::profile::Endpoint;
use crate::region::{self, RegionInfo, RegionPolicy};

/// Supported storage vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Vendor {
    /// Amazon S3.
    #[serde(rename = "aws")]
    Aws,
    /// Cloudflare R2.
    #[serde(rename = "cloudflare_r2")]
    CloudflareR2,
    /// Backblaze B2 (S3-compatible API).
    #[serde(rename = "backblaze_b2")]
    BackblazeB2,
    /// DigitalOcean Spaces.
    #[serde(rename = "digitalocean_spaces")]
    DigitalOceanSpaces,
    /// Wasabi.
    #[serde(rename = "wasabi")]
    Wasabi,
    /// Vultr Object Storage.
    #[serde(rename = "vultr")]
    Vultr,
    /// Linode / Akamai Object Storage.
    #[serde(rename = "linode")]
    Linode,
    /// Mega S4.
    #[serde(rename = "mega_s4")]
    MegaS4,
    /// Hetzner Object Storage.
    #[serde(rename = "hetzner")]
    Hetzner,
    /// Scaleway Object Storage.
    #[serde(rename = "scaleway")]
    Scaleway,
    /// Any other S3-compatible endpoint (MinIO, Ceph RGW, Garage, ...).
    #[serde(rename = "generic")]
    Generic,
}

impl Vendor {
    /// All vendors in table order.
    pub const ALL: [Self; 11] = [
        Self::Aws,
        Self::CloudflareR2,
        Self::BackblazeB2,
        Self::DigitalOceanSpaces,
        Self::Wasabi,
        Self::Vultr,
        Self::Linode,
        Self::MegaS4,
        Self::Hetzner,
        Self::Scaleway,
        Self::Generic,
    ];

    /// Returns the vendor identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::CloudflareR2 => "cloudflare_r2",
            Self::BackblazeB2 => "backblaze_b2",
            Self::DigitalOceanSpaces => "digitalocean_spaces",
            Self::Wasabi => "wasabi",
            Self::Vultr => "vultr",
            Self::Linode => "linode",
            Self::MegaS4 => "mega_s4",
            Self::Hetzner => "hetzner",
            Self::Scaleway => "scaleway",
            Self::Generic => "generic",
        }
    }

    /// Returns the static description of this vendor.
    #[must_use]
    pub fn spec(self) -> &'static VendorSpec {
        match self {
            Self::Aws => &AWS,
            Self::CloudflareR2 => &CLOUDFLARE_R2,
            Self::BackblazeB2 => &BACKBLAZE_B2,
            Self::DigitalOceanSpaces => &DIGITALOCEAN_SPACES,
            Self::Wasabi => &WASABI,
            Self::Vultr => &VULTR,
            Self::Linode => &LINODE,
            Self::MegaS4 => &MEGA_S4,
            Self::Hetzner => &HETZNER,
            Self::Scaleway => &SCALEWAY,
            Self::Generic => &GENERIC,
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == id)
            .ok_or_else(|| ProviderError::UnknownVendor(s.to_owned()))
    }
}

/// Optional S3 features a vendor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Bucket CORS configuration.
    pub cors: bool,
    /// Bucket lifecycle configuration.
    pub lifecycle: bool,
    /// Browser-based presigned POST uploads.
    pub presigned_post: bool,
}

impl Capabilities {
    const FULL: Self = Self {
        cors: true,
        lifecycle: true,
        presigned_post: true,
    };
}

/// Static description of a vendor.
#[derive(Debug)]
pub struct VendorSpec {
    /// Vendor identity.
    pub vendor: Vendor,
    /// Display label.
    pub label: &'static str,
    /// Host template with `{region}`, `{region_prefix}`, `{account_id}` and `{endpoint}` placeholders.
    pub endpoint_pattern: &'static str,
    /// Default addressing style.
    pub path_style: bool,
    /// Region used when none (or, under [`RegionPolicy::Fallback`], an unknown one) is given.
    pub default_region: &'static str,
    /// Treatment of regions missing from [`Self::regions`].
    pub region_policy: RegionPolicy,
    /// Known regions.
    pub regions: &'static [RegionInfo],
    /// Parameters that must be present and non-empty.
    pub required_params: &'static [&'static str],
    /// Region placed in the credential scope regardless of the addressing region.
    pub forced_signing_region: Option<&'static str>,
    /// Supported optional features.
    pub capabilities: Capabilities,
    /// Vendor alternate hosts, tried in order after the primary host.
    pub alternates: fn(&Endpoint) -> Vec<AlternateHost>,
}

/// The primary host addressed in the style the vendor does not default to.
fn opposite_style(endpoint: &Endpoint) -> AlternateHost {
    let style = if endpoint.path_style {
        MatchStyle::VirtualHosted
    } else {
        MatchStyle::PathStyle
    };
    AlternateHost::exact(&endpoint.host, style)
}

fn primary_only(endpoint: &Endpoint) -> Vec<AlternateHost> {
    vec![opposite_style(endpoint)]
}

fn aws_alternates(endpoint: &Endpoint) -> Vec<AlternateHost> {
    let region = &endpoint.region;
    vec![
        opposite_style(endpoint),
        AlternateHost::exact(
            format!("s3.dualstack.{region}.amazonaws.com"),
            MatchStyle::VirtualHosted,
        ),
        AlternateHost::exact(format!("s3-{region}.amazonaws.com"), MatchStyle::VirtualHosted),
        AlternateHost::exact(format!("s3-{region}.amazonaws.com"), MatchStyle::PathStyle),
        AlternateHost::exact("s3.amazonaws.com", MatchStyle::VirtualHosted),
        AlternateHost::exact("s3.amazonaws.com", MatchStyle::PathStyle),
    ]
}

fn backblaze_alternates(endpoint: &Endpoint) -> Vec<AlternateHost> {
    vec![
        opposite_style(endpoint),
        // f000.backblazeb2.com/file/<bucket>/<key>
        AlternateHost::wildcard("backblazeb2.com", MatchStyle::PathPrefix("file".to_owned())),
    ]
}

fn digitalocean_alternates(endpoint: &Endpoint) -> Vec<AlternateHost> {
    vec![
        AlternateHost::exact(
            format!("{}.cdn.digitaloceanspaces.com", endpoint.region),
            MatchStyle::VirtualHosted,
        ),
        opposite_style(endpoint),
    ]
}

fn wasabi_alternates(endpoint: &Endpoint) -> Vec<AlternateHost> {
    vec![
        opposite_style(endpoint),
        AlternateHost::exact("s3.wasabisys.com", MatchStyle::VirtualHosted),
        AlternateHost::exact("s3.wasabisys.com", MatchStyle::PathStyle),
    ]
}

fn linode_alternates(endpoint: &Endpoint) -> Vec<AlternateHost> {
    vec![
        opposite_style(endpoint),
        AlternateHost::exact(
            format!("website-{}.linodeobjects.com", endpoint.region),
            MatchStyle::VirtualHosted,
        ),
    ]
}

static AWS: VendorSpec = VendorSpec {
    vendor: Vendor::Aws,
    label: "Amazon S3",
    endpoint_pattern: "s3.{region}.amazonaws.com",
    path_style: false,
    default_region: "us-east-1",
    region_policy: RegionPolicy::Fallback,
    regions: region::AWS,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: aws_alternates,
};

static CLOUDFLARE_R2: VendorSpec = VendorSpec {
    vendor: Vendor::CloudflareR2,
    label: "Cloudflare R2",
    endpoint_pattern: "{account_id}.{region_prefix}r2.cloudflarestorage.com",
    path_style: true,
    default_region: "auto",
    region_policy: RegionPolicy::Fallback,
    regions: region::CLOUDFLARE_R2,
    required_params: &[rustbucket_core::params::ACCOUNT_ID],
    forced_signing_region: Some("auto"),
    capabilities: Capabilities {
        cors: true,
        lifecycle: true,
        presigned_post: false,
    },
    alternates: primary_only,
};

static BACKBLAZE_B2: VendorSpec = VendorSpec {
    vendor: Vendor::BackblazeB2,
    label: "Backblaze B2",
    endpoint_pattern: "s3.{region}.backblazeb2.com",
    path_style: false,
    default_region: "us-west-004",
    region_policy: RegionPolicy::Strict,
    regions: region::BACKBLAZE_B2,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities {
        cors: true,
        lifecycle: false,
        presigned_post: true,
    },
    alternates: backblaze_alternates,
};

static DIGITALOCEAN_SPACES: VendorSpec = VendorSpec {
    vendor: Vendor::DigitalOceanSpaces,
    label: "DigitalOcean Spaces",
    endpoint_pattern: "{region}.digitaloceanspaces.com",
    path_style: false,
    default_region: "nyc3",
    region_policy: RegionPolicy::Strict,
    regions: region::DIGITALOCEAN_SPACES,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: digitalocean_alternates,
};

static WASABI: VendorSpec = VendorSpec {
    vendor: Vendor::Wasabi,
    label: "Wasabi",
    endpoint_pattern: "s3.{region}.wasabisys.com",
    path_style: false,
    default_region: "us-east-1",
    region_policy: RegionPolicy::Fallback,
    regions: region::WASABI,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: wasabi_alternates,
};

static VULTR: VendorSpec = VendorSpec {
    vendor: Vendor::Vultr,
    label: "Vultr Object Storage",
    endpoint_pattern: "{region}.vultrobjects.com",
    path_style: false,
    default_region: "ewr1",
    region_policy: RegionPolicy::Strict,
    regions: region::VULTR,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: primary_only,
};

static LINODE: VendorSpec = VendorSpec {
    vendor: Vendor::Linode,
    label: "Linode Object Storage",
    endpoint_pattern: "{region}.linodeobjects.com",
    path_style: false,
    default_region: "us-east-1",
    region_policy: RegionPolicy::Strict,
    regions: region::LINODE,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: linode_alternates,
};

static MEGA_S4: VendorSpec = VendorSpec {
    vendor: Vendor::MegaS4,
    label: "Mega S4",
    endpoint_pattern: "s3.{region}.s4.mega.io",
    path_style: true,
    default_region: "eu-central-1",
    region_policy: RegionPolicy::Fallback,
    regions: region::MEGA_S4,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities {
        cors: true,
        lifecycle: false,
        presigned_post: true,
    },
    alternates: primary_only,
};

static HETZNER: VendorSpec = VendorSpec {
    vendor: Vendor::Hetzner,
    label: "Hetzner Object Storage",
    endpoint_pattern: "{region}.your-objectstorage.com",
    path_style: false,
    default_region: "fsn1",
    region_policy: RegionPolicy::Strict,
    regions: region::HETZNER,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: primary_only,
};

static SCALEWAY: VendorSpec = VendorSpec {
    vendor: Vendor::Scaleway,
    label: "Scaleway Object Storage",
    endpoint_pattern: "s3.{region}.scw.cloud",
    path_style: false,
    default_region: "fr-par",
    region_policy: RegionPolicy::Strict,
    regions: region::SCALEWAY,
    required_params: &[],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: primary_only,
};

static GENERIC: VendorSpec = VendorSpec {
    vendor: Vendor::Generic,
    label: "S3-compatible",
    endpoint_pattern: "{endpoint}",
    path_style: true,
    default_region: "us-east-1",
    region_policy: RegionPolicy::Any,
    regions: &[],
    required_params: &[rustbucket_core::params::ENDPOINT],
    forced_signing_region: None,
    capabilities: Capabilities::FULL,
    alternates: primary_only,
};
