//! Region tables for every supported vendor.

/// One entry of a vendor region table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    /// Region code as users select it.
    pub code: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Value substituted into the endpoint template. Empty for regions that
    /// have no host component (Cloudflare R2 `auto`).
    pub raw_code: &'static str,
}

impl RegionInfo {
    const fn new(code: &'static str, label: &'static str) -> Self {
        Self {
            code,
            label,
            raw_code: code,
        }
    }
}

/// How a vendor treats a region missing from its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPolicy {
    /// Log a warning and use the default region.
    Fallback,
    /// Reject with [`crate::ProviderError::InvalidRegion`].
    Strict,
    /// Accept any non-empty region verbatim.
    Any,
}

/// Find a region in a table by code.
#[must_use]
pub fn lookup<'a>(table: &'a [RegionInfo], code: &str) -> Option<&'a RegionInfo> {
    table.iter().find(|r| r.code == code)
}

pub(crate) const AWS: &[RegionInfo] = &[
    RegionInfo::new("us-east-1", "US East (N. Virginia)"),
    RegionInfo::new("us-east-2", "US East (Ohio)"),
    RegionInfo::new("us-west-1", "US West (N. California)"),
    RegionInfo::new("us-west-2", "US West (Oregon)"),
    RegionInfo::new("ca-central-1", "Canada (Central)"),
    RegionInfo::new("sa-east-1", "South America (Sao Paulo)"),
    RegionInfo::new("eu-west-1", "Europe (Ireland)"),
    RegionInfo::new("eu-west-2", "Europe (London)"),
    RegionInfo::new("eu-west-3", "Europe (Paris)"),
    RegionInfo::new("eu-central-1", "Europe (Frankfurt)"),
    RegionInfo::new("eu-central-2", "Europe (Zurich)"),
    RegionInfo::new("eu-north-1", "Europe (Stockholm)"),
    RegionInfo::new("eu-south-1", "Europe (Milan)"),
    RegionInfo::new("af-south-1", "Africa (Cape Town)"),
    RegionInfo::new("me-south-1", "Middle East (Bahrain)"),
    RegionInfo::new("ap-south-1", "Asia Pacific (Mumbai)"),
    RegionInfo::new("ap-east-1", "Asia Pacific (Hong Kong)"),
    RegionInfo::new("ap-northeast-1", "Asia Pacific (Tokyo)"),
    RegionInfo::new("ap-northeast-2", "Asia Pacific (Seoul)"),
    RegionInfo::new("ap-northeast-3", "Asia Pacific (Osaka)"),
    RegionInfo::new("ap-southeast-1", "Asia Pacific (Singapore)"),
    RegionInfo::new("ap-southeast-2", "Asia Pacific (Sydney)"),
];

pub(crate) const CLOUDFLARE_R2: &[RegionInfo] = &[
    RegionInfo {
        code: "auto",
        label: "Automatic",
        raw_code: "",
    },
    RegionInfo::new("eu", "European Union jurisdiction"),
    RegionInfo::new("fedramp", "FedRAMP jurisdiction"),
];

pub(crate) const BACKBLAZE_B2: &[RegionInfo] = &[
    RegionInfo::new("us-west-000", "US West (000)"),
    RegionInfo::new("us-west-001", "US West (001)"),
    RegionInfo::new("us-west-002", "US West (002)"),
    RegionInfo::new("us-west-004", "US West (004)"),
    RegionInfo::new("us-east-005", "US East (005)"),
    RegionInfo::new("eu-central-003", "EU Central (003)"),
];

pub(crate) const DIGITALOCEAN_SPACES: &[RegionInfo] = &[
    RegionInfo::new("nyc3", "New York 3"),
    RegionInfo::new("sfo2", "San Francisco 2"),
    RegionInfo::new("sfo3", "San Francisco 3"),
    RegionInfo::new("ams3", "Amsterdam 3"),
    RegionInfo::new("fra1", "Frankfurt 1"),
    RegionInfo::new("lon1", "London 1"),
    RegionInfo::new("sgp1", "Singapore 1"),
    RegionInfo::new("syd1", "Sydney 1"),
    RegionInfo::new("blr1", "Bangalore 1"),
    RegionInfo::new("tor1", "Toronto 1"),
];

pub(crate) const WASABI: &[RegionInfo] = &[
    RegionInfo::new("us-east-1", "US East 1 (N. Virginia)"),
    RegionInfo::new("us-east-2", "US East 2 (N. Virginia)"),
    RegionInfo::new("us-central-1", "US Central 1 (Texas)"),
    RegionInfo::new("us-west-1", "US West 1 (Oregon)"),
    RegionInfo::new("ca-central-1", "CA Central 1 (Toronto)"),
    RegionInfo::new("eu-central-1", "EU Central 1 (Amsterdam)"),
    RegionInfo::new("eu-central-2", "EU Central 2 (Frankfurt)"),
    RegionInfo::new("eu-west-1", "EU West 1 (London)"),
    RegionInfo::new("eu-west-2", "EU West 2 (Paris)"),
    RegionInfo::new("ap-northeast-1", "AP Northeast 1 (Tokyo)"),
    RegionInfo::new("ap-northeast-2", "AP Northeast 2 (Osaka)"),
    RegionInfo::new("ap-southeast-1", "AP Southeast 1 (Singapore)"),
    RegionInfo::new("ap-southeast-2", "AP Southeast 2 (Sydney)"),
];

pub(crate) const VULTR: &[RegionInfo] = &[
    RegionInfo::new("ewr1", "New Jersey"),
    RegionInfo::new("sjc1", "Silicon Valley"),
    RegionInfo::new("ams1", "Amsterdam"),
    RegionInfo::new("blr1", "Bangalore"),
    RegionInfo::new("del1", "Delhi"),
    RegionInfo::new("sgp1", "Singapore"),
];

pub(crate) const LINODE: &[RegionInfo] = &[
    RegionInfo::new("us-east-1", "Newark, NJ"),
    RegionInfo::new("us-southeast-1", "Atlanta, GA"),
    RegionInfo::new("us-iad-1", "Washington, DC"),
    RegionInfo::new("us-ord-1", "Chicago, IL"),
    RegionInfo::new("eu-central-1", "Frankfurt, DE"),
    RegionInfo::new("fr-par-1", "Paris, FR"),
    RegionInfo::new("se-sto-1", "Stockholm, SE"),
    RegionInfo::new("ap-south-1", "Singapore, SG"),
    RegionInfo::new("jp-osa-1", "Osaka, JP"),
    RegionInfo::new("in-maa-1", "Chennai, IN"),
];

pub(crate) const MEGA_S4: &[RegionInfo] = &[
    RegionInfo::new("eu-central-1", "Amsterdam"),
    RegionInfo::new("eu-central-2", "Bettembourg"),
    RegionInfo::new("ca-central-1", "Montreal"),
    RegionInfo::new("ca-west-1", "Vancouver"),
];

pub(crate) const HETZNER: &[RegionInfo] = &[
    RegionInfo::new("fsn1", "Falkenstein"),
    RegionInfo::new("nbg1", "Nuremberg"),
    RegionInfo::new("hel1", "Helsinki"),
];

pub(crate) const SCALEWAY: &[RegionInfo] = &[
    RegionInfo::new("fr-par", "Paris"),
    RegionInfo::new("nl-ams", "Amsterdam"),
    RegionInfo::new("pl-waw", "Warsaw"),
];
