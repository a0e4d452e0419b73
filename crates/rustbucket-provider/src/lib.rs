//! Vendor endpoint resolution for rustbucket.
//!
//! This crate knows how each supported S3-compatible vendor lays out its
//! endpoints:
//!
//! - [`vendor`] - the static vendor table ([`Vendor`], [`VendorSpec`], capabilities)
//! - [`region`] - per-vendor region tables and region policies
//! - [`profile`] - [`ProviderProfile`] construction, [`Endpoint`] resolution and reverse URL matching
//! - [`alternate`] - alternate host patterns (CDN, public, friendly and legacy domains)
//! - [`codec`] - object key encoding and URL construction
//!
//! # Usage
//!
//! ```rust
//! use rustbucket_provider::{ProviderProfile, Vendor};
//!
//! let profile = ProviderProfile::builder(Vendor::CloudflareR2)
//!     .parameter("account_id", "abc123")
//!     .build()
//!     .unwrap();
//! let endpoint = profile.resolve("auto").unwrap();
//! assert_eq!(endpoint.host, "abc123.r2.cloudflarestorage.com");
//! assert_eq!(
//!     endpoint.object_url("photos", "cat pic.jpg").unwrap(),
//!     "https://abc123.r2.cloudflarestorage.com/photos/cat%20pic.jpg"
//! );
//! ```

pub mod alternate;
pub mod codec;
pub mod error;
pub mod profile;
pub mod region;
pub mod vendor;

pub use alternate::{AlternateHost, HostPattern, MatchStyle, ObjectLocation};
pub use codec::{RequestTarget, decode_key, encode_key};
pub use error::ProviderError;
pub use profile::{AddressingStyle, Endpoint, ProviderProfile, ProviderProfileBuilder, Scheme};
pub use region::{RegionInfo, RegionPolicy};
pub use vendor::{Capabilities, Vendor, VendorSpec};
