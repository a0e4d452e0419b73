//! Core configuration types shared across the rustbucket crates.
//!
//! This crate holds the pieces every other crate agrees on: the client
//! configuration loaded from the environment, per-call request options with
//! per-operation timeout hints, and the well-known provider parameter keys.

pub mod config;
pub mod options;
pub mod params;

pub use config::ClientConfig;
pub use options::{OperationTimeouts, RequestOptions};
