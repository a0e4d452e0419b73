//! rustbucket - command-line front end for S3-compatible storage.
//!
//! Configuration comes from the environment (see [`ClientConfig::from_env`]);
//! `--vendor` and `--region` override the corresponding variables.
//!
//! # Usage
//!
//! ```text
//! RUSTBUCKET_VENDOR=cloudflare_r2 RUSTBUCKET_ACCOUNT_ID=abc123 rustbucket endpoint
//! rustbucket presign my-bucket photos/cat.jpg --expires 600
//! rustbucket parse-url https://my-bucket.s3.eu-west-1.amazonaws.com/a.txt
//! rustbucket ls my-bucket --prefix 2024/
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUSTBUCKET_VENDOR` | `aws` | Vendor identifier |
//! | `RUSTBUCKET_REGION` | *(vendor default)* | Region code |
//! | `RUSTBUCKET_ACCESS_KEY_ID` | *(unset)* | Access key, falls back to `AWS_ACCESS_KEY_ID` |
//! | `RUSTBUCKET_SECRET_ACCESS_KEY` | *(unset)* | Secret key, falls back to `AWS_SECRET_ACCESS_KEY` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustbucket_client::ReqwestTransport;
use rustbucket_core::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// rustbucket - S3-compatible storage from the command line
#[derive(Debug, Parser)]
#[command(name = "rustbucket", version, about, long_about = None)]
struct Cli {
    /// Vendor identifier (aws, cloudflare_r2, backblaze_b2, generic, ...)
    #[arg(long, global = true)]
    vendor: Option<String>,

    /// Region code
    #[arg(long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the resolved endpoint and vendor capabilities
    Endpoint,

    /// Print the unsigned URL of an object
    Url {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// Print a presigned URL for an object
    Presign {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Validity in seconds (clamped to 1..=604800)
        #[arg(long, default_value_t = 3600)]
        expires: u64,
        /// HTTP method the URL is valid for
        #[arg(long, default_value = "GET")]
        method: String,
    },

    /// Recover bucket and key from a URL of the configured vendor
    ParseUrl {
        /// URL to parse
        url: String,
    },

    /// Check a presigned URL against the configured credentials
    Verify {
        /// Presigned URL
        url: String,
        /// HTTP method the URL was signed for
        #[arg(long, default_value = "GET")]
        method: String,
    },

    /// List buckets
    Buckets,

    /// List objects in a bucket
    Ls {
        /// Bucket name
        bucket: String,
        /// Only keys under this prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Follow continuation tokens and list everything, without grouping by `/`
        #[arg(long, short)]
        recursive: bool,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so command output stays machine-readable.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Apply command-line overrides on top of the environment configuration.
fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(vendor) = &cli.vendor {
        config.vendor.clone_from(vendor);
    }
    if let Some(region) = &cli.region {
        config.region.clone_from(region);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    init_tracing(&config.log_level)?;

    info!(
        vendor = %config.vendor,
        region = %config.region,
        version = VERSION,
        "starting rustbucket",
    );

    let output = commands::run(
        &config,
        Arc::new(ReqwestTransport::default()),
        cli.command,
    )
    .await?;
    println!("{output}");
    Ok(())
}
