//! CLI argument parsing for ads-registry.

use clap::Parser;
use std::path::PathBuf;

/// Sort, deduplicate and validate an app-ads.txt registry, then verify its
/// certification authority ids.
#[derive(Parser, Debug, Default)]
#[command(name = "ads-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Registry file to reconcile in place (default: app-ads.txt)
    pub file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    // === Verification ===
    /// Registry lookup endpoint; the id is appended as `q=<id>`
    #[arg(long)]
    pub lookup_url: Option<String>,

    /// Maximum number of outstanding lookups
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Retries allowed after a lookup timeout
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Only reconcile the file, do not contact the registry
    #[arg(long, default_value_t = false)]
    pub skip_verification: bool,

    // === Output ===
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub summary_json: bool,
}
