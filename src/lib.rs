//! doc-loadgen Library
//!
//! A schema-driven load generator for MongoDB. A JSON schema describes the
//! document shape and a weighted mix of find/insert/update/delete operations;
//! a fixed pool of workers issues that mix against a collection and reports
//! latency percentiles per operation kind.
//!
//! # CLI Usage
//!
//! ```bash
//! # 10 workers, 1000 requests against a local server
//! doc-loadgen --schema schema.json
//!
//! # Read from secondaries, report every 30 seconds
//! doc-loadgen --uri mongodb://rs0.example:27017 --db shop --collection orders \
//!   --read-preference secondaryPreferred --report-interval 30s \
//!   --workers 32 --requests 100000 --pool-file policies.json
//!
//! # Exercise a schema without a server
//! doc-loadgen --schema schema.json --dry-run
//! ```

use clap::Parser;
use std::path::PathBuf;

pub mod config;
pub mod run;

pub use run::run_loadtest;

#[derive(Parser, Clone, Debug)]
pub struct LoadOpts {
    /// Path to the JSON schema with properties and operations
    #[arg(long, short = 's', default_value = "schema.json")]
    pub schema: PathBuf,

    /// JSON array of candidate values substituted into filter fields
    #[arg(long)]
    pub pool_file: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(long, default_value = "10")]
    pub workers: usize,

    /// Total number of requests across all workers
    #[arg(long, default_value = "1000")]
    pub requests: u64,

    /// Time between periodic latency reports (e.g., 10s, 1m; 0 disables)
    #[arg(long, default_value = "10s")]
    pub report_interval: String,

    /// Timeout for a single request
    #[arg(long, default_value = "100s")]
    pub request_timeout: String,

    /// Deadline for establishing the connection
    #[arg(long, default_value = "100s")]
    pub connect_timeout: String,

    /// Run against an in-memory store instead of MongoDB
    #[arg(long)]
    pub dry_run: bool,
}
