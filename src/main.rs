//! # Main — CLI Entry Point
//!
//! Parses arguments, initializes structured logging, configures the rayon
//! thread pool, and hands off to the search driver in `cli`.
//!
//! ## Options
//!
//! - `LIMIT`: upper bound of the candidate range (inclusive).
//! - `--threads`: rayon pool size (0 = all logical cores).
//! - `--qos`: macOS QoS P-core scheduling via `pthread_set_qos_class_self_np`.
//!
//! Exit code is non-zero when the limit is out of range (0, or large enough
//! that probe values would overflow 64 bits) or when writing to stdout fails.

mod cli;

use anyhow::Result;
use clap::Parser;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "caboose",
    about = "Search for caboose numbers: c such that n^2 - n + c is prime for all n in [0, c)"
)]
pub struct Cli {
    /// Upper bound of the search range (candidates 1..=LIMIT are tested)
    #[arg(env = "CABOOSE_LIMIT")]
    pub limit: u64,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set macOS QoS class to user-initiated for rayon threads (P-core scheduling on Apple Silicon)
    #[arg(long)]
    pub qos: bool,
}

fn main() -> Result<()> {
    // Initialize structured logging: LOG_FORMAT=json for machine consumers,
    // human-readable on stderr otherwise (stdout is reserved for results).
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    cli::configure_rayon(cli.threads, cli.qos);
    cli::run_search(&cli)
}
