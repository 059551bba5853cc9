//! Command-line interface definitions for both binaries.
//!
//! All options can be provided via command-line flags or environment variables.
//! [`run`] holds the CLI's output and exit-status rules so they can be tested
//! without a terminal.

use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{Broadcast, BroadcastDate};
use crate::pipeline::{Resolution, resolve_latest};
use clap::Parser;
use std::io::Write;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Exit status for a printed video URL.
pub const EXIT_FOUND: u8 = 0;
/// Exit status for bad arguments or a broadcast/video that is not there yet.
pub const EXIT_FAILURE: u8 = 1;

/// Arguments of the `nachrichten` CLI.
///
/// # Examples
///
/// ```sh
/// # Latest tagesschau of today
/// nachrichten tagesschau
///
/// # Latest heute of a given day, with a shorter timeout
/// nachrichten heute --date 2024-01-01 --timeout-secs 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Broadcast to resolve
    #[arg(value_enum)]
    pub broadcast: Broadcast,

    /// Air date to look up (defaults to today's local date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<BroadcastDate>,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "NACHRICHTEN_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Arguments of the `nachrichten-server` binary.
#[derive(Parser, Debug)]
#[command(author, version, about = "Redirect to the latest tagesschau/heute video")]
pub struct ServerCli {
    /// Address to listen on
    #[arg(long, env = "NACHRICHTEN_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "NACHRICHTEN_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// One-line usage printed for a missing or unknown broadcast.
pub fn usage(program: &str) -> String {
    format!("usage: {program} [tagesschau|heute]")
}

/// Resolve `broadcast` for `date` and report it.
///
/// A found video prints the bare URL on `out` and yields [`EXIT_FOUND`]. A miss
/// prints the manual-check diagnostic on `err` and yields [`EXIT_FAILURE`].
/// Unexpected failures are returned as errors.
pub async fn run(
    fetcher: &dyn Fetch,
    broadcast: Broadcast,
    date: BroadcastDate,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<u8> {
    let start_time = std::time::Instant::now();
    let resolution = resolve_latest(fetcher, broadcast, date).await?;
    info!(elapsed = ?start_time.elapsed(), %broadcast, %date, "Resolution complete");

    match resolution {
        Resolution::Found(url) => {
            writeln!(out, "{url}")?;
            Ok(EXIT_FOUND)
        }
        miss => {
            warn!(%broadcast, "Nothing to print");
            writeln!(err, "{miss}")?;
            Ok(EXIT_FAILURE)
        }
    }
}
