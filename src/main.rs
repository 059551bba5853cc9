//! `nachrichten` CLI.
//!
//! Resolves the latest tagesschau or heute video and prints its URL.
//!
//! ## Usage
//!
//! ```sh
//! mpv "$(nachrichten tagesschau)"
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: the URL was printed on stdout
//! - `1`: bad arguments, or no broadcast/video found (stderr names the page to
//!   check manually), or an unexpected failure

use chrono::Local;
use clap::{Parser, error::ErrorKind};
use nachrichten::cli::{Cli, EXIT_FAILURE, run, usage};
use nachrichten::fetch::HttpFetcher;
use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    nachrichten::utils::init_tracing();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!(error = %e, "Invalid arguments");
            eprintln!("{}", usage(&program));
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };
    debug!(?args, "Parsed CLI arguments");

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;

    let status = run(
        &fetcher,
        args.broadcast,
        date,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await?;
    Ok(ExitCode::from(status))
}
