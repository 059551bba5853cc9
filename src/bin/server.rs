//! `nachrichten-server`: HTTP redirects to the latest tagesschau/heute video.
//!
//! ```sh
//! NACHRICHTEN_BIND=0.0.0.0:5000 nachrichten-server
//! curl -I http://localhost:5000/tagesschau
//! ```

use clap::Parser;
use nachrichten::cli::ServerCli;
use nachrichten::fetch::HttpFetcher;
use nachrichten::server::build_router;
use nachrichten::LiveResolver;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    nachrichten::utils::init_tracing();

    let args = ServerCli::parse();
    debug!(?args, "Parsed CLI arguments");

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let app = build_router(Arc::new(LiveResolver::new(fetcher)));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(addr = %args.bind, "nachrichten server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
