//! # Nachrichten
//!
//! Finds the latest episode of the German news broadcasts *tagesschau* (ARD)
//! and *heute* (ZDF) on their public websites and resolves a direct URL to the
//! video file.
//!
//! ## Front Ends
//!
//! - `nachrichten <tagesschau|heute>` prints the URL
//! - `nachrichten-server` answers `GET /tagesschau` and `GET /heute` with a
//!   302 redirect to the URL
//!
//! ## Architecture
//!
//! Each broadcast runs a two-stage pipeline:
//! 1. **Listing**: find the latest broadcast page for a date
//! 2. **Extraction**: pull the video URL out of that page (for heute via an
//!    authenticated player API call)
//!
//! Nothing is cached or persisted between invocations.

pub mod cli;
pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod scrapers;
pub mod server;
pub mod utils;

pub use error::{Error, Result};
pub use models::Broadcast;
pub use pipeline::{LiveResolver, Resolution, Resolve, resolve_latest};
