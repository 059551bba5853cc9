//! Scrapers for the two broadcasts.
//!
//! Each scraper follows the same two-stage pattern:
//!
//! 1. **Listing**: `find_latest_page(fetcher, date)` finds the page of the
//!    latest broadcast aired on a date
//! 2. **Extraction**: `extract_video_url(fetcher, page_url)` resolves a
//!    direct video URL from that page
//!
//! # Supported Sources
//!
//! | Broadcast | Module | Listing | Extraction |
//! |-----------|--------|---------|------------|
//! | tagesschau | [`tagesschau`] | Daily video archive, max timestamp | Last download link on the page |
//! | ZDF heute | [`heute`] | "Sendung verpasst", last match | Download button + player API |
//!
//! # Common Patterns
//!
//! - Both stages return `Ok(None)` for "nothing there yet"; HTTP failures and
//!   unexpected page or JSON shapes are errors.
//! - HTML is parsed in synchronous helpers that return owned data, so parsed
//!   documents never live across an `.await`.

pub mod heute;
pub mod tagesschau;
