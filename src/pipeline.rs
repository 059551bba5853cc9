//! Chains the two scraper stages of a broadcast into one resolution.
//!
//! Both front ends go through [`resolve_latest`]: the CLI calls it directly
//! with a date, the HTTP server through the [`Resolve`] trait so tests can
//! swap in canned outcomes.

use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{Broadcast, BroadcastDate};
use crate::scrapers::{heute, tagesschau};
use async_trait::async_trait;
use chrono::Local;
use std::fmt;
use tracing::{info, instrument};

/// Outcome of a pipeline run that did not fail unexpectedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Direct URL of the video file.
    Found(String),
    /// The listing page had no matching broadcast.
    PageNotFound {
        broadcast: Broadcast,
        listing_url: String,
    },
    /// The broadcast page had no usable download.
    VideoNotFound {
        broadcast: Broadcast,
        page_url: String,
    },
}

impl Resolution {
    pub fn video_url(&self) -> Option<&str> {
        match self {
            Resolution::Found(url) => Some(url),
            _ => None,
        }
    }
}

/// `Found` prints the bare URL; the misses print a line pointing a human at
/// the page to check.
impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Found(url) => f.write_str(url),
            Resolution::PageNotFound {
                broadcast,
                listing_url,
            } => write!(
                f,
                "Could not find {} page URL, please check {listing_url} manually",
                broadcast.display_name()
            ),
            Resolution::VideoNotFound {
                broadcast,
                page_url,
            } => write!(
                f,
                "Could not get {} video URL from page, please check {page_url} manually",
                broadcast.display_name()
            ),
        }
    }
}

/// Resolve the video of the latest `broadcast` aired on `date`.
#[instrument(level = "info", skip(fetcher))]
pub async fn resolve_latest(
    fetcher: &dyn Fetch,
    broadcast: Broadcast,
    date: BroadcastDate,
) -> Result<Resolution> {
    let (listing_url, page) = match broadcast {
        Broadcast::Tagesschau => (
            tagesschau::archive_url(date),
            tagesschau::find_latest_page(fetcher, date).await?,
        ),
        Broadcast::Heute => (
            heute::listing_url(date),
            heute::find_latest_page(fetcher, date).await?,
        ),
    };

    let Some(page_url) = page else {
        info!(%listing_url, "No broadcast page found");
        return Ok(Resolution::PageNotFound {
            broadcast,
            listing_url,
        });
    };

    let video = match broadcast {
        Broadcast::Tagesschau => tagesschau::extract_video_url(fetcher, &page_url).await?,
        Broadcast::Heute => heute::extract_video_url(fetcher, &page_url).await?,
    };

    Ok(match video {
        Some(url) => Resolution::Found(url),
        None => Resolution::VideoNotFound {
            broadcast,
            page_url,
        },
    })
}

/// Resolves the latest broadcast for "now"; injected into the HTTP server.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, broadcast: Broadcast) -> Result<Resolution>;
}

/// [`Resolve`] that scrapes the live sites for today's local date.
#[derive(Debug, Clone)]
pub struct LiveResolver<F> {
    fetcher: F,
}

impl<F: Fetch> LiveResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<F: Fetch> Resolve for LiveResolver<F> {
    async fn resolve(&self, broadcast: Broadcast) -> Result<Resolution> {
        let today = Local::now().date_naive();
        resolve_latest(&self.fetcher, broadcast, today).await
    }
}
