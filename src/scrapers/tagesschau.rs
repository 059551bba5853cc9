//! tagesschau scraper.
//!
//! Stage one reads the daily video archive on
//! [tagesschau.de](https://www.tagesschau.de) and picks the most recent
//! "tagesschau" entry. Stage two opens that entry's page and picks a direct
//! download link from `download.media.tagesschau.de`.
//!
//! # URL Pattern
//!
//! The archive lives at
//! `https://www.tagesschau.de/multimedia/video/videoarchiv2~_date-YYYYMMDD.html`.

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{ArchiveEntry, BroadcastDate};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const BASE_URL: &str = "https://www.tagesschau.de";

/// Exact heading text of a tagesschau archive entry.
pub const HEADING: &str = "tagesschau";

/// Caption format of an archive entry, e.g. `01.01.2024 20:00 Uhr`.
const CAPTION_FORMAT: &str = "%d.%m.%Y %H:%M Uhr";

static THUMBNAIL_MODULE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mod.modA.modThumbnail").expect("valid selector"));
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h4").expect("valid selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
static CAPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.dachzeile").expect("valid selector"));
static DOWNLOAD_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//download\.media\.tagesschau\.de/.*").expect("valid regex"));

/// URL of the video archive for `date`.
pub fn archive_url(date: BroadcastDate) -> String {
    format!(
        "{BASE_URL}/multimedia/video/videoarchiv2~_date-{}.html",
        date.format("%Y%m%d")
    )
}

/// Find the page of the latest tagesschau broadcast aired on `date`.
///
/// Returns `Ok(None)` when the archive has no tagesschau entry yet, which is
/// normal early in the day.
#[instrument(level = "info", skip(fetcher))]
pub async fn find_latest_page(fetcher: &dyn Fetch, date: BroadcastDate) -> Result<Option<String>> {
    let url = archive_url(date);
    let html = fetcher.get_text(&url, &[]).await?;
    let entries = parse_archive(&html, &url)?;

    info!(count = entries.len(), source = %url, "Indexed tagesschau archive entries");
    debug!(entries = ?entries, "tagesschau entries");

    Ok(latest_entry(entries).map(|entry| entry.url))
}

/// Parse every tagesschau entry from an archive page.
///
/// Thumbnail modules whose heading is not exactly [`HEADING`], or that lack a
/// link or caption, are skipped. A caption that does not parse as a timestamp
/// is a malformed page.
pub fn parse_archive(html: &str, page_url: &str) -> Result<Vec<ArchiveEntry>> {
    let base = Url::parse(BASE_URL)?;
    let document = Html::parse_document(html);

    let mut entries = Vec::new();
    for module in document.select(&THUMBNAIL_MODULE) {
        let Some(heading) = module.select(&HEADING_SELECTOR).next() else {
            continue;
        };
        if heading.text().collect::<String>().trim() != HEADING {
            continue;
        }

        let href = heading
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"));
        let caption = module.select(&CAPTION_SELECTOR).next();
        let (Some(href), Some(caption)) = (href, caption) else {
            debug!("Skipping tagesschau module without link or caption");
            continue;
        };

        let caption = caption.text().collect::<String>();
        let published = NaiveDateTime::parse_from_str(caption.trim(), CAPTION_FORMAT)
            .map_err(|e| Error::malformed(page_url, format!("caption {caption:?}: {e}")))?;

        entries.push(ArchiveEntry {
            published,
            url: base.join(href)?.to_string(),
        });
    }
    Ok(entries)
}

/// Pick the entry with the latest timestamp.
///
/// Among entries sharing the latest timestamp the last one in page order wins.
pub fn latest_entry(entries: Vec<ArchiveEntry>) -> Option<ArchiveEntry> {
    entries.into_iter().max_by_key(|entry| entry.published)
}

/// Resolve a direct video URL from a tagesschau broadcast page.
///
/// Returns `Ok(None)` when the page carries no download link.
#[instrument(level = "info", skip(fetcher))]
pub async fn extract_video_url(fetcher: &dyn Fetch, page_url: &str) -> Result<Option<String>> {
    let html = fetcher.get_text(page_url, &[]).await?;
    let links = parse_download_links(&html);
    info!(count = links.len(), "Found tagesschau download links");

    match highest_quality(&links) {
        Some(href) => Ok(Some(absolutize(href)?)),
        None => {
            warn!(%page_url, "tagesschau page has no download links");
            Ok(None)
        }
    }
}

/// All anchor targets on the page that point at the download host, in page order.
pub fn parse_download_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| DOWNLOAD_LINK.is_match(href))
        .map(str::to_string)
        .collect()
}

/// The page lists download links from lowest to highest quality, so the last
/// one is the best. If tagesschau.de ever reorders them this needs a real
/// ranking (e.g. by the `webxl`/`webl`/`webm` infix).
pub fn highest_quality(links: &[String]) -> Option<&str> {
    links.last().map(String::as_str)
}

/// Download links are protocol-relative (`//download.media...`); give them a
/// scheme and leave the rest untouched. Other forms are resolved against
/// [`BASE_URL`].
fn absolutize(href: &str) -> Result<String> {
    if href.starts_with("//") {
        return Ok(format!("https:{href}"));
    }
    Ok(Url::parse(BASE_URL)?.join(href)?.to_string())
}
