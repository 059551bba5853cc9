//! ZDF heute scraper.
//!
//! Stage one reads the "Sendung verpasst" page on [zdf.de](https://www.zdf.de)
//! for a date and takes the last "ZDF heute Sendung" teaser. Stage two reads
//! the download button of that broadcast page and asks the player API for
//! the available qualities.
//!
//! The player id and quality ranking are reverse-engineered from the ZDF
//! player configuration and may need updating when the API changes.

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{BroadcastDate, DownloadDialogConfig, PtmdResponse, QualityVariant};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const BASE_URL: &str = "https://www.zdf.de";

/// Teaser titles of the main heute broadcasts contain this marker.
pub const TITLE_MARKER: &str = "ZDF heute Sendung";

/// Player id from `ZDFplayer/configs/zdf/zdf2016/configuration.json`. The id
/// the download button suggests (`zdf_pd_download_1`) returns no download
/// URLs for some broadcasts.
pub const PLAYER_ID: &str = "ngplayer_2_4";

const PLAYER_ID_PLACEHOLDER: &str = "{playerId}";

const API_AUTH_HEADER: &str = "Api-Auth";

/// Quality labels from best to worst.
pub const QUALITY_RANKING: [&str; 3] = ["hd", "veryhigh", "high"];

static TEASER_ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.b-content-teaser-item").expect("valid selector"));
static TEASER_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.teaser-title-link").expect("valid selector"));
static DOWNLOAD_BUTTON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("button.download-btn").expect("valid selector"));

/// URL of the "Sendung verpasst" listing for `date`.
pub fn listing_url(date: BroadcastDate) -> String {
    format!(
        "{BASE_URL}/sendung-verpasst?airtimeDate={}",
        date.format("%Y-%m-%d")
    )
}

/// Find the page of the latest heute broadcast aired on `date`.
///
/// The listing is already ordered by airtime, so the last match is the latest.
#[instrument(level = "info", skip(fetcher))]
pub async fn find_latest_page(fetcher: &dyn Fetch, date: BroadcastDate) -> Result<Option<String>> {
    let url = listing_url(date);
    let html = fetcher.get_text(&url, &[]).await?;
    let mut pages = parse_listing(&html)?;

    info!(count = pages.len(), source = %url, "Indexed heute broadcasts");
    debug!(pages = ?pages, "heute pages");

    Ok(pages.pop())
}

/// Links of all heute teasers on a listing page, in page order.
pub fn parse_listing(html: &str) -> Result<Vec<String>> {
    let base = Url::parse(BASE_URL)?;
    let document = Html::parse_document(html);

    let mut pages = Vec::new();
    for article in document.select(&TEASER_ARTICLE) {
        let Some(link) = article.select(&TEASER_LINK).next() else {
            debug!("Skipping teaser without title link");
            continue;
        };
        let title = link.value().attr("title").unwrap_or_default();
        if !title.contains(TITLE_MARKER) {
            continue;
        }
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        pages.push(base.join(href)?.to_string());
    }
    Ok(pages)
}

/// Resolve a direct video URL from a heute broadcast page.
///
/// Returns `Ok(None)` only when the page has no download button. Everything
/// after that (API errors, unexpected JSON, unknown quality labels) is an error.
#[instrument(level = "info", skip(fetcher))]
pub async fn extract_video_url(fetcher: &dyn Fetch, page_url: &str) -> Result<Option<String>> {
    let html = fetcher.get_text(page_url, &[]).await?;
    let Some(dialog) = parse_download_dialog(&html, page_url)? else {
        warn!(%page_url, "heute page has no download button");
        return Ok(None);
    };

    let api_url = content_url_for_player(&dialog.content_url);
    let auth = format!("Bearer {}", dialog.api_token);
    let body = fetcher.get_text(&api_url, &[(API_AUTH_HEADER, auth)]).await?;

    let response: PtmdResponse = serde_json::from_str(&body).map_err(|e| {
        Error::malformed(
            &api_url,
            format!("{e}; body: {}", truncate_for_log(&body, 300)),
        )
    })?;

    let quality = best_quality(&response, &api_url)?;
    let track = quality
        .audio
        .tracks
        .first()
        .ok_or_else(|| {
            Error::malformed(
                &api_url,
                format!("no tracks for quality {:?}", quality.quality),
            )
        })?;

    info!(quality = %quality.quality, uri = %track.uri, "Resolved heute video");
    Ok(Some(track.uri.clone()))
}

/// Read the download dialog config from the first download button on the page.
pub fn parse_download_dialog(html: &str, page_url: &str) -> Result<Option<DownloadDialogConfig>> {
    let document = Html::parse_document(html);
    let Some(button) = document.select(&DOWNLOAD_BUTTON).next() else {
        return Ok(None);
    };

    let raw = button
        .value()
        .attr("data-dialog")
        .ok_or_else(|| {
            Error::malformed(page_url, "download button has no data-dialog attribute")
        })?;
    let config = serde_json::from_str(raw)
        .map_err(|e| Error::malformed(page_url, format!("data-dialog: {e}")))?;
    Ok(Some(config))
}

/// Fill [`PLAYER_ID`] into the API URL template.
pub fn content_url_for_player(template: &str) -> String {
    template.replace(PLAYER_ID_PLACEHOLDER, PLAYER_ID)
}

/// Position of `label` in [`QUALITY_RANKING`]; lower is better.
pub fn quality_rank(label: &str) -> Result<usize> {
    QUALITY_RANKING
        .iter()
        .position(|ranked| *ranked == label)
        .ok_or_else(|| Error::UnknownQuality(label.to_string()))
}

/// Pick the best-ranked quality of the first format.
///
/// Every label must be ranked; a single unknown label fails the lookup even if
/// a better one is present. Equal ranks keep the first in response order.
pub fn best_quality<'a>(response: &'a PtmdResponse, api_url: &str) -> Result<&'a QualityVariant> {
    let qualities = &response
        .priority_list
        .first()
        .ok_or_else(|| Error::malformed(api_url, "priorityList is empty"))?
        .formitaeten
        .first()
        .ok_or_else(|| Error::malformed(api_url, "formitaeten is empty"))?
        .qualities;

    let ranked = qualities
        .iter()
        .map(|variant| quality_rank(&variant.quality).map(|rank| (rank, variant)))
        .collect::<Result<Vec<_>>>()?;

    ranked
        .into_iter()
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, variant)| variant)
        .ok_or_else(|| Error::malformed(api_url, "qualities is empty"))
}
