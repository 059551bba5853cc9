//! Data models shared by the scrapers and the front ends.
//!
//! - [`Broadcast`]: which news show to resolve
//! - [`ArchiveEntry`]: one tagesschau entry from the daily video archive
//! - [`DownloadDialogConfig`]: the JSON blob behind the heute download button
//! - [`PtmdResponse`] and friends: the typed heute player API response
//!
//! Nothing here outlives a single pipeline invocation.

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// A calendar date used to build listing-page URLs.
pub type BroadcastDate = NaiveDate;

/// The broadcasts this crate knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Broadcast {
    /// ARD tagesschau, resolved through the tagesschau.de video archive.
    Tagesschau,
    /// ZDF heute, resolved through the "Sendung verpasst" page and the player API.
    Heute,
}

impl Broadcast {
    /// Route/argument name, e.g. `"tagesschau"`.
    pub fn name(self) -> &'static str {
        match self {
            Broadcast::Tagesschau => "tagesschau",
            Broadcast::Heute => "heute",
        }
    }

    /// Human-facing name used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            Broadcast::Tagesschau => "tagesschau",
            Broadcast::Heute => "ZDF heute",
        }
    }
}

impl fmt::Display for Broadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tagesschau archive entry: when it aired and where its page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub published: NaiveDateTime,
    pub url: String,
}

/// Configuration embedded in the `data-dialog` attribute of the heute
/// download button.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDialogConfig {
    /// Bearer token for the player API.
    pub api_token: String,
    /// API URL template containing a `{playerId}` placeholder.
    pub content_url: String,
}

/// Top level of the heute player API response.
///
/// Each `priorityList` entry is a different container format; only the
/// first one is used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtmdResponse {
    pub priority_list: Vec<PriorityEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PriorityEntry {
    /// Always a single element in practice.
    pub formitaeten: Vec<Formitaet>,
}

#[derive(Debug, Deserialize)]
pub struct Formitaet {
    pub qualities: Vec<QualityVariant>,
}

/// One encoding tier of a broadcast.
#[derive(Debug, Deserialize)]
pub struct QualityVariant {
    /// Quality label such as `"hd"`, `"veryhigh"` or `"high"`.
    pub quality: String,
    pub audio: Audio,
}

/// Despite the name, the tracks listed here point at the video files.
#[derive(Debug, Deserialize)]
pub struct Audio {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct Track {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_names() {
        assert_eq!(Broadcast::Tagesschau.to_string(), "tagesschau");
        assert_eq!(Broadcast::Heute.to_string(), "heute");
        assert_eq!(Broadcast::Heute.display_name(), "ZDF heute");
    }

    #[test]
    fn test_broadcast_from_value_enum() {
        assert_eq!(
            Broadcast::from_str("heute", false).unwrap(),
            Broadcast::Heute
        );
        assert!(Broadcast::from_str("foo", false).is_err());
    }

    #[test]
    fn test_download_dialog_deserialization() {
        let json = r#"{
            "apiToken": "abc123",
            "contentUrl": "https://api.zdf.de/tmd/2/{playerId}/vod/ptmd/mediathek/240101_1900_sendung_h19",
            "title": "Download"
        }"#;

        let config: DownloadDialogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_token, "abc123");
        assert!(config.content_url.contains("{playerId}"));
    }

    #[test]
    fn test_download_dialog_missing_token_is_rejected() {
        let json = r#"{"contentUrl": "https://api.zdf.de/{playerId}"}"#;
        assert!(serde_json::from_str::<DownloadDialogConfig>(json).is_err());
    }

    #[test]
    fn test_ptmd_response_ignores_extra_keys() {
        let json = r#"{
            "priorityList": [{
                "formitaeten": [{
                    "type": "h264_aac_mp4_http_na_na",
                    "qualities": [{
                        "quality": "hd",
                        "hd": true,
                        "audio": {"tracks": [{"uri": "https://example.com/hd.mp4", "class": "main"}]}
                    }]
                }]
            }]
        }"#;

        let response: PtmdResponse = serde_json::from_str(json).unwrap();
        let quality = &response.priority_list[0].formitaeten[0].qualities[0];
        assert_eq!(quality.quality, "hd");
        assert_eq!(quality.audio.tracks[0].uri, "https://example.com/hd.mp4");
    }
}
