//! # Yt Parser
//!
//! Extracts video results from the `ytInitialData` blob YouTube embeds in its
//! search results page.

use std::{ops::Deref, sync::LazyLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use regex::Regex;

use crate::{
    error::Error,
    types::{VideoItem, VideoRenderer},
};

static YT_INITIAL_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>\s*var\s+ytInitialData\s*=\s*(\{.*?\});\s*</script>").unwrap()
});

/// Collects every playable video from a search results `ytInitialData` value.
///
/// Shelves, channels, playlists, upcoming premieres and live streams (no
/// `lengthText`) are skipped.
#[tracing::instrument(skip(json))]
pub fn parse_search_results(json: &Value) -> Result<Vec<VideoItem>, Error> {
    let sections = json["contents"]["twoColumnSearchResultsRenderer"]["primaryContents"]
        ["sectionListRenderer"]["contents"]
        .as_array()
        .ok_or(Error::ParseError(
            "Failed to get ytInitialData['contents']['twoColumnSearchResultsRenderer']['primaryContents']['sectionListRenderer']['contents']",
        ))?;

    let mut videos = Vec::new();
    for section in sections {
        let Some(items) = section["itemSectionRenderer"]["contents"].as_array() else {
            continue;
        };

        for item in items {
            let Some(renderer) = item.get("videoRenderer") else {
                continue;
            };

            let renderer = match serde_json::from_value::<VideoRenderer>(renderer.clone()) {
                Ok(renderer) => renderer,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed videoRenderer");
                    continue;
                }
            };
            if renderer.upcoming_event_data.is_some() || renderer.length_text.is_none() {
                continue;
            }

            match VideoItem::try_from(renderer) {
                Ok(video) => videos.push(video),
                Err(e) => tracing::debug!(error = %e, "Skipping unparseable video result"),
            }
        }
    }

    Ok(videos)
}

impl TryFrom<VideoRenderer> for VideoItem {
    type Error = Error;

    fn try_from(
        VideoRenderer {
            video_id,
            title,
            length_text,
            view_count_text,
            ..
        }: VideoRenderer,
    ) -> Result<Self, Self::Error> {
        let title = title
            .runs
            .into_iter()
            .map(|run| run.text)
            .collect::<String>();
        if title.trim().is_empty() {
            return Err(Error::ParseError(
                "Failed to get video title via ['title']['runs'][*]['text']",
            ));
        }

        Ok(VideoItem {
            video_id,
            title,
            duration: length_text.and_then(|t| t.simple_text),
            view_count: view_count_text.and_then(|t| t.simple_text),
        })
    }
}

pub struct YtHtmlDocument(String);

impl Deref for YtHtmlDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl YtHtmlDocument {
    pub fn new(doc: String) -> Self {
        YtHtmlDocument(doc)
    }

    pub fn to_json<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        YT_INITIAL_DATA_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(Error::ParseError(
                "Failed to extract ytInitialData from the page's script tag",
            ))
    }
}

impl From<String> for YtHtmlDocument {
    fn from(value: String) -> Self {
        YtHtmlDocument(value)
    }
}
