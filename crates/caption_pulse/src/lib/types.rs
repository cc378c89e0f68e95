use serde::Deserialize;

/// A video picked up by discovery, queued for summarization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoItem {
    pub video_id: String,
    pub title: String,
    pub duration: Option<String>,
    pub view_count: Option<String>,
}

impl VideoItem {
    pub const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";

    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn watch_url(&self) -> String {
        format!("{}?v={}", Self::WATCH_BASE_URL, self.video_id)
    }
}

/// `videoRenderer` object embedded in YouTube's `ytInitialData`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRenderer {
    pub video_id: String,
    pub title: Runs,
    pub length_text: Option<SimpleText>,
    pub view_count_text: Option<SimpleText>,
    pub published_time_text: Option<SimpleText>,
    pub upcoming_event_data: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Runs {
    #[serde(default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Deserialize)]
pub struct Run {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleText {
    pub simple_text: Option<String>,
}
