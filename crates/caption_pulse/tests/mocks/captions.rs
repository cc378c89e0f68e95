use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use caption_pulse::{types::VideoItem, yt::CaptionSource, CaptionError};

#[derive(Clone)]
pub enum CaptionReply {
    Track(String),
    Missing,
    Fail(String),
}

/// Answers every video with `default` unless overridden per video id
#[derive(Clone)]
pub struct MockCaptionSource {
    pub default: CaptionReply,
    pub overrides: HashMap<String, CaptionReply>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCaptionSource {
    pub fn new(srt: &str) -> Self {
        Self::replying(CaptionReply::Track(srt.to_string()))
    }

    pub fn missing() -> Self {
        Self::replying(CaptionReply::Missing)
    }

    pub fn failing(msg: &str) -> Self {
        Self::replying(CaptionReply::Fail(msg.to_string()))
    }

    fn replying(default: CaptionReply) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(mut self, video_id: &str, reply: CaptionReply) -> Self {
        self.overrides.insert(video_id.to_string(), reply);
        self
    }
}

impl CaptionSource for MockCaptionSource {
    async fn fetch_captions(&self, video: &VideoItem) -> Result<String, CaptionError> {
        self.calls.lock().unwrap().push(video.video_id.clone());

        match self.overrides.get(&video.video_id).unwrap_or(&self.default) {
            CaptionReply::Track(srt) => Ok(srt.clone()),
            CaptionReply::Missing => Err(CaptionError::TrackMissing {
                video_id: video.video_id.clone(),
                language: "en".into(),
            }),
            CaptionReply::Fail(msg) => Err(CaptionError::Other(anyhow::anyhow!("{}", msg))),
        }
    }
}
