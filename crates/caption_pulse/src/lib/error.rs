#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to obtain a caption track for a video
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    /// The requested track does not exist for this video. Expected for many
    /// videos and handled as a skip, not an error.
    #[error("No '{language}' caption track for video {video_id}")]
    TrackMissing { video_id: String, language: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
