pub mod captions;
pub mod scraper;

use std::future::Future;

use crate::{error::CaptionError, types::VideoItem};

/// Supplies the raw subtitle text of a video
pub trait CaptionSource {
    /// Returns the caption track as SRT text, or [`CaptionError::TrackMissing`]
    /// when the video has no such track.
    fn fetch_captions(
        &self,
        video: &VideoItem,
    ) -> impl Future<Output = Result<String, CaptionError>> + Send;
}

impl<T: CaptionSource + Send + Sync> CaptionSource for &T {
    async fn fetch_captions(&self, video: &VideoItem) -> Result<String, CaptionError> {
        (**self).fetch_captions(video).await
    }
}
