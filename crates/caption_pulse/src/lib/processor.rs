pub mod builder;

use anyhow::Context;
use caption_store::{ArtifactKind, ArtifactStore, SafeKey};
use futures::{Stream, StreamExt};

use crate::{
    caption,
    config::PipelineConfig,
    error::CaptionError,
    render::SummaryDocument,
    retry::retry,
    stats::ProcessingStats,
    types::VideoItem,
    yt::CaptionSource,
    Summarizer,
};

/// How a single pipeline attempt on a video ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Both artifacts were already stored
    AlreadyDone,
    NoCaptions,
    TooShort { caption_length: usize },
    Summarized {
        caption_length: usize,
        summary_length: usize,
    },
    /// Stored with the placeholder summary section
    SummaryUnavailable { caption_length: usize },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ItemOutcome::AlreadyDone
                | ItemOutcome::Summarized { .. }
                | ItemOutcome::SummaryUnavailable { .. }
        )
    }

    fn record(&self, stats: &mut ProcessingStats) {
        match *self {
            ItemOutcome::AlreadyDone => stats.record_success(0, 0),
            ItemOutcome::Summarized {
                caption_length,
                summary_length,
            } => stats.record_success(caption_length, summary_length),
            ItemOutcome::SummaryUnavailable { caption_length } => {
                stats.record_success(caption_length, 0)
            }
            ItemOutcome::NoCaptions | ItemOutcome::TooShort { .. } => stats.record_failure(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    /// More than `target * attempt_factor` videos were tried
    AttemptLimit,
    /// Discovery ran out of videos
    Exhausted,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub successes: usize,
    pub attempts: usize,
    pub stop_reason: StopReason,
    pub stats: ProcessingStats,
}

/// Turns discovered videos into transcript and summary artifacts, one at a time
#[derive(Debug)]
pub struct DigestProcessor<S, C, Z>
where
    S: ArtifactStore + Send + Sync,
    C: CaptionSource + Send + Sync,
    Z: Summarizer + Send + Sync,
{
    config: PipelineConfig,
    store: S,
    captions: C,
    summarizer: Z,
}

impl<S, C, Z> DigestProcessor<S, C, Z>
where
    S: ArtifactStore + Send + Sync,
    C: CaptionSource + Send + Sync,
    Z: Summarizer + Send + Sync,
{
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// One pass through the pipeline. Skips come back as `Ok`, only
    /// errors are worth another attempt.
    async fn attempt(&self, video: &VideoItem) -> anyhow::Result<ItemOutcome> {
        let key = SafeKey::from_title(&video.title);

        if self.store.exists(ArtifactKind::Summary, &key).await?
            && self.store.exists(ArtifactKind::Transcript, &key).await?
        {
            tracing::info!(%key, "Artifacts already exist, skipping");
            return Ok(ItemOutcome::AlreadyDone);
        }

        let raw = match self.captions.fetch_captions(video).await {
            Ok(raw) => raw,
            Err(CaptionError::TrackMissing { language, .. }) => {
                tracing::info!(%language, "No caption track, skipping");
                return Ok(ItemOutcome::NoCaptions);
            }
            Err(CaptionError::Other(e)) => return Err(e.context("Failed to fetch captions")),
        };

        self.store
            .write(ArtifactKind::Transcript, &key, &raw)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to store transcript"))?;

        let cleaned = caption::clean(&raw);
        let caption_length = cleaned.chars().count();
        if !caption::is_long_enough(&cleaned, self.config.min_caption_length) {
            tracing::info!(
                caption_length,
                min = self.config.min_caption_length,
                "Captions too short, skipping"
            );
            return Ok(ItemOutcome::TooShort { caption_length });
        }

        let summary = retry(&self.config.summary_retry, "summarize", || {
            self.summarizer.summarize(&cleaned, &video.title)
        })
        .await
        .map_err(Into::<anyhow::Error>::into)
        .context("Failed to summarize transcript")?;

        let document = SummaryDocument {
            video,
            summary: summary.as_ref(),
            transcript: &cleaned,
        };
        self.store
            .write(ArtifactKind::Summary, &key, &document.to_string())
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to store summary"))?;

        Ok(match summary {
            Some(summary) => ItemOutcome::Summarized {
                caption_length,
                summary_length: summary.answer.chars().count(),
            },
            None => {
                tracing::warn!("Stored transcript with placeholder summary");
                ItemOutcome::SummaryUnavailable { caption_length }
            }
        })
    }

    /// Processes one video and records exactly one entry in `stats`.
    ///
    /// Never fails: errors left over after the item retries are logged and
    /// counted as a failure.
    #[tracing::instrument(skip(self, stats), fields(video_id = %video.video_id, title = %video.title))]
    pub async fn process_item(&self, video: &VideoItem, stats: &mut ProcessingStats) -> bool {
        match retry(&self.config.item_retry, "process video", || self.attempt(video)).await {
            Ok(outcome) => {
                outcome.record(stats);
                tracing::info!(?outcome, "Finished video");
                outcome.is_success()
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to process video");
                stats.record_failure();
                false
            }
        }
    }

    /// Works through `videos` until `target` of them succeeded, too many were
    /// tried, or there are none left.
    pub async fn run<I>(&self, videos: I, target: usize) -> BatchOutcome
    where
        I: Stream<Item = VideoItem>,
    {
        self.run_with_stats(videos, target, ProcessingStats::new())
            .await
    }

    /// Same as [`DigestProcessor::run`], adding to `stats` so the report can
    /// cover work done before the batch started (e.g. the search).
    #[tracing::instrument(skip(self, videos, stats))]
    pub async fn run_with_stats<I>(
        &self,
        videos: I,
        target: usize,
        mut stats: ProcessingStats,
    ) -> BatchOutcome
    where
        I: Stream<Item = VideoItem>,
    {
        let mut videos = std::pin::pin!(videos);
        let max_attempts = target.saturating_mul(self.config.attempt_factor);
        let mut successes = 0;
        let mut attempts = 0;

        let stop_reason = loop {
            if successes >= target {
                break StopReason::TargetReached;
            }

            let Some(video) = videos.next().await else {
                tracing::info!("No more videos to process");
                break StopReason::Exhausted;
            };

            attempts += 1;
            if self.process_item(&video, &mut stats).await {
                successes += 1;
            }
            tracing::info!(successes, target, attempts, "Progress");

            if successes < target && attempts > max_attempts {
                tracing::warn!(attempts, "Too many attempts, giving up");
                break StopReason::AttemptLimit;
            }
        };

        BatchOutcome {
            successes,
            attempts,
            stop_reason,
            stats,
        }
    }
}
