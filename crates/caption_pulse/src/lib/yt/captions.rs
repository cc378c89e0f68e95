use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::Context;
use tokio::process::Command;

use crate::{error::CaptionError, types::VideoItem, yt::CaptionSource};

/// Pulls auto generated caption tracks through the `yt-dlp` binary.
///
/// Tracks are written into `workdir` as `{video_id}.{language}.srt`, read
/// back and removed again.
#[derive(Debug, Clone)]
pub struct YtDlpCaptions {
    binary: PathBuf,
    workdir: PathBuf,
    language: String,
}

impl YtDlpCaptions {
    pub const DEFAULT_BINARY: &str = "yt-dlp";
    pub const DEFAULT_LANGUAGE: &str = "en";

    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            binary: PathBuf::from(Self::DEFAULT_BINARY),
            workdir: workdir.into(),
            language: Self::DEFAULT_LANGUAGE.into(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn track_path(&self, video_id: &str) -> PathBuf {
        self.workdir
            .join(format!("{video_id}.{}.srt", self.language))
    }

    async fn download_track(&self, video: &VideoItem) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.workdir)
            .await
            .with_context(|| format!("Failed to create {}", self.workdir.display()))?;

        let template = self.workdir.join(format!("{}.%(ext)s", video.video_id));

        let result = Command::new(&self.binary)
            .arg("--skip-download")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(&self.language)
            .arg("--sub-format")
            .arg("srt/vtt/best")
            .arg("--convert-subs")
            .arg("srt")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--output")
            .arg(&template)
            .arg(video.watch_url())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                anyhow::bail!("{} not found on PATH", self.binary.display())
            }
            Err(e) => anyhow::bail!("Failed to run {}: {e}", self.binary.display()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp exited with {}: {}", output.status, stderr.trim());
        }

        Ok(())
    }
}

impl CaptionSource for YtDlpCaptions {
    #[tracing::instrument(skip(self, video), fields(video_id = %video.video_id))]
    async fn fetch_captions(&self, video: &VideoItem) -> Result<String, CaptionError> {
        self.download_track(video)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to download captions"))?;

        // yt-dlp exits cleanly when the requested track does not exist
        let path = self.track_path(&video.video_id);
        let srt = match tokio::fs::read_to_string(&path).await {
            Ok(srt) => srt,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CaptionError::TrackMissing {
                    video_id: video.video_id.clone(),
                    language: self.language.clone(),
                });
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to read {}", path.display()))
                    .into())
            }
        };

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!(error = %e, "Failed to remove {}", path.display());
        }

        Ok(srt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_path() {
        let captions = YtDlpCaptions::new("/tmp/caption-pulse").with_language("de");
        assert_eq!(
            captions.track_path("abc123"),
            PathBuf::from("/tmp/caption-pulse/abc123.de.srt")
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let workdir = tempfile::tempdir().unwrap();
        let captions = YtDlpCaptions::new(workdir.path())
            .with_binary("/nonexistent/yt-dlp-binary");

        let err = captions
            .fetch_captions(&VideoItem::new("abc123", "Title"))
            .await
            .unwrap_err();

        assert!(matches!(err, CaptionError::Other(_)));
        assert!(err.to_string().contains("not found"));
    }
}
