use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{store::ArtifactStore, ArtifactKind, SafeKey};

/// Stores transcripts as `<captions_dir>/<key>.txt` and summaries as
/// `<summaries_dir>/<key>_summary.md`
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    captions_dir: PathBuf,
    summaries_dir: PathBuf,
}

impl FsArtifactStore {
    /// Creates both output directories if they do not exist yet
    pub async fn init(
        captions_dir: impl Into<PathBuf>,
        summaries_dir: impl Into<PathBuf>,
    ) -> anyhow::Result<Self> {
        let store = FsArtifactStore {
            captions_dir: captions_dir.into(),
            summaries_dir: summaries_dir.into(),
        };

        for dir in [&store.captions_dir, &store.summaries_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .inspect_err(|e| tracing::error!(error = ?e, path = ?dir, "Failed to create directory"))
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        Ok(store)
    }

    pub fn captions_dir(&self) -> &Path {
        &self.captions_dir
    }

    pub fn summaries_dir(&self) -> &Path {
        &self.summaries_dir
    }

    pub fn path_for(&self, kind: ArtifactKind, key: &SafeKey) -> PathBuf {
        match kind {
            ArtifactKind::Transcript => self.captions_dir.join(format!("{key}.txt")),
            ArtifactKind::Summary => self.summaries_dir.join(format!("{key}_summary.md")),
        }
    }
}

impl ArtifactStore for FsArtifactStore {
    async fn exists(&self, kind: ArtifactKind, key: &SafeKey) -> anyhow::Result<bool> {
        let path = self.path_for(kind, key);
        tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check {kind} artifact at {}", path.display()))
    }

    async fn write(&self, kind: ArtifactKind, key: &SafeKey, content: &str) -> anyhow::Result<()> {
        let path = self.path_for(kind, key);
        tokio::fs::write(&path, content)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, path = ?path, "Failed to write {kind}"))
            .with_context(|| format!("Failed to write {kind} artifact to {}", path.display()))?;

        tracing::debug!(path = ?path, bytes = content.len(), "Wrote {kind}");
        Ok(())
    }
}
