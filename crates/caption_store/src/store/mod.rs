use std::{fmt, future::Future};

use crate::SafeKey;

pub mod fs;

/// The two artifacts persisted for every processed video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Transcript,
    Summary,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Transcript => f.write_str("transcript"),
            ArtifactKind::Summary => f.write_str("summary"),
        }
    }
}

pub trait ArtifactStore {
    fn exists(
        &self,
        kind: ArtifactKind,
        key: &SafeKey,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn write(
        &self,
        kind: ArtifactKind,
        key: &SafeKey,
        content: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: ArtifactStore + Send + Sync> ArtifactStore for &T {
    async fn exists(&self, kind: ArtifactKind, key: &SafeKey) -> anyhow::Result<bool> {
        (**self).exists(kind, key).await
    }

    async fn write(&self, kind: ArtifactKind, key: &SafeKey, content: &str) -> anyhow::Result<()> {
        (**self).write(kind, key, content).await
    }
}
