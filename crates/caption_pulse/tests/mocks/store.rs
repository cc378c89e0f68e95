use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use caption_store::{ArtifactKind, ArtifactStore, SafeKey};

#[derive(Clone, Default)]
pub struct MockArtifactStore {
    pub existing: HashSet<(ArtifactKind, String)>,
    pub writes: Arc<Mutex<Vec<(ArtifactKind, String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockArtifactStore {
    /// A store that already holds both artifacts for `title`
    pub fn with_done(title: &str) -> Self {
        Self::default()
            .with_existing(ArtifactKind::Transcript, title)
            .with_existing(ArtifactKind::Summary, title)
    }

    pub fn with_existing(mut self, kind: ArtifactKind, title: &str) -> Self {
        self.existing
            .insert((kind, SafeKey::from_title(title).to_string()));
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }

    pub fn written(&self, kind: ArtifactKind) -> Vec<(String, String)> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, key, content)| (key.clone(), content.clone()))
            .collect()
    }
}

impl ArtifactStore for MockArtifactStore {
    async fn exists(&self, kind: ArtifactKind, key: &SafeKey) -> anyhow::Result<bool> {
        Ok(self.existing.contains(&(kind, key.to_string())))
    }

    async fn write(&self, kind: ArtifactKind, key: &SafeKey, content: &str) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.writes
            .lock()
            .unwrap()
            .push((kind, key.to_string(), content.to_string()));
        Ok(())
    }
}
