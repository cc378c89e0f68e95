use caption_store::ArtifactStore;

use crate::{config::PipelineConfig, yt::CaptionSource, DigestProcessor, Summarizer};

pub struct DigestProcessorBuilder<S = (), C = (), Z = ()> {
    config: PipelineConfig,
    store: S,
    captions: C,
    summarizer: Z,
}

impl DigestProcessorBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            store: (),
            captions: (),
            summarizer: (),
        }
    }
}

impl Default for DigestProcessorBuilder {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<S, C, Z> DigestProcessorBuilder<S, C, Z> {
    pub fn store<S2: ArtifactStore + Send + Sync>(
        self,
        store: S2,
    ) -> DigestProcessorBuilder<S2, C, Z> {
        DigestProcessorBuilder {
            config: self.config,
            store,
            captions: self.captions,
            summarizer: self.summarizer,
        }
    }

    pub fn captions<C2: CaptionSource + Send + Sync>(
        self,
        captions: C2,
    ) -> DigestProcessorBuilder<S, C2, Z> {
        DigestProcessorBuilder {
            config: self.config,
            store: self.store,
            captions,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<Z2: Summarizer + Send + Sync>(
        self,
        summarizer: Z2,
    ) -> DigestProcessorBuilder<S, C, Z2> {
        DigestProcessorBuilder {
            config: self.config,
            store: self.store,
            captions: self.captions,
            summarizer,
        }
    }

    pub fn min_caption_length(mut self, min_caption_length: usize) -> Self {
        self.config.min_caption_length = min_caption_length;
        self
    }
}

impl<S, C, Z> DigestProcessorBuilder<S, C, Z>
where
    S: ArtifactStore + Send + Sync,
    C: CaptionSource + Send + Sync,
    Z: Summarizer + Send + Sync,
{
    pub fn build(self) -> DigestProcessor<S, C, Z> {
        DigestProcessor {
            config: self.config,
            store: self.store,
            captions: self.captions,
            summarizer: self.summarizer,
        }
    }
}
