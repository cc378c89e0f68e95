use std::{io::Write, time::Duration};

use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use tokio_util::{
    codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead},
    io::StreamReader,
};

use crate::{
    config::ModelConfig,
    llm::{
        prompt::PromptBuilder,
        stream::{Phase, StreamDecoder, StreamEvent},
        Summarizer, SummaryResult,
    },
};

/// Client for OpenAI compatible `/chat/completions` endpoints that stream
/// reasoning and answer tokens on separate channels
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    api_key: Option<String>,
    config: ModelConfig,
    prompt: PromptBuilder,
    echo: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Timed out after {0:?} waiting for {1}")]
    Timeout(Duration, &'static str),
    #[error("Stream error: {0}")]
    Stream(#[from] AnyDelimiterCodecError),
}

impl ChatCompletionsClient {
    /// Longer lines are dropped
    const MAX_FRAME_BYTES: usize = 1 << 20;
    /// Longer lines end the stream with [`ChatError::Stream`]
    const MAX_BUFFERED_BYTES: usize = 16 << 20;

    pub fn new(config: ModelConfig, api_key: Option<String>) -> Result<Self, ChatError> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            config,
            prompt: PromptBuilder::default(),
            echo: false,
        })
    }

    pub fn with_prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Mirror the streamed reasoning and answer to stderr as they arrive
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(&self, prompt: String) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "stream": true,
            "enable_thinking": self.config.enable_thinking,
            "thinking_budget": self.config.thinking_budget
        })
    }

    /// Sends one streaming completion request and decodes the response body
    #[tracing::instrument(skip_all, fields(model = %self.config.model))]
    pub async fn send_streaming_request(
        &self,
        api_key: &str,
        prompt: String,
    ) -> Result<Option<SummaryResult>, ChatError> {
        let timeout = self.config.request_timeout;
        let request = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send();

        let resp = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ChatError::Timeout(timeout, "response headers"))?
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = tokio::time::timeout(timeout, resp.text())
                .await
                .map_err(|_| ChatError::Timeout(timeout, "error body"))?
                .unwrap_or_default();
            return Err(ChatError::Api { status, message });
        }

        let body = StreamReader::new(resp.bytes_stream().map_err(std::io::Error::other));
        let mut frames = std::pin::pin!(FramedRead::new(
            body,
            AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), Self::MAX_BUFFERED_BYTES),
        ));

        let mut decoder = StreamDecoder::new();
        while let Some(frame) = tokio::time::timeout(timeout, frames.next())
            .await
            .map_err(|_| ChatError::Timeout(timeout, "the next stream frame"))?
        {
            let frame = frame?;
            if frame.len() > Self::MAX_FRAME_BYTES {
                tracing::warn!(bytes = frame.len(), "Skipping oversized stream frame");
                continue;
            }
            let line = String::from_utf8_lossy(&frame);
            if decoder.feed(&line, |event| self.observe(event)).is_break() {
                break;
            }
        }

        if self.echo {
            eprintln!();
        }

        Ok(decoder.finish())
    }

    fn observe(&self, event: StreamEvent<'_>) {
        match event {
            StreamEvent::PhaseChanged(Phase::Reasoning) => {
                tracing::info!("Model started reasoning");
                if self.echo {
                    eprintln!("\n--- reasoning ---");
                }
            }
            StreamEvent::PhaseChanged(Phase::Answer) => {
                tracing::info!("Model started answering");
                if self.echo {
                    eprintln!("\n--- summary ---");
                }
            }
            StreamEvent::Reasoning(text) | StreamEvent::Answer(text) => {
                if self.echo {
                    let mut stderr = std::io::stderr().lock();
                    let _ = stderr.write_all(text.as_bytes());
                    let _ = stderr.flush();
                }
            }
        }
    }
}

impl Summarizer for ChatCompletionsClient {
    type Error = ChatError;

    #[tracing::instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    async fn summarize(
        &self,
        transcript: &str,
        title: &str,
    ) -> Result<Option<SummaryResult>, Self::Error> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("No API key configured, skipping summarization");
            return Ok(None);
        };

        let prompt = self.prompt.render(title, transcript);
        let result = self
            .send_streaming_request(api_key, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        if result.is_none() {
            tracing::warn!("Model returned no summary text");
        }

        Ok(result)
    }
}
