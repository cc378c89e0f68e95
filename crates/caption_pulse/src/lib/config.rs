use std::time::Duration;

use crate::retry::RetryPolicy;

/// Knobs for the per video pipeline and the batch loop
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Cleaned captions shorter than this (in chars) are skipped
    pub min_caption_length: usize,
    /// Budget for a whole pipeline attempt on one video
    pub item_retry: RetryPolicy,
    /// Budget for the summarization call inside an attempt
    pub summary_retry: RetryPolicy,
    /// The batch gives up after `target * attempt_factor` attempts
    pub attempt_factor: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_caption_length: 100,
            item_retry: RetryPolicy::new(2, Duration::from_secs(2)),
            summary_retry: RetryPolicy::new(3, Duration::from_secs(2)),
            attempt_factor: 3,
        }
    }
}

/// Parameters of the chat completion request
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub enable_thinking: bool,
    pub thinking_budget: u32,
    /// Bounds the wait for response headers and the gap between streamed frames
    pub request_timeout: Duration,
}

impl ModelConfig {
    pub const DEFAULT_API_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";
    pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-R1";
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.into(),
            model: Self::DEFAULT_MODEL.into(),
            temperature: 0.6,
            max_tokens: 10_000,
            enable_thinking: true,
            thinking_budget: 4096,
            request_timeout: Duration::from_secs(60),
        }
    }
}
