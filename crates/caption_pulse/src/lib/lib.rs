pub mod caption;
pub mod config;
mod error;
mod llm;
pub mod parser;
mod processor;
pub mod render;
pub mod retry;
pub mod stats;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::{CaptionError, Error};
pub use llm::{openai, prompt, stream};
pub use llm::{Summarizer, SummaryResult};
pub use processor::{
    builder::DigestProcessorBuilder, BatchOutcome, DigestProcessor, ItemOutcome, StopReason,
};
