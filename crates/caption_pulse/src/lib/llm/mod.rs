pub mod openai;
pub mod prompt;
pub mod stream;
pub mod summarizer;

pub use summarizer::{Summarizer, SummaryResult};
