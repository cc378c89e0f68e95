use std::{fmt::Display, future::Future};

/// Final output of a summarization call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    /// The summary itself, markdown
    pub answer: String,
    /// What the model streamed on its reasoning channel, may be empty
    pub reasoning: String,
}

pub trait Summarizer {
    type Error: Display + Into<anyhow::Error>;

    /// Summarizes a cleaned transcript.
    ///
    /// `Ok(None)` means there is nothing to store but nothing went wrong either,
    /// e.g. no credentials are configured or the model produced no answer.
    fn summarize(
        &self,
        transcript: &str,
        title: &str,
    ) -> impl Future<Output = Result<Option<SummaryResult>, Self::Error>> + Send;
}
