use std::fmt;

use crate::{llm::SummaryResult, types::VideoItem};

pub const SUMMARY_PLACEHOLDER: &str = "Summarization failed, please try again later.";

/// Markdown body of a summary artifact
pub struct SummaryDocument<'a> {
    pub video: &'a VideoItem,
    pub summary: Option<&'a SummaryResult>,
    pub transcript: &'a str,
}

impl fmt::Display for SummaryDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.video.watch_url();
        write!(f, "# {}\n\n", self.video.title)?;
        write!(f, "**Video link**: [{url}]({url})\n\n")?;

        if let Some(reasoning) = self
            .summary
            .map(|s| s.reasoning.trim())
            .filter(|r| !r.is_empty())
        {
            write!(f, "## Reasoning\n\n```\n{reasoning}\n```\n\n")?;
        }

        f.write_str("## Summary\n\n")?;
        match self.summary {
            Some(summary) => f.write_str(&summary.answer)?,
            None => f.write_str(SUMMARY_PLACEHOLDER)?,
        }

        write!(f, "\n\n## Transcript\n\n{}", self.transcript)
    }
}
