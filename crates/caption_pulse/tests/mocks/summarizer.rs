use std::sync::{Arc, Mutex};

use caption_pulse::{Summarizer, SummaryResult};

#[derive(Clone)]
pub struct MockSummarizer {
    pub result: Option<SummaryResult>,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(answer: &str, reasoning: &str) -> Self {
        Self {
            result: Some(SummaryResult {
                answer: answer.to_string(),
                reasoning: reasoning.to_string(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// Behaves like a model that produced no usable answer
    pub fn empty() -> Self {
        Self {
            result: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            result: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    async fn summarize(
        &self,
        transcript: &str,
        title: &str,
    ) -> Result<Option<SummaryResult>, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), transcript.to_string()));
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.result.clone())
    }
}
