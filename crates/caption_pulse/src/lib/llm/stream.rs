//! # Chat completion stream decoding
//!
//! Streaming chat completion endpoints answer with server sent events, one per
//! line:
//!
//! ```text
//! data: {"choices":[{"delta":{"reasoning_content":"Let me think"}}]}
//! data: {"choices":[{"delta":{"content":"## Key points"}}]}
//! data: [DONE]
//! ```
//!
//! Reasoning models stream their chain of thought on `reasoning_content`
//! before the answer starts arriving on `content`. [`StreamDecoder`] rebuilds
//! both channels frame by frame and reports when the model switches between
//! them.

use std::ops::ControlFlow;

use serde::Deserialize;

use crate::llm::SummaryResult;

pub const DATA_PREFIX: &str = "data: ";
pub const DONE_SENTINEL: &str = "[DONE]";

const THINK_OPEN_TAG: &str = "<think>";
const THINK_CLOSE_TAG: &str = "</think>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Reasoning,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent<'a> {
    /// The model moved to the other channel. Emitted before the delta that
    /// caused the move.
    PhaseChanged(Phase),
    Reasoning(&'a str),
    Answer(&'a str),
}

#[derive(Debug, Deserialize)]
struct ChunkFrame {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    content: Option<String>,
    reasoning_content: Option<String>,
}

#[derive(Debug, Default)]
pub struct StreamDecoder {
    answer: String,
    reasoning: String,
    in_reasoning: bool,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_reasoning(&self) -> bool {
        self.in_reasoning
    }

    /// Feeds one line of the response body.
    ///
    /// Keep-alives, foreign lines and frames that fail to parse are ignored.
    /// Returns [`ControlFlow::Break`] once the terminator frame is seen.
    pub fn feed(&mut self, line: &str, mut on_event: impl FnMut(StreamEvent<'_>)) -> ControlFlow<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return ControlFlow::Continue(());
        };

        if payload.trim() == DONE_SENTINEL {
            return ControlFlow::Break(());
        }

        let frame = match serde_json::from_str::<ChunkFrame>(payload) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(error = %e, frame = payload, "Skipping malformed stream frame");
                return ControlFlow::Continue(());
            }
        };

        let Some(Delta {
            content,
            reasoning_content,
        }) = frame.choices.into_iter().next().map(|choice| choice.delta)
        else {
            return ControlFlow::Continue(());
        };

        if let Some(reasoning) = reasoning_content.filter(|r| !r.is_empty()) {
            if !self.in_reasoning {
                self.in_reasoning = true;
                on_event(StreamEvent::PhaseChanged(Phase::Reasoning));
            }
            self.reasoning.push_str(&reasoning);
            on_event(StreamEvent::Reasoning(&reasoning));
        }

        if let Some(content) = content.filter(|c| !c.is_empty()) {
            // blank deltas (often a lone newline) do not end the reasoning phase
            if self.in_reasoning && !content.trim().is_empty() {
                self.in_reasoning = false;
                on_event(StreamEvent::PhaseChanged(Phase::Answer));
            }
            self.answer.push_str(&content);
            if !self.in_reasoning {
                on_event(StreamEvent::Answer(&content));
            }
        }

        ControlFlow::Continue(())
    }

    /// Consumes the decoder. `None` when the model produced no answer text.
    pub fn finish(self) -> Option<SummaryResult> {
        if self.answer.trim().is_empty() {
            return None;
        }

        let answer = self
            .answer
            .replace(THINK_OPEN_TAG, "")
            .replace(THINK_CLOSE_TAG, "");

        Some(SummaryResult {
            answer,
            reasoning: self.reasoning.trim().to_string(),
        })
    }
}
