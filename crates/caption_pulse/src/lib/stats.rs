use std::{fmt, time::Instant};

use chrono::{DateTime, Local};

/// Running totals for a batch run
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    started_at: DateTime<Local>,
    started: Instant,
    pub successful: usize,
    pub failed: usize,
    pub total_caption_length: usize,
    pub total_summary_length: usize,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            started: Instant::now(),
            successful: 0,
            failed: 0,
            total_caption_length: 0,
            total_summary_length: 0,
        }
    }

    pub fn record_success(&mut self, caption_length: usize, summary_length: usize) {
        self.successful += 1;
        self.total_caption_length += caption_length;
        self.total_summary_length += summary_length;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed
    }

    /// Percentage of processed videos that succeeded, `None` before any video
    pub fn success_rate(&self) -> Option<f64> {
        (self.total() > 0).then(|| self.successful as f64 / self.total() as f64 * 100.0)
    }

    pub fn average_caption_length(&self) -> Option<f64> {
        (self.successful > 0).then(|| self.total_caption_length as f64 / self.successful as f64)
    }

    pub fn average_summary_length(&self) -> Option<f64> {
        (self.successful > 0).then(|| self.total_summary_length as f64 / self.successful as f64)
    }
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);

        writeln!(f, "{rule}")?;
        writeln!(f, "Processing summary")?;
        writeln!(f, "Started: {}", self.started_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Elapsed: {:.1}s", self.started.elapsed().as_secs_f64())?;
        writeln!(f, "Succeeded: {} videos", self.successful)?;
        writeln!(f, "Failed/skipped: {} videos", self.failed)?;
        if let Some(rate) = self.success_rate() {
            writeln!(f, "Success rate: {rate:.1}%")?;
        }
        if let (Some(caption), Some(summary)) =
            (self.average_caption_length(), self.average_summary_length())
        {
            writeln!(f, "Average caption length: {caption:.0} chars")?;
            writeln!(f, "Average summary length: {summary:.0} chars")?;
        }
        write!(f, "{rule}")
    }
}
