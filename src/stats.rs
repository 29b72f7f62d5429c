use std::time::{Duration, Instant};

use crate::chain::ChainOutcome;
use crate::diagnostics::Diagnostics;

/// Statistics collected during one run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub blank_lines: usize,
    pub records_parsed: usize,
    pub records_output: usize,
    pub duplicates: usize,
    pub decode_failures: usize,
    pub pipelines: usize,
    pub pipelines_without_tail: usize,
    pub dangling_chains: usize,
    pub cyclic_chains: usize,
    pub orphans: usize,
    pub files_processed: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Fold in the counters of a finished reconstruction and stop the clock
    pub fn finish(&mut self, diagnostics: &Diagnostics) {
        self.lines_read = diagnostics.lines_read;
        self.lines_skipped = diagnostics.lines_skipped();
        self.blank_lines = diagnostics.blank_lines;
        self.records_parsed = diagnostics.records_parsed;
        self.records_output = diagnostics.records_output();
        self.duplicates = diagnostics.duplicates;
        self.decode_failures = diagnostics.decode_failures();
        self.pipelines = diagnostics.pipelines();
        self.orphans = diagnostics.orphans();

        for report in &diagnostics.chains {
            match report.outcome {
                ChainOutcome::NoTail => self.pipelines_without_tail += 1,
                ChainOutcome::Dangling { .. } => self.dangling_chains += 1,
                ChainOutcome::Cycle { .. } => self.cyclic_chains += 1,
                ChainOutcome::Sentinel => {}
            }
        }

        if let Some(start) = self.start_time {
            self.processing_time = start.elapsed();
        }
    }

    pub fn format_stats(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Lines processed: {} total, {} skipped, {} blank",
            self.lines_read, self.lines_skipped, self.blank_lines
        ));

        if self.files_processed > 0 {
            output.push_str(&format!(", {} files", self.files_processed));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output.push_str(&format!(
            "\nRecords: {} parsed, {} output",
            self.records_parsed, self.records_output
        ));
        if self.duplicates > 0 {
            output.push_str(&format!(", {} duplicates replaced", self.duplicates));
        }
        if self.decode_failures > 0 {
            output.push_str(&format!(", {} decode failures", self.decode_failures));
        }
        if self.orphans > 0 {
            output.push_str(&format!(", {} unreached", self.orphans));
        }

        output.push_str(&format!("\nPipelines: {}", self.pipelines));
        if self.pipelines_without_tail > 0 {
            output.push_str(&format!(", {} without tail", self.pipelines_without_tail));
        }
        if self.dangling_chains > 0 {
            output.push_str(&format!(", {} dangling", self.dangling_chains));
        }
        if self.cyclic_chains > 0 {
            output.push_str(&format!(", {} cyclic", self.cyclic_chains));
        }

        output
    }
}
