use serde::Serialize;

use crate::chain::ChainOutcome;

/// A line that did not match the record grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based position in the input
    pub line_number: usize,
    pub text: String,
}

/// Per-pipeline summary of how its chain was reconstructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub pipeline_id: String,
    pub outcome: ChainOutcome,
    /// Records placed in the reconstructed chain
    pub records: usize,
    /// Records of the pipeline the chain never reached
    pub orphans: usize,
}

/// Everything a single reconstruction noticed but did not treat as fatal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub lines_read: usize,
    pub blank_lines: usize,
    pub records_parsed: usize,
    pub skipped: Vec<SkippedLine>,
    pub invalid_encoding: usize,
    pub invalid_hex: usize,
    /// Records that replaced an earlier record with the same pipeline and id
    pub duplicates: usize,
    pub chains: Vec<ChainReport>,
}

impl Diagnostics {
    pub fn lines_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn decode_failures(&self) -> usize {
        self.invalid_encoding + self.invalid_hex
    }

    pub fn pipelines(&self) -> usize {
        self.chains.len()
    }

    /// Chains that ended anywhere other than the `-1` sentinel
    pub fn incomplete_chains(&self) -> impl Iterator<Item = &ChainReport> {
        self.chains.iter().filter(|report| !report.outcome.is_clean())
    }

    pub fn records_output(&self) -> usize {
        self.chains.iter().map(|report| report.records).sum()
    }

    pub fn orphans(&self) -> usize {
        self.chains.iter().map(|report| report.orphans).sum()
    }

    /// True when nothing was dropped, replaced, or left unreached
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
            && self.decode_failures() == 0
            && self.duplicates == 0
            && self.incomplete_chains().next().is_none()
            && self.orphans() == 0
    }
}
