//! # logchain
//!
//! Reconstructs the emission order of log records that arrive out of order.
//!
//! Every input line has the shape
//!
//! ```text
//! <pipeline_id> <id> <encoding> [<body>] <next_id>
//! ```
//!
//! where `encoding` is `0` for literal text and `1` for hexadecimal text, and
//! `next_id` links the record to its successor (`-1` ends a chain). Records
//! are grouped per pipeline, the chain tail is found, and the chain is walked
//! and reversed into presentation order.
//!
//! ```
//! let input = "1 0 0 [Start] 1\n1 2 0 [End] -1\n1 1 0 [Middle] 2\n";
//!
//! let result = logchain::reconstruct(input);
//! assert_eq!(result.pipelines.len(), 1);
//!
//! assert_eq!(
//!     logchain::render_text(&result.pipelines),
//!     "Pipeline 1\n  2| End\n  1| Middle\n  0| Start\n"
//! );
//! ```

pub mod chain;
pub mod colors;
pub mod diagnostics;
pub mod formatters;
pub mod grouper;
pub mod parser;
pub mod reconstruct;
pub mod record;
pub mod stats;

pub use chain::{find_tail, reconstruct_chain, walk_chain, ChainOutcome, ChainWalk};
pub use diagnostics::{ChainReport, Diagnostics, SkippedLine};
pub use formatters::{render_text, DefaultFormatter, Formatter, JsonFormatter};
pub use grouper::{group_records, PipelineMap, RecordMap};
pub use parser::{decode_body, encode_hex, parse_record, try_decode_body, DecodeError};
pub use reconstruct::{reconstruct, Reconstruction};
pub use record::{Encoding, Pipeline, Record, SENTINEL_NEXT_ID};
pub use stats::ProcessingStats;

/// Parse, reconstruct, and render `input` as the plain text report
pub fn render(input: &str) -> String {
    render_text(&reconstruct(input).pipelines)
}
