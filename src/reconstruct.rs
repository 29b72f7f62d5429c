use serde::Serialize;

use crate::chain::walk_chain;
use crate::diagnostics::{ChainReport, Diagnostics, SkippedLine};
use crate::grouper::{insert_record, PipelineMap};
use crate::parser::{split_line, try_decode_body, DecodeError};
use crate::record::Pipeline;

/// Ordered pipelines plus the diagnostics gathered while building them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconstruction {
    pub pipelines: Vec<Pipeline>,
    pub diagnostics: Diagnostics,
}

impl Reconstruction {
    /// Look up a pipeline by id
    pub fn pipeline(&self, id: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

/// Parse, group, and reconstruct every pipeline in `input`.
///
/// Never fails: malformed lines are skipped and recorded in the diagnostics,
/// undecodable bodies carry placeholder text, and unresolvable chains yield
/// pipelines with no records.
pub fn reconstruct(input: &str) -> Reconstruction {
    let mut diagnostics = Diagnostics::default();
    let mut grouped = PipelineMap::new();

    for (index, line) in input.lines().enumerate() {
        diagnostics.lines_read += 1;

        if line.trim().is_empty() {
            diagnostics.blank_lines += 1;
            continue;
        }

        let Some(raw) = split_line(line) else {
            diagnostics.skipped.push(SkippedLine {
                line_number: index + 1,
                text: line.to_string(),
            });
            continue;
        };

        let body = match try_decode_body(raw.encoding, raw.body) {
            Ok(body) => body,
            Err(e) => {
                match e {
                    DecodeError::UnsupportedEncoding(_) => diagnostics.invalid_encoding += 1,
                    DecodeError::InvalidHex(_) => diagnostics.invalid_hex += 1,
                }
                e.placeholder().to_string()
            }
        };

        diagnostics.records_parsed += 1;
        if insert_record(&mut grouped, raw.into_record(body)).is_some() {
            diagnostics.duplicates += 1;
        }
    }

    let mut pipelines = Vec::with_capacity(grouped.len());
    for (pipeline_id, records) in &grouped {
        let walk = walk_chain(records);
        diagnostics.chains.push(ChainReport {
            pipeline_id: pipeline_id.clone(),
            outcome: walk.outcome,
            records: walk.records.len(),
            orphans: records.len() - walk.records.len(),
        });
        pipelines.push(Pipeline::new(pipeline_id.clone(), walk.records));
    }

    Reconstruction {
        pipelines,
        diagnostics,
    }
}
