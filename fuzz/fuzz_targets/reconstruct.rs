#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use logchain::{reconstruct, render_text};

const MAX_INPUT_LEN: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_LEN {
        return;
    }
    let input = String::from_utf8_lossy(data);

    let result = reconstruct(&input);
    let diagnostics = &result.diagnostics;

    assert_eq!(result.pipelines.len(), diagnostics.chains.len());
    assert!(diagnostics.records_parsed + diagnostics.lines_skipped() <= diagnostics.lines_read);

    for pipeline in &result.pipelines {
        // A walk never places the same record twice
        let mut seen = HashSet::new();
        for record in &pipeline.records {
            assert!(seen.insert(record.id.as_str()), "repeated id {}", record.id);
            assert_eq!(record.pipeline_id, pipeline.id);
        }
    }

    // Deterministic across runs
    assert_eq!(render_text(&result.pipelines), render_text(&reconstruct(&input).pipelines));
});
