use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

use crate::decompression::{maybe_decompress, open_file};

/// Where one input landed in the concatenated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub name: String,
    /// 1-based line number of the source's first line in the joined text
    pub first_line: usize,
    pub line_count: usize,
}

/// The whole input, concatenated across sources
#[derive(Debug, Default)]
pub struct InputText {
    pub text: String,
    /// Named files read; stdin is not counted
    pub files_processed: usize,
    pub sources: Vec<SourceSpan>,
}

impl InputText {
    /// Append one source, keeping a line break between sources
    fn push_source(&mut self, name: &str, bytes: &[u8]) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        // Invalid UTF-8 becomes U+FFFD instead of aborting the run
        let decoded = String::from_utf8_lossy(bytes);

        self.sources.push(SourceSpan {
            name: name.to_string(),
            first_line: self.text.matches('\n').count() + 1,
            line_count: decoded.lines().count(),
        });
        self.text.push_str(&decoded);
    }

    /// Map a line number of the joined text back to its source name and local line number
    pub fn locate(&self, line_number: usize) -> Option<(&str, usize)> {
        self.sources
            .iter()
            .find(|span| {
                line_number >= span.first_line && line_number < span.first_line + span.line_count
            })
            .map(|span| (span.name.as_str(), line_number - span.first_line + 1))
    }
}

fn read_source(mut reader: Box<dyn Read>, name: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read {}", name))?;
    Ok(bytes)
}

/// Read every input in order; no files (or "-") means stdin
pub fn read_inputs(files: &[String]) -> Result<InputText> {
    let mut input = InputText::default();

    if files.is_empty() {
        let stdin = maybe_decompress(io::stdin()).context("Failed to read stdin")?;
        input.push_source("<stdin>", &read_source(stdin, "stdin")?);
        return Ok(input);
    }

    for file in files {
        if file == "-" {
            let stdin = maybe_decompress(io::stdin()).context("Failed to read stdin")?;
            input.push_source("<stdin>", &read_source(stdin, "stdin")?);
        } else {
            let reader = open_file(Path::new(file))?;
            input.push_source(file, &read_source(reader, file)?);
            input.files_processed += 1;
        }
    }

    Ok(input)
}
