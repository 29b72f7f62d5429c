use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::record::{Encoding, Record, INVALID_ENCODING_BODY, INVALID_HEX_BODY};

// pipeline_id id encoding [body] next_id
// Identifier tokens exclude brackets so the first '[' on the line always opens the body.
const RECORD_LINE_PATTERN: &str = r"^\s*(?P<pipeline>[^\s\[\]]+)\s+(?P<id>[^\s\[\]]+)\s+(?P<encoding>[0-9]+)\s+\[(?P<body>[^\]]*)\]\s+(?P<next>[^\s\[\]]+)\s*$";

static RECORD_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(RECORD_LINE_PATTERN).expect("failed to compile record line regex"));

/// The tokens of a line that matched the grammar, body still encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub pipeline_id: &'a str,
    pub id: &'a str,
    pub encoding: Encoding,
    pub body: &'a str,
    pub next_id: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Build the record from an already-decoded body
    pub fn into_record(self, body: String) -> Record {
        Record {
            pipeline_id: self.pipeline_id.to_string(),
            id: self.id.to_string(),
            body,
            next_id: self.next_id.to_string(),
            encoding: self.encoding,
        }
    }
}

/// Why a body could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    UnsupportedEncoding(u64),
    InvalidHex(String),
}

impl DecodeError {
    /// The body a record carries in place of the undecodable payload
    pub fn placeholder(&self) -> &'static str {
        match self {
            DecodeError::UnsupportedEncoding(_) => INVALID_ENCODING_BODY,
            DecodeError::InvalidHex(_) => INVALID_HEX_BODY,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnsupportedEncoding(tag) => write!(f, "unsupported encoding tag {}", tag),
            DecodeError::InvalidHex(reason) => write!(f, "invalid hex body: {}", reason),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Split a line into its grammar tokens without decoding the body
pub fn split_line(line: &str) -> Option<RawRecord<'_>> {
    let caps = RECORD_LINE_REGEX.captures(line)?;

    Some(RawRecord {
        pipeline_id: caps.name("pipeline")?.as_str(),
        id: caps.name("id")?.as_str(),
        encoding: Encoding::from_tag(caps.name("encoding")?.as_str()),
        body: caps.name("body")?.as_str(),
        next_id: caps.name("next")?.as_str(),
    })
}

/// Decode a body, reporting why decoding failed
pub fn try_decode_body(encoding: Encoding, raw: &str) -> Result<String, DecodeError> {
    match encoding {
        Encoding::Plain => Ok(raw.to_string()),
        Encoding::Hex => {
            let bytes = hex::decode(raw).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
            String::from_utf8(bytes)
                .map_err(|e| DecodeError::InvalidHex(format!("decoded bytes are not UTF-8: {}", e)))
        }
        Encoding::Unsupported(tag) => Err(DecodeError::UnsupportedEncoding(tag)),
    }
}

/// Decode a body, substituting the placeholder text on failure
pub fn decode_body(encoding: Encoding, raw: &str) -> String {
    try_decode_body(encoding, raw).unwrap_or_else(|e| e.placeholder().to_string())
}

/// Encode text the way producers write `encoding == 1` bodies
pub fn encode_hex(text: &str) -> String {
    hex::encode_upper(text.as_bytes())
}

/// Parse one line into a record, or `None` when it does not match the grammar
pub fn parse_record(line: &str) -> Option<Record> {
    let raw = split_line(line)?;
    let body = decode_body(raw.encoding, raw.body);
    Some(raw.into_record(body))
}
