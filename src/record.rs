use serde::{Serialize, Serializer};

/// `next_id` value that explicitly terminates a chain
pub const SENTINEL_NEXT_ID: &str = "-1";

/// Body placeholder for records carrying an encoding tag other than 0 or 1
pub const INVALID_ENCODING_BODY: &str = "Invalid encoding";

/// Body placeholder for records whose hex payload could not be decoded
pub const INVALID_HEX_BODY: &str = "Invalid hex encoding";

/// How a record body was encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Tag 0: body is literal text
    Plain,
    /// Tag 1: body is hexadecimal-encoded text
    Hex,
    /// Any other non-negative tag
    Unsupported(u64),
}

impl Encoding {
    /// Map a decimal tag token to an encoding.
    ///
    /// Tags too large for `u64` are still valid grammar, so they become
    /// `Unsupported(u64::MAX)` instead of rejecting the line.
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse::<u64>() {
            Ok(0) => Encoding::Plain,
            Ok(1) => Encoding::Hex,
            Ok(other) => Encoding::Unsupported(other),
            Err(_) => Encoding::Unsupported(u64::MAX),
        }
    }

    pub fn tag(&self) -> u64 {
        match self {
            Encoding::Plain => 0,
            Encoding::Hex => 1,
            Encoding::Unsupported(tag) => *tag,
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.tag())
    }
}

/// One decoded log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(skip)]
    pub pipeline_id: String,
    pub id: String,
    pub body: String,
    pub next_id: String,
    pub encoding: Encoding,
}

impl Record {
    /// True when `next_id` is the explicit end-of-chain marker
    pub fn is_terminal(&self) -> bool {
        self.next_id == SENTINEL_NEXT_ID
    }
}

/// A pipeline with its records in head-to-tail order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    #[serde(rename = "pipeline")]
    pub id: String,
    pub records: Vec<Record>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
