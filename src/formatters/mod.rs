mod default;
mod json;

pub use default::DefaultFormatter;
pub use json::JsonFormatter;

use crate::record::Pipeline;

/// Render reconstructed pipelines for output
pub trait Formatter: Send + Sync {
    fn format(&self, pipelines: &[Pipeline]) -> String;
}

/// Plain text report: a `Pipeline <id>` header, then `  <id>| <body>` per record,
/// with a blank line between pipelines.
pub fn render_text(pipelines: &[Pipeline]) -> String {
    DefaultFormatter::new(false).format(pipelines)
}
