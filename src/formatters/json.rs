use crate::record::Pipeline;

use super::Formatter;

// JSON formatter: one array of `{"pipeline", "records"}` objects
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, pipelines: &[Pipeline]) -> String {
        let serialized = if self.pretty {
            serde_json::to_string_pretty(pipelines)
        } else {
            serde_json::to_string(pipelines)
        };
        // Pipelines hold only strings and integers, which always serialize
        let mut output = serialized.unwrap_or_else(|_| "[]".to_string());
        output.push('\n');
        output
    }
}
