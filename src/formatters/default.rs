use std::fmt::Write;

use crate::colors::ColorScheme;
use crate::record::Pipeline;

use super::Formatter;

// Default formatter (indented text report with optional colors)
pub struct DefaultFormatter {
    colors: ColorScheme,
}

impl DefaultFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self {
            colors: ColorScheme::new(use_colors),
        }
    }

    fn format_pipeline_into(&self, pipeline: &Pipeline, output: &mut String) {
        let header_color = if pipeline.is_empty() {
            self.colors.empty
        } else {
            self.colors.header
        };
        // Writing into a String cannot fail
        let _ = writeln!(
            output,
            "{}Pipeline {}{}",
            header_color, pipeline.id, self.colors.reset
        );

        for record in &pipeline.records {
            let _ = writeln!(
                output,
                "  {}{}{}| {}",
                self.colors.id, record.id, self.colors.reset, record.body
            );
        }
    }
}

impl Formatter for DefaultFormatter {
    fn format(&self, pipelines: &[Pipeline]) -> String {
        let mut output = String::new();

        for (index, pipeline) in pipelines.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            self.format_pipeline_into(pipeline, &mut output);
        }

        output
    }
}
