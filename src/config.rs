use logchain::{DefaultFormatter, Formatter, JsonFormatter};

use crate::cli::{Cli, OutputFormat};

/// Main configuration struct for logchain
#[derive(Debug, Clone)]
pub struct LogchainConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Empty means stdin; "-" also names stdin
    pub files: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub file: Option<String>,
    pub color: ColorMode,
    /// Pipelines to render; empty renders all
    pub pipelines: Vec<String>,
}

/// Diagnostics configuration
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    pub verbose: u8,
    pub quiet: bool,
    pub stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl LogchainConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let color = if cli.no_color {
            ColorMode::Never
        } else if cli.force_color {
            ColorMode::Always
        } else {
            ColorMode::Auto
        };

        Self {
            input: InputConfig {
                files: cli.files.clone(),
            },
            output: OutputConfig {
                format: cli.output_format.clone(),
                pretty: cli.pretty,
                file: cli.output_file.clone(),
                color,
                pipelines: cli.pipelines.clone(),
            },
            diagnostics: DiagnosticsConfig {
                verbose: cli.verbose,
                quiet: cli.quiet,
                stats: cli.stats,
            },
        }
    }

    /// Whether the text report should carry ANSI colors
    pub fn use_colors(&self) -> bool {
        // Files never get escape codes unless explicitly forced
        if self.output.file.is_some() && self.output.color != ColorMode::Always {
            return false;
        }
        crate::tty::should_use_colors_with_mode(&self.output.color)
    }

    pub fn create_formatter(&self) -> Box<dyn Formatter> {
        match self.output.format {
            OutputFormat::Default => Box::new(DefaultFormatter::new(self.use_colors())),
            OutputFormat::Json if self.output.pretty => Box::new(JsonFormatter::pretty()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// True when the pipeline passes the `--pipeline` selection
    pub fn selects(&self, pipeline_id: &str) -> bool {
        self.output.pipelines.is_empty() || self.output.pipelines.iter().any(|p| p == pipeline_id)
    }

    pub fn report_skipped_lines(&self) -> bool {
        !self.diagnostics.quiet && self.diagnostics.verbose >= 1
    }

    pub fn report_incomplete_chains(&self) -> bool {
        !self.diagnostics.quiet && self.diagnostics.verbose >= 2
    }

    pub fn show_stats(&self) -> bool {
        !self.diagnostics.quiet && self.diagnostics.stats
    }
}
