// CLI-specific types and structures
// This module contains the command-line interface definitions

use clap::Parser;

#[derive(clap::ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Default,
    Json,
}

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug)]
#[command(name = "logchain")]
#[command(about = "Reconstruct the emission order of out-of-order, forward-linked log records")]
#[command(
    long_about = "Reconstruct the emission order of out-of-order, forward-linked log records\n\nINPUT LINES:\n  <pipeline_id> <id> <encoding> [<body>] <next_id>\n\n  encoding 0 = literal body, 1 = hexadecimal body; next_id -1 ends a chain.\n  Lines that do not match are skipped (see -v and --stats).\n\nCOMMON EXAMPLES:\n  logchain app.log\n  logchain app.log.gz -F json --pretty\n  logchain -p checkout -p billing app.log --stats"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Input files (stdin if not specified, or use "-" to explicitly specify stdin)
    pub files: Vec<String>,

    /// Output format
    #[arg(
        short = 'F',
        long = "output-format",
        value_enum,
        default_value = "default",
        help_heading = "Output Options"
    )]
    pub output_format: OutputFormat,

    /// Shortcut for -F json
    #[arg(
        short = 'J',
        help_heading = "Output Options",
        conflicts_with = "output_format"
    )]
    pub json_output: bool,

    /// Pretty-print JSON output
    #[arg(long = "pretty", help_heading = "Output Options")]
    pub pretty: bool,

    /// Output file for the rendered report
    #[arg(short = 'o', long = "output-file", help_heading = "Output Options")]
    pub output_file: Option<String>,

    /// Only render this pipeline (repeatable; ids are matched verbatim, commas included)
    #[arg(short = 'p', long = "pipeline", help_heading = "Selection Options")]
    pub pipelines: Vec<String>,

    /// Force colored output
    #[arg(long = "force-color", help_heading = "Display Options", overrides_with_all = ["no_color", "force_color"])]
    pub force_color: bool,

    /// Disable colored output
    #[arg(long = "no-color", help_heading = "Display Options", overrides_with_all = ["force_color", "no_color"])]
    pub no_color: bool,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Diagnostics", overrides_with_all = ["no_stats", "stats"])]
    pub stats: bool,

    /// Disable a --stats default coming from config
    #[arg(long = "no-stats", help_heading = "Diagnostics", overrides_with_all = ["stats", "no_stats"])]
    pub no_stats: bool,

    /// Report skipped lines as SOURCE:LINE (-v) and incomplete chains (-vv) on stderr
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Diagnostics")]
    pub verbose: u8,

    /// Suppress all diagnostics, including stats
    #[arg(short = 'q', long = "quiet", help_heading = "Diagnostics")]
    pub quiet: bool,

    /// Specify custom configuration file path
    #[arg(long = "config-file", help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    /// Ignore configuration file
    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,

    /// Use alias from configuration file
    #[arg(short = 'a', long = "alias", help_heading = "Configuration Options")]
    pub alias: Vec<String>,

    /// Show configuration file and exit
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,
}

impl Cli {
    /// Resolve inverted boolean flags and shortcuts to their actual values
    pub fn resolve_boolean_flags(&mut self) {
        if self.no_stats {
            self.stats = false;
        }

        if self.json_output {
            self.output_format = OutputFormat::Json;
        }
    }
}
