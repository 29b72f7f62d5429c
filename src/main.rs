use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

use logchain::{reconstruct, ChainOutcome, Diagnostics, Pipeline, ProcessingStats, Reconstruction};

mod cli;
mod config;
mod config_file;
mod decompression;
mod readers;
mod tty;

use cli::Cli;
use config::LogchainConfig;
use config_file::ConfigFile;
use readers::InputText;

#[derive(Debug, Clone, Copy)]
enum ExitCode {
    GeneralError = 1,
    InvalidUsage = 2,
}

impl ExitCode {
    fn exit(self) -> ! {
        process::exit(self as i32)
    }
}

/// Extract --config-file argument from raw args
fn extract_config_file_arg(args: &[String]) -> Option<String> {
    args.iter()
        .position(|arg| arg == "--config-file")
        .and_then(|i| args.get(i + 1).cloned())
}

/// Apply config file defaults and aliases, then parse the command line
fn process_args_with_config() -> Cli {
    let raw_args: Vec<String> = std::env::args().collect();
    let config_file_path = extract_config_file_arg(&raw_args);

    if raw_args.iter().any(|arg| arg == "--show-config") {
        print!("{}", ConfigFile::describe(config_file_path.as_deref()));
        process::exit(0);
    }

    let processed_args = if raw_args.iter().any(|arg| arg == "--ignore-config") {
        raw_args
    } else {
        match ConfigFile::load_with_custom_path(config_file_path.as_deref())
            .and_then(|config_file| config_file.process_args(raw_args))
        {
            Ok(processed) => processed,
            Err(e) => {
                eprintln!("logchain: Config error: {:#}", e);
                ExitCode::GeneralError.exit();
            }
        }
    };

    let matches = Cli::command().get_matches_from(processed_args);
    let mut cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| {
        eprintln!("logchain: Error: {}", e);
        ExitCode::InvalidUsage.exit();
    });
    cli.resolve_boolean_flags();
    cli
}

/// Report skipped lines and incomplete chains on stderr, depending on verbosity
fn report_diagnostics(config: &LogchainConfig, input: &InputText, diagnostics: &Diagnostics) {
    if config.report_skipped_lines() {
        for skipped in &diagnostics.skipped {
            match input.locate(skipped.line_number) {
                Some((source, line)) => {
                    eprintln!("logchain: {}:{}: skipped: {}", source, line, skipped.text)
                }
                None => eprintln!(
                    "logchain: line {}: skipped: {}",
                    skipped.line_number, skipped.text
                ),
            }
        }
    }

    if config.report_incomplete_chains() {
        for report in diagnostics.incomplete_chains() {
            let reason = match &report.outcome {
                ChainOutcome::NoTail => "no tail record (every id is referenced)".to_string(),
                ChainOutcome::Dangling { next_id } => {
                    format!("chain stops at missing record '{}'", next_id)
                }
                ChainOutcome::Cycle { next_id } => format!("cycle back to '{}'", next_id),
                ChainOutcome::Sentinel => continue,
            };
            eprintln!(
                "logchain: pipeline {}: {} ({} records placed, {} unreached)",
                report.pipeline_id, reason, report.records, report.orphans
            );
        }
    }
}

fn write_output(config: &LogchainConfig, rendered: &str) -> Result<()> {
    match &config.output.file {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory for {}", path.display())
                    })?;
                }
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            if let Err(e) = handle.write_all(rendered.as_bytes()).and_then(|_| handle.flush()) {
                // A closed pipe (e.g. `| head`) is not a failure
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(e).context("Failed to write output");
                }
            }
        }
    }
    Ok(())
}

fn run(config: &LogchainConfig) -> Result<()> {
    let mut stats = ProcessingStats::new();

    let input = readers::read_inputs(&config.input.files)?;
    stats.files_processed = input.files_processed;

    let Reconstruction {
        pipelines,
        diagnostics,
    } = reconstruct(&input.text);

    let selected: Vec<Pipeline> = pipelines
        .into_iter()
        .filter(|pipeline| config.selects(&pipeline.id))
        .collect();

    let formatter = config.create_formatter();
    write_output(config, &formatter.format(&selected))?;

    report_diagnostics(config, &input, &diagnostics);

    if config.show_stats() {
        stats.finish(&diagnostics);
        eprintln!("{}", stats.format_stats());
    }

    Ok(())
}

fn main() {
    let cli = process_args_with_config();
    let config = LogchainConfig::from_cli(&cli);

    if let Err(e) = run(&config) {
        eprintln!("logchain: {:#}", e);
        ExitCode::GeneralError.exit();
    }
}
