// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn logchain_command(dir: Option<&Path>) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_logchain"));
    // Keep user config files out of test runs
    cmd.env("XDG_CONFIG_HOME", "/nonexistent-logchain-config")
        .env("HOME", "/nonexistent-logchain-home")
        .env_remove("NO_COLOR")
        .env_remove("FORCE_COLOR");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd
}

fn collect(output: Output) -> (String, String, i32) {
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn run_with_stdin(mut cmd: Command, args: &[&str], input: &[u8]) -> (String, String, i32) {
    let mut child = cmd
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start logchain");

    if let Some(mut stdin) = child.stdin.take() {
        // The child may exit (e.g. on a config error) before reading stdin
        if let Err(e) = stdin.write_all(input) {
            assert_eq!(
                e.kind(),
                std::io::ErrorKind::BrokenPipe,
                "Failed to write to stdin: {e}"
            );
        }
    }

    collect(child.wait_with_output().expect("Failed to read output"))
}

/// Run logchain with given arguments and input via stdin
pub fn run_logchain_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    run_with_stdin(logchain_command(None), args, input.as_bytes())
}

/// Run logchain with raw bytes on stdin (compressed or non-UTF-8 input)
pub fn run_logchain_with_input_bytes(args: &[&str], input: &[u8]) -> (String, String, i32) {
    run_with_stdin(logchain_command(None), args, input)
}

/// Run logchain from a specific working directory (for project config lookup)
pub fn run_logchain_in_dir(dir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    run_with_stdin(logchain_command(Some(dir)), args, input.as_bytes())
}

/// Run logchain with a temporary file appended to the arguments
pub fn run_logchain_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(file_content.as_bytes())
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");

    let path = temp_file.path().to_str().expect("temp path is UTF-8");
    run_logchain_with_files(args, &[path])
}

/// Run logchain with existing files appended to the arguments
pub fn run_logchain_with_files(args: &[&str], files: &[&str]) -> (String, String, i32) {
    let mut full_args = args.to_vec();
    full_args.extend(files);

    collect(
        logchain_command(None)
            .args(&full_args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute logchain"),
    )
}

/// Pull a counter such as "skipped" out of the "Lines processed:" stats line
pub fn extract_line_stat(stderr: &str, label: &str) -> Option<usize> {
    let line = stderr.lines().find(|l| l.starts_with("Lines processed:"))?;
    line.trim_start_matches("Lines processed:")
        .split(',')
        .map(str::trim)
        .find_map(|part| {
            let (count, rest) = part.split_once(' ')?;
            if rest.starts_with(label) {
                count.parse().ok()
            } else {
                None
            }
        })
}
