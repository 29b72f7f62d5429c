mod common;
use common::*;
use std::fs;
use tempfile::TempDir;

const INPUT: &str = "a 1 0 [A] -1\nb 1 0 [B] -1\n";

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_config_file_alias() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "custom.ini", "[aliases]\nonly-b = -p b\n");

    let (stdout, stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config, "-a", "only-b"], INPUT);
    assert_eq!(exit_code, 0, "stderr was: {}", stderr);
    assert_eq!(stdout, "Pipeline b\n  1| B\n");
}

#[test]
fn test_nested_alias() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        "custom.ini",
        "[aliases]\nsel = -p a\naudit = -J --alias sel\n",
    );

    let (stdout, _stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config, "--alias", "audit"], INPUT);
    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "[{\"pipeline\":\"a\",\"records\":[{\"id\":\"1\",\"body\":\"A\",\"next_id\":\"-1\",\"encoding\":0}]}]\n"
    );
}

#[test]
fn test_config_defaults_apply_and_cli_overrides() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "custom.ini", "defaults = --stats\n");

    let (_stdout, stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config], INPUT);
    assert_eq!(exit_code, 0);
    assert!(stderr.contains("Lines processed:"), "defaults enable --stats");

    let (_stdout, stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config, "--no-stats"], INPUT);
    assert_eq!(exit_code, 0);
    assert!(stderr.is_empty(), "CLI flags come after defaults and win");
}

#[test]
fn test_ignore_config() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, ".logchainrc", "defaults = -p b\n");

    let (stdout, _stderr, exit_code) = run_logchain_in_dir(dir.path(), &[], INPUT);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "Pipeline b\n  1| B\n", "Project config is picked up");

    let (stdout, _stderr, exit_code) =
        run_logchain_in_dir(dir.path(), &["--ignore-config"], INPUT);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "Pipeline a\n  1| A\n\nPipeline b\n  1| B\n");
}

#[test]
fn test_project_config_found_from_subdirectory() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, ".logchainrc", "[aliases]\njson = -J\n");
    let nested = dir.path().join("logs").join("today");
    fs::create_dir_all(&nested).unwrap();

    let (stdout, _stderr, exit_code) = run_logchain_in_dir(&nested, &["-a", "json"], INPUT);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("[{\"pipeline\":\"a\""));
}

#[test]
fn test_unknown_alias_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "custom.ini", "[aliases]\nx = -J\n");

    let (stdout, stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config, "-a", "nope"], INPUT);
    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("logchain: Config error: Unknown alias: nope"));
}

#[test]
fn test_circular_alias_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "custom.ini", "[aliases]\nx = -a y\ny = -a x\n");

    let (_stdout, stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config, "-a", "x"], INPUT);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Circular dependency detected in alias"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "custom.ini", "defaults --stats\n");

    let (_stdout, stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config], INPUT);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid config file"));
    assert!(stderr.contains("line 1"));
}

#[test]
fn test_missing_custom_config_fails() {
    let (_stdout, stderr, exit_code) = run_logchain_with_input(
        &["--config-file", "/nonexistent/logchain.ini"],
        INPUT,
    );
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to read config file: /nonexistent/logchain.ini"));
}

#[test]
fn test_show_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "custom.ini", "defaults = -v\n[aliases]\nj = -J\n");

    let (stdout, _stderr, exit_code) =
        run_logchain_with_input(&["--config-file", &config, "--show-config"], "");
    assert_eq!(exit_code, 0);
    assert!(stdout.contains(&format!("Loaded from: {}", config)));
    assert!(stdout.contains("  defaults = -v"));
    assert!(stdout.contains("  j = -J"));
}
