mod common;
use common::*;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

const LOG: &str = "1 0 0 [Start] 1\n1 2 0 [End] -1\n1 1 0 [Middle] 2\n";
const EXPECTED: &str = "Pipeline 1\n  2| End\n  1| Middle\n  0| Start\n";

fn gzip(bytes: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_gzip_file() {
    let temp_dir = TempDir::new().unwrap();
    let gz_path = temp_dir.path().join("chain.log.gz");
    File::create(&gz_path)
        .unwrap()
        .write_all(&gzip(LOG.as_bytes()))
        .unwrap();

    let (stdout, _stderr, exit_code) = run_logchain_with_files(&[], &[gz_path.to_str().unwrap()]);
    assert_eq!(exit_code, 0, "Should read .gz file");
    assert_eq!(stdout, EXPECTED);
}

#[test]
fn test_zstd_file() {
    let temp_dir = TempDir::new().unwrap();
    let zst_path = temp_dir.path().join("chain.log.zst");
    let compressed = zstd::encode_all(LOG.as_bytes(), 0).unwrap();
    File::create(&zst_path)
        .unwrap()
        .write_all(&compressed)
        .unwrap();

    let (stdout, _stderr, exit_code) = run_logchain_with_files(&[], &[zst_path.to_str().unwrap()]);
    assert_eq!(exit_code, 0, "Should read .zst file");
    assert_eq!(stdout, EXPECTED);
}

#[test]
fn test_gzip_detected_by_content_not_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chain.log");
    File::create(&path)
        .unwrap()
        .write_all(&gzip(LOG.as_bytes()))
        .unwrap();

    let (stdout, _stderr, exit_code) = run_logchain_with_files(&[], &[path.to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, EXPECTED);
}

#[test]
fn test_gzip_stdin() {
    let (stdout, _stderr, exit_code) = run_logchain_with_input_bytes(&[], &gzip(LOG.as_bytes()));
    assert_eq!(exit_code, 0, "Should decompress gzip on stdin");
    assert_eq!(stdout, EXPECTED);
}

#[test]
fn test_mixed_plain_and_compressed_files_share_pipelines() {
    let temp_dir = TempDir::new().unwrap();
    let plain_path = temp_dir.path().join("part1.log");
    let gz_path = temp_dir.path().join("part2.log.gz");

    std::fs::write(&plain_path, "1 0 0 [Start] 1\n1 2 0 [End] -1").unwrap();
    std::fs::write(&gz_path, gzip(b"1 1 0 [Middle] 2\n")).unwrap();

    let (stdout, stderr, exit_code) = run_logchain_with_files(
        &["--stats"],
        &[plain_path.to_str().unwrap(), gz_path.to_str().unwrap()],
    );
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, EXPECTED, "Records from all inputs are grouped together");
    assert!(stderr.contains(", 2 files"));
    assert_eq!(extract_line_stat(&stderr, "total"), Some(3));
}

#[test]
fn test_zip_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("chain.zip");
    std::fs::write(&zip_path, b"PK\x03\x04").unwrap();

    let (stdout, stderr, exit_code) = run_logchain_with_files(&[], &[zip_path.to_str().unwrap()]);
    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("ZIP file decompression is not supported"));
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut input = b"p a 0 [caf".to_vec();
    input.push(0xE9);
    input.extend_from_slice(b"] -1\n");

    let (stdout, _stderr, exit_code) = run_logchain_with_input_bytes(&[], &input);
    assert_eq!(exit_code, 0, "Invalid UTF-8 must not abort the run");
    assert_eq!(stdout, "Pipeline p\n  a| caf\u{FFFD}\n");
}
