// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

/// Build one pipe-separated FEC contribution line (no trailing newline).
pub fn fec_line(time: &str, name: &str) -> String {
    format!("C00629618|N|TER|P|{time}|15C|IND|{name}|VANCOUVER|WA|98660|||20170123|40")
}

/// Run the linetally binary against a temp file holding `file_content`.
/// Returns (stdout, stderr, exit code).
pub fn run_linetally_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(file_content.as_bytes())
        .expect("Failed to write to temp file");

    let mut full_args = args.to_vec();
    let path = temp_file.path().to_str().unwrap().to_string();
    full_args.push(&path);

    let output = Command::new(env!("CARGO_BIN_EXE_linetally"))
        .args(&full_args)
        .output()
        .expect("Failed to run linetally");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}
