// SPDX-License-Identifier: Apache-2.0

//! Tests that invoke the `multfuzz` binary.

use std::path::Path;
use std::process::{Command, Output};

use xlsynth_multfuzz::aig_serdes::load_aiger_binary::load_aiger_binary_from_path;

fn run_multfuzz(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_multfuzz"))
        .args(args)
        .output()
        .unwrap()
}

fn assert_exit(output: &Output, want: i32) {
    assert_eq!(
        output.status.code(),
        Some(want),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_writes_loadable_multiplier() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("mult.aig");
    let output = run_multfuzz(&["-i", "3", path_str(&out), "-s", "17", "--check"]);
    assert_exit(&output, 0);
    let gate_fn = load_aiger_binary_from_path(&out).unwrap();
    assert_eq!(gate_fn.input_bit_count(), 6);
    assert_eq!(gate_fn.output_bit_count(), 6);
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"aig "));
}

#[test]
fn test_same_seed_same_file() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let first = temp_dir.path().join("first.aig");
    let second = temp_dir.path().join("second.aig");
    for out in [&first, &second] {
        let output = run_multfuzz(&["-i", "6", path_str(out), "-s", "4242", "-r", "-v0"]);
        assert_exit(&output, 0);
    }
    assert!(std::fs::read(&first)? == std::fs::read(&second)?);
    Ok(())
}

#[test]
fn test_legacy_flags_are_accepted() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("nocla.aig");
    let output = run_multfuzz(&["-i", "4", path_str(&out), "-cl", "-v3", "-s", "1"]);
    assert_exit(&output, 0);
    assert!(out.exists());
}

#[test]
fn test_usage_errors_exit_11() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("never.aig");
    for args in [
        vec![path_str(&out)],
        vec!["-i", "zero", path_str(&out)],
        vec!["-i", "0", path_str(&out)],
        vec!["-i", "4"],
    ] {
        let output = run_multfuzz(&args);
        assert_exit(&output, 11);
    }
    assert!(!out.exists());
}

#[test]
fn test_help_exits_zero() {
    let output = run_multfuzz(&["-h"]);
    assert_exit(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--width"), "{}", stdout);
}

#[test]
fn test_unwritable_output_exits_21() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("missing_dir").join("mult.aig");
    let output = run_multfuzz(&["-i", "2", path_str(&out), "-s", "3"]);
    assert_exit(&output, 21);
}
