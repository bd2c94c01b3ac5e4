use std::io::Write;
use std::process::{Command, Stdio};

use sponge_keccak::hash_bytes;
use tempfile::tempdir;

fn keccaksum() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_keccaksum"));
    cmd.env_remove("KECCAKSUM_LENGTH").env_remove("KECCAKSUM_CHUNK_SIZE");
    cmd
}

#[test]
fn hashes_files_with_requested_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, b"cli input").unwrap();

    let output = keccaksum()
        .current_dir(dir.path())
        .args(["-l", "24", "input.txt"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("{}  input.txt\n", hex::encode(hash_bytes(b"cli input", 24)))
    );
}

#[test]
fn hashes_stdin_by_default() {
    let dir = tempdir().unwrap();
    let mut child = keccaksum()
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(b"from stdin").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("{}  -\n", hex::encode(hash_bytes(b"from stdin", 64)))
    );
}

#[test]
fn config_file_sets_default_length() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("keccaksum.toml"), "length = 10\n").unwrap();
    std::fs::write(dir.path().join("f"), b"configured").unwrap();

    let output = keccaksum().current_dir(dir.path()).arg("f").output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("{}  f\n", hex::encode(hash_bytes(b"configured", 10)))
    );
}

#[test]
fn missing_file_sets_failure_status() {
    let dir = tempdir().unwrap();
    let output = keccaksum().current_dir(dir.path()).arg("absent").output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent"));
}

#[test]
fn check_mode_round_trip() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a"), b"first").unwrap();
    std::fs::write(dir.path().join("b"), b"second").unwrap();

    let sums = keccaksum().current_dir(dir.path()).args(["a", "b"]).output().unwrap();
    assert!(sums.status.success());
    std::fs::write(dir.path().join("SUMS"), &sums.stdout).unwrap();

    let check = keccaksum().current_dir(dir.path()).args(["-c", "SUMS"]).output().unwrap();
    assert!(check.status.success());
    assert_eq!(String::from_utf8(check.stdout).unwrap(), "a: OK\nb: OK\n");

    std::fs::write(dir.path().join("b"), b"changed").unwrap();
    let check = keccaksum().current_dir(dir.path()).args(["-c", "SUMS"]).output().unwrap();
    assert!(!check.status.success());
    assert_eq!(String::from_utf8(check.stdout).unwrap(), "a: OK\nb: FAILED\n");
}
