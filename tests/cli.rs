//! End-to-end checks of the `cluegen` binary that never reach the network.

use std::process::{Command, Output};
use tempfile::TempDir;

fn cluegen(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cluegen"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn cluegen")
}

#[test]
fn missing_api_key_exits_with_config_status() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("clues");

    let output = cluegen(&dir, &["--output-dir", out_dir.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing OPENAI_API_KEY"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(!out_dir.exists());
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cluegen"))
        .current_dir(dir.path())
        .env("OPENAI_API_KEY", "")
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn dry_run_lists_jobs_without_key() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("clues");
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(out_dir.join("clue-02.png"), b"existing").unwrap();

    let output = cluegen(
        &dir,
        &["--dry-run", "--output-dir", out_dir.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("[generate] clue").count(), 4);
    assert_eq!(stdout.matches("[skip] clue 02").count(), 1);
    assert_eq!(stdout.matches("Scene: ").count(), 5);
    assert_eq!(std::fs::read(out_dir.join("clue-02.png")).unwrap(), b"existing");
}

#[test]
fn dry_run_with_force_skips_nothing() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("clues");
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(out_dir.join("clue-01.png"), b"existing").unwrap();

    let output = cluegen(
        &dir,
        &[
            "--dry-run",
            "--force",
            "--output-dir",
            out_dir.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("[skip]"));
}
