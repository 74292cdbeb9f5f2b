//! End-to-end tests for the `cook` binary
//!
//! Each test runs the compiled binary inside a temporary directory so that
//! relative paths resolve against the fixture, never the repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn cook() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cook"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(cook())
        .args(args)
        .current_dir(dir)
        .env_remove("CC")
        .env_remove("CFLAGS")
        .env_remove("COOK_REMOVE")
        .output()
        .expect("Failed to run cook")
}

fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd).arg("--version").output().is_ok()
}

#[test]
fn test_compile_dry_run_prints_argv() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(
        dir.path(),
        &["compile", "a.c", "--compiler", "cc", "--flags=-O2", "--dry-run"],
    );

    assert!(output.status.success());
    let argv: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(argv, ["cc", "-O2", "-c", "a.c", "-o", "a.o"]);
}

#[test]
fn test_dry_run_keeps_paths_with_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(
        dir.path(),
        &["compile", "my file.c", "out/my file.o", "--flags=-g", "--dry-run"],
    );

    assert!(output.status.success());
    let argv: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(argv[3], "my file.c");
    assert_eq!(argv[5], "out/my file.o");
}

#[test]
fn test_link_dry_run_splits_objects() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(
        dir.path(),
        &["link", "main.o", "util.o", "-o", "app", "--dry-run"],
    );

    assert!(output.status.success());
    let argv: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(argv, ["gcc", "main.o", "util.o", "-o", "app"]);
}

#[test]
fn test_compile_empty_flags_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["compile", "a.c", "--flags", "", "--dry-run"]);
    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn test_exec_passes_exit_code_through() {
    let dir = tempfile::tempdir().unwrap();

    assert!(run_in(dir.path(), &["exec", "true"]).status.success());

    let output = run_in(dir.path(), &["exec", "sh", "-c", "exit 7"]);
    assert_eq!(output.status.code(), Some(7));

    let output = run_in(dir.path(), &["exec", "cook-test-no-such-program-xyz"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_clean_relative_directories() {
    let dir = tempfile::tempdir().unwrap();
    for sub in ["dirA", "dirB"] {
        fs::create_dir_all(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("x.o"), b"").unwrap();
        fs::write(dir.path().join(sub).join("y.tmp"), b"").unwrap();
        fs::write(dir.path().join(sub).join("z.c"), b"").unwrap();
    }

    let output = run_in(dir.path(), &["clean", "dirA", "dirB", "-p", "*.o *.tmp"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Removing: dirA/x.o"), "stdout: {}", stdout);
    assert!(stdout.contains("Removing: dirB/y.tmp"), "stdout: {}", stdout);
    for sub in ["dirA", "dirB"] {
        assert!(!dir.path().join(sub).join("x.o").exists());
        assert!(!dir.path().join(sub).join("y.tmp").exists());
        assert!(dir.path().join(sub).join("z.c").exists());
    }
}

#[test]
fn test_rm_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.o"), b"").unwrap();
    fs::write(dir.path().join("y.o"), b"").unwrap();
    fs::write(dir.path().join("x.c"), b"").unwrap();

    let output = run_in(dir.path(), &["rm", "*.o"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Removing: x.o\n"), "stdout: {}", stdout);
    assert!(stdout.contains("Removing: y.o\n"), "stdout: {}", stdout);
    assert!(!stdout.contains("./x.o"), "stdout: {}", stdout);
    assert!(!dir.path().join("x.o").exists());
    assert!(!dir.path().join("y.o").exists());
    assert!(dir.path().join("x.c").exists());
}

#[test]
fn test_rm_zero_matches_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.c"), b"").unwrap();

    let output = run_in(dir.path(), &["rm", "*.o", "*.tmp"]);

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Removing:"));
    assert!(dir.path().join("x.c").exists());
}

#[test]
fn test_rm_bad_pattern_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.o"), b"").unwrap();

    let output = run_in(dir.path(), &["rm", "[x.o"]);

    assert!(!output.status.success());
    assert!(dir.path().join("x.o").exists());
}

#[cfg(unix)]
#[test]
fn test_failed_compile_reports_on_stderr() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path(), &["build", "main.c", "--compiler", "false"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Compiling main.c failed"), "stderr: {}", stderr);
    assert!(!String::from_utf8_lossy(&output.stdout).contains("failed"));
}

#[test]
fn test_clean_missing_second_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("dirA")).unwrap();
    fs::write(dir.path().join("dirA").join("x.o"), b"").unwrap();

    let output = run_in(dir.path(), &["clean", "dirA", "dirB"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("dirA").join("x.o").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dirB"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_build_with_stub_toolchain() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stale.o"), b"").unwrap();

    let output = run_in(dir.path(), &["build", "main.c", "--compiler", "true"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!dir.path().join("stale.o").exists());
}

#[cfg(unix)]
#[test]
fn test_build_stops_at_failing_compile() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stale.o"), b"").unwrap();

    let output = run_in(dir.path(), &["build", "main.c", "--compiler", "false"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(dir.path().join("stale.o").exists());
}

#[test]
fn test_build_real_c_program() {
    if !is_command_available("gcc") {
        eprintln!("Skipping: gcc not found");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.c"),
        "#include <stdio.h>\nint main(void) { puts(\"hello from cook\"); return 0; }\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["build", "main.c", "-o", "hello"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!dir.path().join("main.o").exists());

    let bin = dir.path().join(if cfg!(windows) { "hello.exe" } else { "hello" });
    let run = Command::new(&bin).output().unwrap();
    assert!(String::from_utf8_lossy(&run.stdout).contains("hello from cook"));
}
