//! Process runner.
//!
//! Spawns one child with inherited stdio and blocks until it exits. There is no
//! timeout: a child that never exits blocks the caller forever.

use crate::error::CookError;
use colored::*;
use std::ffi::OsStr;
use std::process::{Command, ExitStatus};

/// Run `argv[0]` (looked up on `PATH`) with the remaining arguments.
///
/// Returns the child's exit code, `0` meaning success. Spawn failure (which
/// includes a missing executable), wait failure and termination by signal are
/// errors; see [`status`] for the integer form.
pub fn run_process<S: AsRef<OsStr>>(argv: &[S]) -> Result<i32, CookError> {
    let (program, args) = argv.split_first().ok_or(CookError::EmptyArgv)?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    run_command(&mut cmd)
}

pub(crate) fn run_command(cmd: &mut Command) -> Result<i32, CookError> {
    let program = cmd.get_program().to_string_lossy().to_string();

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(source) => return Err(CookError::Spawn { program, source }),
    };

    let status = match child.wait() {
        Ok(status) => status,
        Err(source) => return Err(CookError::Wait { program, source }),
    };

    exit_code(program, status)
}

fn exit_code(program: String, status: ExitStatus) -> Result<i32, CookError> {
    match status.code() {
        Some(code) => Ok(code),
        None => Err(CookError::AbnormalTermination {
            program,
            signal: termination_signal(&status),
        }),
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Collapse a step result into the integer Process Result.
///
/// Errors are reported on stderr and become the negative sentinel.
pub fn status(result: Result<i32, CookError>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "x".red(), e);
            e.status()
        }
    }
}
