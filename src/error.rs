//! Error taxonomy for the build helpers.
//!
//! Every failure aborts the current operation and is handed back to the
//! immediate caller. Nothing here is retried. Callers that want the classic
//! integer status can collapse any error with [`CookError::status`], which is
//! always [`FAILURE_SENTINEL`].

use std::path::PathBuf;

/// Status reported when an invocation could not be started or awaited.
pub const FAILURE_SENTINEL: i32 = -1;

/// Error type for build operations
#[derive(Debug)]
pub enum CookError {
    /// Argument vector had no executable
    EmptyArgv,
    /// Compile was given no flags; the first flag slot cannot be filled
    EmptyFlags,
    /// Link was given no object files
    NoInputs,
    /// Child process could not be created
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// Child exit status could not be retrieved
    Wait {
        program: String,
        source: std::io::Error,
    },
    /// Child died without exiting normally (e.g. killed by a signal)
    AbnormalTermination {
        program: String,
        signal: Option<i32>,
    },
    /// Argument vector storage could not be reserved
    Allocation(std::collections::TryReserveError),
    /// Pattern was malformed or could not be expanded
    Glob { pattern: String, reason: String },
    /// Target directory is missing or unusable
    DirectoryChange {
        dir: PathBuf,
        source: std::io::Error,
    },
    /// Starting working directory could not be determined
    CwdQuery(std::io::Error),
}

impl CookError {
    /// Integer status for this failure.
    pub fn status(&self) -> i32 {
        FAILURE_SENTINEL
    }

    pub(crate) fn glob(pattern: &str, reason: impl Into<String>) -> Self {
        CookError::Glob {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for CookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookError::EmptyArgv => write!(f, "argument vector is empty, nothing to run"),
            CookError::EmptyFlags => write!(
                f,
                "compile needs at least one flag (the first flag follows the compiler name)"
            ),
            CookError::NoInputs => write!(f, "link needs at least one object file"),
            CookError::Spawn { program, source } => {
                write!(f, "failed to start '{}': {}", program, source)
            }
            CookError::Wait { program, source } => {
                write!(f, "failed to wait for '{}': {}", program, source)
            }
            CookError::AbnormalTermination {
                program,
                signal: Some(sig),
            } => write!(f, "'{}' terminated by signal {}", program, sig),
            CookError::AbnormalTermination {
                program,
                signal: None,
            } => write!(f, "'{}' terminated abnormally", program),
            CookError::Allocation(e) => write!(f, "memory allocation failed: {}", e),
            CookError::Glob { pattern, reason } => {
                write!(f, "error in glob '{}': {}", pattern, reason)
            }
            CookError::DirectoryChange { dir, source } => {
                write!(f, "failed to change to {}: {}", dir.display(), source)
            }
            CookError::CwdQuery(e) => {
                write!(f, "could not determine current directory: {}", e)
            }
        }
    }
}

impl std::error::Error for CookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CookError::Spawn { source, .. }
            | CookError::Wait { source, .. }
            | CookError::DirectoryChange { source, .. } => Some(source),
            CookError::CwdQuery(e) => Some(e),
            CookError::Allocation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::collections::TryReserveError> for CookError {
    fn from(e: std::collections::TryReserveError) -> Self {
        CookError::Allocation(e)
    }
}
