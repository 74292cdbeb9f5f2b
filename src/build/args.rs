//! Argument vector construction.
//!
//! Flag strings and object lists are space-delimited. They are split with
//! [`split_tokens`], which borrows the caller's string and hands back a new
//! token list on every call, so the same string can be split any number of
//! times.
//!
//! Paths containing spaces are not supported inside flag strings or object
//! lists. Positional arguments (source, object, output) are passed through
//! untouched and may contain spaces.

use super::process::run_process;
use crate::error::CookError;
use serde::{Deserialize, Serialize};
use std::process::Command;

/// Split on single ASCII spaces. Runs of spaces never produce empty tokens.
pub fn split_tokens(s: &str) -> Vec<&str> {
    s.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Ordered tokens for one process invocation; token 0 is the executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgVector(Vec<String>);

impl ArgVector {
    pub fn new(program: impl Into<String>) -> Result<Self, CookError> {
        let mut argv = Self(Vec::new());
        argv.push(program)?;
        Ok(argv)
    }

    pub fn push(&mut self, token: impl Into<String>) -> Result<(), CookError> {
        self.0.try_reserve(1)?;
        self.0.push(token.into());
        Ok(())
    }

    pub fn extend<I, S>(&mut self, tokens: I) -> Result<(), CookError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter();
        self.0.try_reserve(tokens.size_hint().0)?;
        for token in tokens {
            self.push(token)?;
        }
        Ok(())
    }

    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_command(&self) -> Option<Command> {
        let program = self.program()?;
        let mut cmd = Command::new(program);
        cmd.args(self.args());
        Some(cmd)
    }

    /// Run through the process runner and return the exit code.
    pub fn run(&self) -> Result<i32, CookError> {
        run_process(&self.0)
    }
}

impl std::fmt::Display for ArgVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// `[compiler, flag0, "-c", src, "-o", obj, flag1..]`
///
/// The first flag sits right after the compiler name, so an empty flag string
/// is rejected with [`CookError::EmptyFlags`].
pub fn compile_args(
    src: &str,
    obj: &str,
    compiler: &str,
    flags: &str,
) -> Result<ArgVector, CookError> {
    let tokens = split_tokens(flags);
    let (first, rest) = tokens.split_first().ok_or(CookError::EmptyFlags)?;

    let mut argv = ArgVector::new(compiler)?;
    argv.push(*first)?;
    argv.extend(["-c", src, "-o", obj])?;
    argv.extend(rest.iter().copied())?;
    Ok(argv)
}

/// `[linker, obj0, obj1.., "-o", output]`
///
/// Every object in the space-delimited list becomes its own argument.
pub fn link_args(linker: &str, objects: &str, output: &str) -> Result<ArgVector, CookError> {
    let objects = split_tokens(objects);
    if objects.is_empty() {
        return Err(CookError::NoInputs);
    }

    let mut argv = ArgVector::new(linker)?;
    argv.extend(objects)?;
    argv.extend(["-o", output])?;
    Ok(argv)
}
