//! Compile and link steps. Each builds one argument vector and runs it.

use super::args::{compile_args, link_args};
use crate::config::DEFAULT_COMPILER;
use crate::error::CookError;

/// Compile `src` into `obj`.
///
/// Runs `[compiler, flag0, "-c", src, "-o", obj, flag1..]`. `flags` must hold
/// at least one flag.
pub fn compile(src: &str, obj: &str, compiler: &str, flags: &str) -> Result<i32, CookError> {
    compile_args(src, obj, compiler, flags)?.run()
}

/// Link the space-delimited `objects` into `output` with the default compiler.
pub fn link(objects: &str, output: &str) -> Result<i32, CookError> {
    link_with(DEFAULT_COMPILER, objects, output)
}

/// Link with an explicit linker.
pub fn link_with(linker: &str, objects: &str, output: &str) -> Result<i32, CookError> {
    link_args(linker, objects, output)?.run()
}
