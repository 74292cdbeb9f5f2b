mod args;
mod clean;
mod glob;
mod process;
mod steps;

pub use args::{ArgVector, compile_args, link_args, split_tokens};
pub use clean::{CleanReport, DeleteWarning, clean, remove_matching, wildcard_rm};
pub use glob::Pattern;
pub use process::{run_process, status};
pub use steps::{compile, link, link_with};
