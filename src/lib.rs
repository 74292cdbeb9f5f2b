//! # cook - compile, link, clean
//!
//! A small library for describing a C build pipeline in code instead of a
//! build-system DSL. Every step runs unconditionally and synchronously: no
//! dependency graph, no staleness checks, no parallel jobs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cook::build::{clean, compile, link, status};
//! use cook::config::Defaults;
//!
//! let d = Defaults::default();
//! if status(compile("main.c", "main.o", &d.compiler, &d.flags)) != 0 {
//!     std::process::exit(1);
//! }
//! if status(link("main.o", "main")) != 0 {
//!     std::process::exit(1);
//! }
//! let _ = clean(&["."], &d.remove);
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Process runner, argument vectors, compile/link steps, cleanup
//! - [`config`] - Default compiler, flags and cleanup patterns
//! - [`error`] - Error taxonomy and the integer status sentinel

/// Process runner, argument vectors, compile/link steps and cleanup.
pub mod build;

/// Caller-owned defaults with environment overrides.
pub mod config;

/// Error taxonomy.
pub mod error;

pub use error::{CookError, FAILURE_SENTINEL};
