//! # cook CLI Entry Point
//!
//! Thin driver over the `cook` library. Every failing step exits non-zero:
//! a tool's own exit code is passed through, a step that could not run at all
//! exits with 1.
//!
//! ## Commands
//!
//! - `compile`, `link`, `build` - run the compiler/linker (`--dry-run` prints
//!   the argument vector as JSON instead)
//! - `clean` - remove files matching wildcard patterns in directories
//! - `rm` - remove files matching wildcard patterns in the working directory
//! - `exec` - run an arbitrary argument vector
//! - `info`, `completion`

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::Path;

use cook::build::{self, ArgVector};
use cook::config::Defaults;

#[derive(Parser)]
#[command(name = "cook")]
#[command(about = "Compile, link and clean C projects without a build DSL")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Echo each command before running it
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one source file to an object file
    Compile {
        /// Source file
        src: String,
        /// Object file [default: <src> with .o extension]
        obj: Option<String>,
        /// Compiler [default: $CC or gcc]
        #[arg(long)]
        compiler: Option<String>,
        /// Space-delimited flags [default: $CFLAGS or built-in set]
        #[arg(long, allow_hyphen_values = true)]
        flags: Option<String>,
        /// Print the argument vector as JSON without running it
        #[arg(long)]
        dry_run: bool,
    },
    /// Link object files into an executable
    Link {
        /// Object files
        #[arg(required = true)]
        objects: Vec<String>,
        /// Output executable
        #[arg(short, long)]
        output: String,
        /// Linker [default: $CC or gcc]
        #[arg(long)]
        linker: Option<String>,
        /// Print the argument vector as JSON without running it
        #[arg(long)]
        dry_run: bool,
    },
    /// Compile every source, link them, then remove intermediate objects
    Build {
        /// Source files
        #[arg(required = true)]
        sources: Vec<String>,
        /// Output executable
        #[arg(short, long, default_value = "main")]
        output: String,
        /// Compiler and linker [default: $CC or gcc]
        #[arg(long)]
        compiler: Option<String>,
        /// Space-delimited flags [default: $CFLAGS or built-in set]
        #[arg(long, allow_hyphen_values = true)]
        flags: Option<String>,
        /// Leave object files in place
        #[arg(long)]
        keep_objects: bool,
        /// Print the argument vectors as JSON without running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove files matching wildcard patterns
    Clean {
        /// Directories to clean
        #[arg(default_value = ".")]
        dirs: Vec<String>,
        /// Space-delimited patterns [default: $COOK_REMOVE or *.o]
        #[arg(short, long)]
        patterns: Option<String>,
    },
    /// Remove files matching wildcard patterns in the working directory
    Rm {
        /// Patterns [default: $COOK_REMOVE or *.o]
        patterns: Vec<String>,
    },
    /// Run a command and exit with its status
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },
    /// Show the resolved defaults
    Info,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let defaults = Defaults::from_env();

    match &cli.command {
        Commands::Compile {
            src,
            obj,
            compiler,
            flags,
            dry_run,
        } => {
            let obj = obj.clone().unwrap_or_else(|| object_name(src));
            let argv = build::compile_args(
                src,
                &obj,
                compiler.as_deref().unwrap_or(&defaults.compiler),
                flags.as_deref().unwrap_or(&defaults.flags),
            )?;
            finish(run_step(&argv, cli.verbose, *dry_run)?)
        }

        Commands::Link {
            objects,
            output,
            linker,
            dry_run,
        } => {
            let argv = build::link_args(
                linker.as_deref().unwrap_or(&defaults.compiler),
                &objects.join(" "),
                output,
            )?;
            finish(run_step(&argv, cli.verbose, *dry_run)?)
        }

        Commands::Build {
            sources,
            output,
            compiler,
            flags,
            keep_objects,
            dry_run,
        } => {
            let compiler = compiler.as_deref().unwrap_or(&defaults.compiler);
            let flags = flags.as_deref().unwrap_or(&defaults.flags);
            let code = build_pipeline(
                sources,
                output,
                compiler,
                flags,
                &defaults.remove,
                *keep_objects,
                cli.verbose,
                *dry_run,
            )?;
            finish(code)
        }

        Commands::Clean { dirs, patterns } => {
            clean_dirs(dirs, patterns.as_deref().unwrap_or(&defaults.remove))
        }

        Commands::Rm { patterns } => {
            let patterns = if patterns.is_empty() {
                build::split_tokens(&defaults.remove)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            } else {
                patterns.clone()
            };
            remove_here(&patterns)
        }

        Commands::Exec { argv } => {
            if cli.verbose {
                println!("{} {}", "▶".cyan(), argv.join(" "));
            }
            finish(build::status(build::run_process(argv.as_slice())))
        }

        Commands::Info => {
            println!("{}", "cook defaults".bold());
            println!("   {:<10} {}", "compiler".cyan(), defaults.compiler);
            println!("   {:<10} {}", "flags".cyan(), defaults.flags);
            println!("   {:<10} {}", "remove".cyan(), defaults.remove);
            Ok(())
        }

        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Run one argument vector, or print it as JSON when `dry_run` is set.
fn run_step(argv: &ArgVector, verbose: bool, dry_run: bool) -> Result<i32> {
    if dry_run {
        println!("{}", serde_json::to_string(argv)?);
        return Ok(0);
    }
    if verbose {
        println!("{} {}", "▶".cyan(), argv);
    }
    Ok(build::status(argv.run()))
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    sources: &[String],
    output: &str,
    compiler: &str,
    flags: &str,
    remove: &str,
    keep_objects: bool,
    verbose: bool,
    dry_run: bool,
) -> Result<i32> {
    let mut objects = Vec::new();

    for src in sources {
        let obj = object_name(src);
        let argv = build::compile_args(src, &obj, compiler, flags)
            .with_context(|| format!("Failed to prepare compile of {}", src))?;
        let code = run_step(&argv, verbose, dry_run)?;
        if code != 0 {
            eprintln!("{} Compiling {} failed", "x".red(), src);
            return Ok(code);
        }
        objects.push(obj);
    }

    let argv = build::link_args(compiler, &objects.join(" "), output)?;
    let code = run_step(&argv, verbose, dry_run)?;
    if code != 0 {
        eprintln!("{} Linking failed", "x".red());
        return Ok(code);
    }

    if !keep_objects && !dry_run {
        let mut dirs: Vec<String> = objects.iter().map(|o| object_dir(o)).collect();
        dirs.sort();
        dirs.dedup();
        build::clean(&dirs, remove)?;
    }

    if !dry_run {
        println!("{} Built {}", "✓".green(), output);
    }
    Ok(0)
}

fn clean_dirs(dirs: &[String], patterns: &str) -> Result<()> {
    let report = build::clean(dirs, patterns)?;

    if !report.warnings.is_empty() {
        println!(
            "{} {} file(s) could not be removed",
            "!".yellow(),
            report.warnings.len()
        );
    }
    if report.removed.is_empty() {
        println!("{} Nothing to clean", "!".yellow());
    } else {
        println!(
            "{} Clean complete ({} removed).",
            "✓".green(),
            report.removed.len()
        );
    }
    Ok(())
}

fn remove_here(patterns: &[String]) -> Result<()> {
    let mut removed = 0;
    for pattern in patterns {
        let report = build::wildcard_rm(pattern)?;
        removed += report.removed.len();
    }

    if removed == 0 {
        println!("{} Nothing to remove", "!".yellow());
    } else {
        println!("{} Removed {} file(s).", "✓".green(), removed);
    }
    Ok(())
}

fn finish(code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code.max(1))
    }
}

fn object_name(src: &str) -> String {
    Path::new(src).with_extension("o").to_string_lossy().to_string()
}

fn object_dir(obj: &str) -> String {
    match Path::new(obj).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().to_string(),
        _ => ".".to_string(),
    }
}
