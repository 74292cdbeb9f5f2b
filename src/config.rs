//! Caller-owned defaults.
//!
//! The core never reads a config file. Drivers start from [`Defaults`] and may
//! layer environment overrides on top (`CC`, `CFLAGS`, `COOK_REMOVE`).

pub const DEFAULT_COMPILER: &str = "gcc";
pub const DEFAULT_FLAGS: &str = "-Wall -Wextra -pedantic -ansi -std=c11";
pub const DEFAULT_REMOVE: &str = "*.o";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Compiler, also used as the linker
    pub compiler: String,
    /// Space-delimited compiler flags
    pub flags: String,
    /// Space-delimited cleanup patterns
    pub remove: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            flags: DEFAULT_FLAGS.to_string(),
            remove: DEFAULT_REMOVE.to_string(),
        }
    }
}

impl Defaults {
    /// Defaults with `CC`, `CFLAGS` and `COOK_REMOVE` applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Defaults::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(cc) = non_empty("CC") {
            defaults.compiler = cc.trim().to_string();
        }
        if let Some(flags) = non_empty("CFLAGS") {
            defaults.flags = flags;
        }
        if let Some(remove) = non_empty("COOK_REMOVE") {
            defaults.remove = remove;
        }
        defaults
    }
}
