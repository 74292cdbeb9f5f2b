//! Shell-style wildcard patterns.
//!
//! Supported syntax, per `/`-separated component:
//!
//! - `*` any run of characters, `?` any single character
//! - `[abc]`, `[a-z]`, `[!a-z]` / `[^a-z]` character classes
//! - `[[:alpha:]]` and the other POSIX named classes inside a bracket
//! - `\x` matches `x` literally
//!
//! Wildcards never match a leading `.` unless the component itself starts
//! with a literal (or escaped) `.`. Components without wildcards match only
//! an entry that exists. Expansion results are sorted.

use crate::error::CookError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Component {
    Literal(String),
    Wild { regex: Regex, dot: bool },
}

impl Component {
    fn matches(&self, name: &str) -> bool {
        match self {
            Component::Literal(lit) => lit == name,
            Component::Wild { regex, dot } => {
                if name.starts_with('.') && !dot {
                    return false;
                }
                regex.is_match(name)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    absolute: bool,
    components: Vec<Component>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, CookError> {
        if pattern.is_empty() {
            return Err(CookError::glob(pattern, "empty pattern"));
        }

        let mut components = Vec::new();
        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            components.push(compile_component(part).map_err(|e| CookError::glob(pattern, e))?);
        }
        if components.is_empty() {
            return Err(CookError::glob(pattern, "pattern names no files"));
        }

        Ok(Self {
            source: pattern.to_string(),
            absolute: pattern.starts_with('/'),
            components,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a `/`-separated relative path against the pattern, without
    /// touching the filesystem.
    pub fn matches(&self, path: &str) -> bool {
        let names: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        names.len() == self.components.len()
            && self
                .components
                .iter()
                .zip(&names)
                .all(|(comp, name)| comp.matches(name))
    }

    /// Expand against `base` (ignored for absolute patterns).
    ///
    /// Returned paths are `base` joined with each match. No match is an empty
    /// list; unreadable directories are a [`CookError::Glob`].
    pub fn expand(&self, base: &Path) -> Result<Vec<PathBuf>, CookError> {
        let root = if self.absolute {
            PathBuf::from("/")
        } else {
            base.to_path_buf()
        };

        let mut candidates = vec![root];
        let last = self.components.len() - 1;

        for (i, comp) in self.components.iter().enumerate() {
            let mut next = Vec::new();
            for dir in &candidates {
                match comp {
                    Component::Literal(name) => {
                        let path = dir.join(name);
                        let keep = if i == last {
                            fs::symlink_metadata(&path).is_ok()
                        } else {
                            path.is_dir()
                        };
                        if keep {
                            next.push(path);
                        }
                    }
                    Component::Wild { .. } => {
                        let entries = fs::read_dir(dir).map_err(|e| {
                            CookError::glob(&self.source, format!("{}: {}", dir.display(), e))
                        })?;
                        for entry in entries {
                            let entry = entry.map_err(|e| {
                                CookError::glob(&self.source, format!("{}: {}", dir.display(), e))
                            })?;
                            let name = entry.file_name();
                            if !comp.matches(&name.to_string_lossy()) {
                                continue;
                            }
                            let path = entry.path();
                            if i == last || path.is_dir() {
                                next.push(path);
                            }
                        }
                    }
                }
            }
            candidates = next;
            if candidates.is_empty() {
                break;
            }
        }

        candidates.sort();
        Ok(candidates)
    }
}

fn compile_component(part: &str) -> Result<Component, String> {
    let mut body = String::from("^(?s:");
    let mut literal = String::new();
    let mut wild = false;
    let mut chars = part.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().ok_or("trailing backslash")?;
                literal.push(escaped);
                body.push_str(&regex::escape(&escaped.to_string()));
            }
            '*' => {
                wild = true;
                body.push_str(".*");
            }
            '?' => {
                wild = true;
                body.push('.');
            }
            '[' => {
                wild = true;
                body.push_str(&compile_class(&mut chars)?);
            }
            _ => {
                literal.push(c);
                body.push_str(&regex::escape(&c.to_string()));
            }
        }
    }
    body.push_str(")$");

    if !wild {
        return Ok(Component::Literal(literal));
    }
    let regex = Regex::new(&body).map_err(|e| e.to_string())?;
    Ok(Component::Wild {
        regex,
        dot: part.starts_with('.') || part.starts_with("\\."),
    })
}

/// Translate the rest of a `[...]` class (opening bracket already consumed).
fn compile_class(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String, String> {
    let mut class = String::from("[");
    if matches!(chars.peek(), Some('!') | Some('^')) {
        chars.next();
        class.push('^');
    }

    let mut first = true;
    loop {
        let c = match chars.next() {
            None => return Err("unterminated character class".to_string()),
            Some(']') if !first => break,
            Some('\\') => chars.next().ok_or("trailing backslash")?,
            Some('[') => match named_class(chars)? {
                Some(named) => {
                    class.push_str(&named);
                    first = false;
                    continue;
                }
                None => '[',
            },
            Some(c) => c,
        };
        first = false;

        class.push_str(&regex::escape(&c.to_string()));
        if chars.peek() == Some(&'-') {
            let mut lookahead = chars.clone();
            lookahead.next();
            match lookahead.next() {
                Some(']') | None => {}
                Some(end) => {
                    chars.next();
                    chars.next();
                    if end < c {
                        return Err(format!("invalid range {}-{}", c, end));
                    }
                    class.push('-');
                    class.push_str(&regex::escape(&end.to_string()));
                }
            }
        }
    }

    class.push(']');
    Ok(class)
}

const NAMED_CLASSES: &[&str] = &[
    "alnum", "alpha", "blank", "cntrl", "digit", "graph", "lower", "print", "punct", "space",
    "upper", "xdigit",
];

/// Parse `[:name:]` after a `[` inside a class. `None` means the `[` is literal.
fn named_class(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<Option<String>, String> {
    let mut lookahead = chars.clone();
    if lookahead.next() != Some(':') {
        return Ok(None);
    }

    let mut name = String::new();
    loop {
        match lookahead.next() {
            Some(':') if lookahead.peek() == Some(&']') => {
                lookahead.next();
                break;
            }
            Some(c) if c.is_ascii_alphabetic() => name.push(c),
            _ => return Ok(None),
        }
    }

    if !NAMED_CLASSES.contains(&name.as_str()) {
        return Err(format!("unknown character class [:{}:]", name));
    }
    *chars = lookahead;
    Ok(Some(format!("[:{}:]", name)))
}
