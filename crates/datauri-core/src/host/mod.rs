//! Host capabilities the inliner depends on: pattern expansion and file I/O.
//!
//! The inliner only talks to [`FileHost`]; [`DiskHost`] is the real filesystem
//! and tests drive an in-memory fake.

mod disk;
#[cfg(test)]
pub(crate) mod memory;

pub use disk::DiskHost;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// File-level services provided by the surrounding build runner.
pub trait FileHost {
    /// Expands glob patterns relative to `root` into absolute paths of regular files.
    ///
    /// Patterns apply in order; a `!`-prefixed pattern removes earlier matches.
    /// The result holds no duplicates and keeps first-match order.
    fn expand(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>>;

    /// Reads a whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Writes text, creating missing parent directories.
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Size in bytes when `path` is an existing regular file.
    fn file_size(&self, path: &Path) -> Option<u64>;

    /// Reads a whole file as bytes.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Strips a leading `!` and reports whether the pattern excludes.
pub(crate) fn split_negated(pattern: &str) -> (bool, &str) {
    match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    }
}

/// Expands `{a,b}` alternatives, which `glob` does not understand, into plain patterns.
///
/// Groups nest and expand left to right; a group without a comma, or without a
/// closing brace, is left as literal text. Duplicates are dropped.
pub(crate) fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close, alternatives)) = first_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };
    let (prefix, suffix) = (&pattern[..open], &pattern[close + 1..]);

    let mut out: Vec<String> = Vec::new();
    for alternative in alternatives {
        for expanded in expand_braces(&format!("{prefix}{alternative}{suffix}")) {
            if !out.contains(&expanded) {
                out.push(expanded);
            }
        }
    }
    out
}

/// Byte offsets of the first `{...}` holding a top-level comma, plus its alternatives.
fn first_brace_group(pattern: &str) -> Option<(usize, usize, Vec<&str>)> {
    let bytes = pattern.as_bytes();
    let mut search_from = 0;
    while let Some(rel) = pattern[search_from..].find('{') {
        let open = search_from + rel;
        let mut depth = 0usize;
        let mut part_start = open + 1;
        let mut parts = Vec::new();
        for (i, b) in bytes.iter().enumerate().skip(open) {
            match b {
                b'{' => depth += 1,
                b',' if depth == 1 => {
                    parts.push(&pattern[part_start..i]);
                    part_start = i + 1;
                }
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        if !parts.is_empty() {
                            parts.push(&pattern[part_start..i]);
                            return Some((open, i, parts));
                        }
                        break;
                    }
                }
                _ => {}
            }
        }
        search_from = open + 1;
    }
    None
}
