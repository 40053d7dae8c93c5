//! Filesystem-backed host.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{expand_braces, split_negated, FileHost};
use crate::config::ConfigError;
use crate::paths;

/// [`FileHost`] over the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskHost;

impl DiskHost {
    /// Joins a user pattern onto `root`, escaping glob metacharacters in the root itself.
    fn rooted(root: &Path, pattern: &str) -> String {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        paths::resolve(Path::new(&escaped_root), pattern)
            .to_string_lossy()
            .into_owned()
    }

    fn invalid(pattern: &str, e: glob::PatternError) -> ConfigError {
        ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.msg.to_string(),
        }
    }

    /// Regular files matching any brace alternative of `pattern`, sorted.
    fn glob_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for alternative in expand_braces(pattern) {
            let full = Self::rooted(root, &alternative);
            let entries = glob::glob(&full).map_err(|e| Self::invalid(pattern, e))?;
            for entry in entries {
                let path = entry.with_context(|| format!("expand pattern {pattern}"))?;
                if path.is_file() {
                    let path = paths::normalize(&path);
                    if !files.contains(&path) {
                        files.push(path);
                    }
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

impl FileHost for DiskHost {
    fn expand(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut matched: Vec<PathBuf> = Vec::new();
        for pattern in patterns {
            let (negated, body) = split_negated(pattern);
            if negated {
                let excluded = expand_braces(body)
                    .iter()
                    .map(|alt| {
                        glob::Pattern::new(&Self::rooted(root, alt))
                            .map_err(|e| Self::invalid(pattern, e))
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                matched.retain(|p| !excluded.iter().any(|ex| ex.matches_path(p)));
            } else {
                for path in Self::glob_files(root, body)? {
                    if !matched.contains(&path) {
                        matched.push(path);
                    }
                }
            }
        }
        Ok(matched)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("write {}", path.display()))
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        let meta = fs::metadata(path).ok()?;
        meta.is_file().then(|| meta.len())
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("read {}", path.display()))
    }
}
