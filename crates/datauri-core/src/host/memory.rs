//! In-memory host for inliner tests.

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{split_negated, FileHost};
use crate::paths;

/// Files keyed by absolute path. Patterns support a single trailing `*` segment
/// (`/site/img/*`) or an exact path, which is all the inliner tests need.
#[derive(Debug, Default)]
pub(crate) struct MemoryHost {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    /// Paths whose writes fail, to exercise fatal error propagation.
    read_only: Vec<PathBuf>,
    /// Paths that report a size but fail `read_bytes`.
    unreadable: Vec<PathBuf>,
}

impl MemoryHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_file(self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), body.into());
        self
    }

    pub(crate) fn with_read_only(mut self, path: &str) -> Self {
        self.read_only.push(PathBuf::from(path));
        self
    }

    pub(crate) fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.push(PathBuf::from(path));
        self
    }

    pub(crate) fn contents(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(Path::new(path))
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    fn matches(pattern: &Path, candidate: &Path) -> bool {
        match pattern.file_name().and_then(|n| n.to_str()) {
            Some("*") => candidate.parent() == pattern.parent(),
            _ => candidate == pattern,
        }
    }
}

impl FileHost for MemoryHost {
    fn expand(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let files = self.files.borrow();
        let mut matched: Vec<PathBuf> = Vec::new();
        for pattern in patterns {
            let (negated, body) = split_negated(pattern);
            let full = paths::resolve(root, body);
            if negated {
                matched.retain(|p| !Self::matches(&full, p));
            } else {
                for path in files.keys().filter(|p| Self::matches(&full, p)) {
                    if !matched.contains(path) {
                        matched.push(path.clone());
                    }
                }
            }
        }
        Ok(matched)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let files = self.files.borrow();
        let bytes = files
            .get(path)
            .ok_or_else(|| anyhow!("read {}: not found", path.display()))?;
        Ok(String::from_utf8(bytes.clone())?)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        if self.read_only.iter().any(|p| p == path) {
            return Err(anyhow!("write {}: read-only", path.display()));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        self.files.borrow().get(path).map(|b| b.len() as u64)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(anyhow!("read {}: permission denied", path.display()));
        }
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("read {}: not found", path.display()))
    }
}
