//! Per-file and per-task outcomes of an inlining run.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Why a reference was left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    NotFound { path: PathBuf },
    /// Zero-byte file; nothing worth inlining.
    Empty { path: PathBuf },
    TooLarge { path: PathBuf, size: u64, max_bytes: u64 },
    Unreadable { path: PathBuf, error: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound { path } => write!(f, "file not found. {}", path.display()),
            SkipReason::Empty { path } => write!(f, "file is empty. {}", path.display()),
            SkipReason::TooLarge {
                path,
                size,
                max_bytes,
            } => write!(f, "Skipping (size {size} > {max_bytes}): {}", path.display()),
            SkipReason::Unreadable { path, error } => {
                write!(f, "file unreadable. {}: {error}", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub uri: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inlined {
    pub uri: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    /// `url(...)` occurrences in the source, before any filtering.
    pub references: usize,
    /// Unique local image URIs left after filtering.
    pub candidates: usize,
    pub inlined: Vec<Inlined>,
    pub skipped: Vec<Skipped>,
}

impl FileReport {
    /// True when the file had no `url(...)` at all and was copied verbatim.
    pub fn is_passthrough(&self) -> bool {
        self.references == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub task: String,
    pub image_files: usize,
    pub files: Vec<FileReport>,
}

impl TaskReport {
    pub fn inlined_count(&self) -> usize {
        self.files.iter().map(|f| f.inlined.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().map(|f| f.skipped.len()).sum()
    }
}
