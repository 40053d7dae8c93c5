//! The inliner: rewrites local image `url(...)` references in a text file
//! into base64 data URIs.
//!
//! Per reference, failures never abort the file: a missing, empty, unreadable
//! or oversized image leaves its `url(...)` untouched and is logged. Only
//! reading the source or writing the output is fatal.

mod extract;
mod report;

pub use extract::{is_external, is_image, unique, url_references};
pub use report::{FileReport, Inlined, SkipReason, Skipped, TaskReport};

use anyhow::{anyhow, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_IMAGE_EXTENSIONS, DEFAULT_MAX_BYTES};
use crate::encode;
use crate::host::FileHost;
use crate::paths;
use crate::task::ResolvedTask;

/// Options for one inlining task.
#[derive(Debug, Clone)]
pub struct InlineOptions {
    /// Accepted suffixes without the dot. Empty matches nothing.
    pub image_extensions: Vec<String>,
    /// When set, decides image-ness instead of `image_extensions`.
    pub extension_regex: Option<Regex>,
    pub max_bytes: u64,
    /// Resolution root for relative URIs; the source file's directory when unset.
    pub base_dir: Option<PathBuf>,
    /// Glob patterns for the known image files.
    pub target: Vec<String>,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            extension_regex: None,
            max_bytes: DEFAULT_MAX_BYTES,
            base_dir: None,
            target: Vec::new(),
        }
    }
}

pub struct Inliner<'a, H: FileHost + ?Sized> {
    host: &'a H,
    options: &'a InlineOptions,
    image_files: HashSet<PathBuf>,
}

impl<'a, H: FileHost + ?Sized> Inliner<'a, H> {
    pub fn new(host: &'a H, options: &'a InlineOptions) -> Self {
        Self {
            host,
            options,
            image_files: HashSet::new(),
        }
    }

    /// Expands `target` relative to `root` into the set of known image files.
    pub fn prepare(&mut self, root: &Path) -> Result<usize> {
        for path in self.host.expand(root, &self.options.target)? {
            tracing::info!("path {}", path.display());
            self.image_files.insert(path);
        }
        tracing::info!("imageFiles {}", self.image_files.len());
        Ok(self.image_files.len())
    }

    /// Processes sources in order; the first fatal I/O error aborts the run.
    pub fn run(&self, task: &str, sources: &[PathBuf], dest_dir: &Path) -> Result<TaskReport> {
        let mut files = Vec::with_capacity(sources.len());
        for src in sources {
            files.push(self.process_file(src, dest_dir)?);
        }
        Ok(TaskReport {
            task: task.to_string(),
            image_files: self.image_files.len(),
            files,
        })
    }

    /// Inlines eligible references of `src` and writes the result to `dest_dir/<basename>`.
    pub fn process_file(&self, src: &Path, dest_dir: &Path) -> Result<FileReport> {
        let content = self.host.read_text(src)?;
        let file_name = src
            .file_name()
            .ok_or_else(|| anyhow!("source has no file name: {}", src.display()))?;
        let output = dest_dir.join(file_name);
        let base_dir = match &self.options.base_dir {
            Some(dir) => dir.clone(),
            None => paths::normalize(src.parent().unwrap_or(Path::new("."))),
        };

        let references = url_references(&content);
        if references.is_empty() {
            tracing::info!("SRC: file uri not found on {}", src.display());
            self.host.write_text(&output, &content)?;
            tracing::info!("Skipped");
            tracing::info!("=> {}", output.display());
            return Ok(FileReport {
                source: src.to_path_buf(),
                output,
                references: 0,
                candidates: 0,
                inlined: Vec::new(),
                skipped: Vec::new(),
            });
        }

        let uris: Vec<&str> = unique(&references)
            .into_iter()
            .filter(|u| !is_external(u))
            .filter(|u| is_image(u, self.options))
            .collect();
        tracing::info!("SRC: {} file uri found on {}", uris.len(), src.display());

        let mut rewritten = content.clone();
        let mut inlined = Vec::new();
        let mut skipped = Vec::new();

        for uri in &uris {
            let target = self.locate(uri, &base_dir, dest_dir);
            match self.check(&target) {
                Ok((size, bytes)) => {
                    tracing::info!("Encode: {}", target.display());
                    let encoded = encode::data_uri(&bytes, &target);
                    // Plain replace-all on the raw text: a shorter URI inlined first
                    // also rewrites its occurrences inside longer references.
                    rewritten = rewritten.replace(*uri, &encoded);
                    inlined.push(Inlined {
                        uri: uri.to_string(),
                        path: target,
                        size,
                    });
                }
                Err(reason) => {
                    tracing::warn!("{reason}");
                    skipped.push(Skipped {
                        uri: uri.to_string(),
                        reason,
                    });
                }
            }
        }

        self.host.write_text(&output, &rewritten)?;
        tracing::info!("=> {}", output.display());

        Ok(FileReport {
            source: src.to_path_buf(),
            output,
            references: references.len(),
            candidates: uris.len(),
            inlined,
            skipped,
        })
    }

    /// Absolute path a URI refers to: the known image when there is one,
    /// otherwise the URI re-leveled for the destination directory.
    fn locate(&self, uri: &str, base_dir: &Path, dest_dir: &Path) -> PathBuf {
        let fixed = paths::fix_root_relative(uri);
        let needle = paths::resolve(base_dir, &fixed);
        if self.image_files.contains(&needle) {
            return needle;
        }
        let adjusted = paths::adjust_directory_level(&fixed, dest_dir, base_dir);
        tracing::debug!("Adjust: {} -> {}", fixed, adjusted);
        paths::resolve(base_dir, adjusted)
    }

    /// Size and bytes of an inlinable file, or why it is not.
    fn check(&self, path: &Path) -> std::result::Result<(u64, Vec<u8>), SkipReason> {
        let size = self.host.file_size(path).ok_or_else(|| SkipReason::NotFound {
            path: path.to_path_buf(),
        })?;
        tracing::debug!("filesize: {}", size);

        if size == 0 {
            return Err(SkipReason::Empty {
                path: path.to_path_buf(),
            });
        }
        if size > self.options.max_bytes {
            return Err(SkipReason::TooLarge {
                path: path.to_path_buf(),
                size,
                max_bytes: self.options.max_bytes,
            });
        }

        let bytes = self
            .host
            .read_bytes(path)
            .map_err(|e| SkipReason::Unreadable {
                path: path.to_path_buf(),
                error: format!("{e:#}"),
            })?;
        Ok((size, bytes))
    }
}

/// Runs a resolved task end to end: image set, source expansion, then every source.
pub fn run_task<H: FileHost + ?Sized>(host: &H, task: &ResolvedTask) -> Result<TaskReport> {
    tracing::info!("running task {}", task.name);
    let mut inliner = Inliner::new(host, &task.options);
    inliner.prepare(&task.root)?;
    let sources = host.expand(&task.root, &task.src)?;
    inliner.run(&task.name, &sources, &task.dest)
}

#[cfg(test)]
mod tests;
