//! Defaulting and validation of a task into ready-to-run inputs.

use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

use super::TaskConfig;
use crate::config::{ConfigError, DatauriConfig};
use crate::inline::InlineOptions;
use crate::paths;

/// A task with every path absolute and every option defaulted.
#[derive(Debug, Clone)]
pub struct ResolvedTask {
    pub name: String,
    /// Directory that `src` and `target` patterns are relative to.
    pub root: PathBuf,
    pub src: Vec<String>,
    pub dest: PathBuf,
    pub options: InlineOptions,
}

impl ResolvedTask {
    pub fn resolve(
        name: &str,
        cfg: TaskConfig,
        root: &Path,
        defaults: &DatauriConfig,
    ) -> Result<Self> {
        let missing = |field: &'static str| ConfigError::MissingField {
            task: name.to_string(),
            field,
        };

        let src = cfg.src.ok_or_else(|| missing("src"))?.into_vec();
        let dest = cfg.dest.ok_or_else(|| missing("dest"))?;
        let opts = cfg.options;
        let target = opts.target.ok_or_else(|| missing("options.target"))?.into_vec();

        let extension_regex = opts
            .image_extension_regex
            .map(|pattern| {
                Regex::new(&pattern)
                    .map_err(|source| ConfigError::InvalidExtensionRegex { pattern, source })
            })
            .transpose()?;

        Ok(Self {
            name: name.to_string(),
            root: root.to_path_buf(),
            src,
            dest: paths::resolve(root, dest),
            options: InlineOptions {
                image_extensions: opts
                    .image_extensions
                    .unwrap_or_else(|| defaults.image_extensions.clone()),
                extension_regex,
                max_bytes: opts.max_bytes.unwrap_or(defaults.max_bytes),
                base_dir: opts.base_dir.map(|d| paths::resolve(root, d)),
                target,
            },
        })
    }
}
