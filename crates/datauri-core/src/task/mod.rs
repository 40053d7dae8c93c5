//! Task file: named inlining tasks, each with `src`, `dest` and `options`.
//!
//! ```toml
//! [tasks.styles]
//! src = ["css/*.css"]
//! dest = "dist/css"
//!
//! [tasks.styles.options]
//! target = "img/**/*"
//! maxBytes = 4096
//! ```
//!
//! Option keys accept both snake_case and the camelCase spelling used by
//! existing build configs.

mod resolve;

pub use resolve::ResolvedTask;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, DatauriConfig};
use crate::paths;

/// Default task file name, looked up in the current directory.
pub const DEFAULT_TASK_FILE: &str = "datauri.toml";

/// One glob pattern or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Patterns::One(p) => vec![p],
            Patterns::Many(ps) => ps,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskOptions {
    #[serde(default)]
    pub target: Option<Patterns>,
    #[serde(default, alias = "imageExtensions")]
    pub image_extensions: Option<Vec<String>>,
    #[serde(default, alias = "imageExtensionRegex")]
    pub image_extension_regex: Option<String>,
    #[serde(default, alias = "maxBytes")]
    pub max_bytes: Option<u64>,
    #[serde(default, alias = "baseDir")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default)]
    pub src: Option<Patterns>,
    #[serde(default)]
    pub dest: Option<PathBuf>,
    #[serde(default)]
    pub options: TaskOptions,
}

/// Parsed task file. `root` is the directory relative paths resolve against.
#[derive(Debug, Clone)]
pub struct TaskFile {
    pub root: PathBuf,
    pub tasks: BTreeMap<String, TaskConfig>,
}

#[derive(Debug, Deserialize)]
struct RawTaskFile {
    #[serde(default)]
    tasks: BTreeMap<String, TaskConfig>,
}

impl TaskFile {
    /// Reads and parses a task file.
    pub fn load(path: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("current directory")?;
        let path = paths::resolve(&cwd, path);
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("read task file {}", path.display()))?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
        Self::parse(&data, root).with_context(|| format!("parse task file {}", path.display()))
    }

    pub fn parse(data: &str, root: PathBuf) -> Result<Self> {
        let raw: RawTaskFile = toml::from_str(data)?;
        Ok(Self {
            root,
            tasks: raw.tasks,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Resolves the named tasks, or every task in name order when `names` is empty.
    pub fn select(&self, names: &[String], defaults: &DatauriConfig) -> Result<Vec<ResolvedTask>> {
        if names.is_empty() {
            return self
                .tasks
                .iter()
                .map(|(name, cfg)| ResolvedTask::resolve(name, cfg.clone(), &self.root, defaults))
                .collect();
        }
        names
            .iter()
            .map(|name| {
                let cfg = self
                    .tasks
                    .get(name)
                    .ok_or_else(|| ConfigError::UnknownTask(name.clone()))?;
                ResolvedTask::resolve(name, cfg.clone(), &self.root, defaults)
            })
            .collect()
    }
}
