//! `datauri inline` – one-off run configured entirely from flags.

use anyhow::Result;
use datauri_core::config::DatauriConfig;
use datauri_core::host::DiskHost;
use datauri_core::inline::{run_task, TaskReport};
use datauri_core::task::{Patterns, ResolvedTask, TaskConfig, TaskOptions};
use std::path::{Path, PathBuf};

/// Flags of the `inline` command.
#[derive(Debug, Clone, Default)]
pub struct InlineArgs {
    pub src: Vec<String>,
    pub dest: PathBuf,
    pub target: Vec<String>,
    pub extensions: Vec<String>,
    pub ext_regex: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub max_bytes: Option<u64>,
}

impl InlineArgs {
    fn into_task_config(self) -> TaskConfig {
        TaskConfig {
            src: Some(Patterns::Many(self.src)),
            dest: Some(self.dest),
            options: TaskOptions {
                target: Some(Patterns::Many(self.target)),
                image_extensions: (!self.extensions.is_empty()).then_some(self.extensions),
                image_extension_regex: self.ext_regex,
                max_bytes: self.max_bytes,
                base_dir: self.base_dir,
            },
        }
    }
}

/// Runs the flags as an ad-hoc task rooted at `root` (normally the current directory).
pub fn run_inline(args: InlineArgs, root: &Path, defaults: &DatauriConfig) -> Result<TaskReport> {
    let task = ResolvedTask::resolve("inline", args.into_task_config(), root, defaults)?;
    run_task(&DiskHost, &task)
}
