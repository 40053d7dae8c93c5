//! `datauri run [TASK]...` – run tasks from a task file.

use anyhow::Result;
use datauri_core::config::DatauriConfig;
use datauri_core::host::DiskHost;
use datauri_core::inline::{run_task, TaskReport};
use datauri_core::task::TaskFile;
use std::path::Path;

pub fn run_tasks(
    task_file: &Path,
    names: &[String],
    defaults: &DatauriConfig,
) -> Result<Vec<TaskReport>> {
    let file = TaskFile::load(task_file)?;
    // All selected tasks resolve before the first one runs.
    let tasks = file.select(names, defaults)?;
    if tasks.is_empty() {
        tracing::warn!("no tasks defined in {}", task_file.display());
    }
    tasks.iter().map(|task| run_task(&DiskHost, task)).collect()
}
