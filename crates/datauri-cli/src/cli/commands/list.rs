//! `datauri list` – show tasks in a task file.

use anyhow::Result;
use datauri_core::task::TaskFile;
use std::path::Path;

pub fn run_list(task_file: &Path) -> Result<()> {
    let file = TaskFile::load(task_file)?;
    if file.tasks.is_empty() {
        println!("No tasks in {}.", task_file.display());
        return Ok(());
    }
    println!("{:<16} {:<24} {}", "TASK", "DEST", "SRC");
    for (name, task) in &file.tasks {
        let dest = task
            .dest
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        let src = task
            .src
            .clone()
            .map(|s| s.into_vec().join(" "))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<16} {:<24} {}", name, dest, src);
    }
    Ok(())
}
