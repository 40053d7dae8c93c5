//! Report output shared by `run` and `inline`.

use anyhow::Result;
use datauri_core::inline::TaskReport;

pub fn print_reports(reports: &[TaskReport], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }
    println!(
        "{:<16} {:<6} {:<8} {:<8} {}",
        "TASK", "FILES", "INLINED", "SKIPPED", "IMAGES"
    );
    for r in reports {
        println!(
            "{:<16} {:<6} {:<8} {:<8} {}",
            r.task,
            r.files.len(),
            r.inlined_count(),
            r.skipped_count(),
            r.image_files
        );
    }
    Ok(())
}
