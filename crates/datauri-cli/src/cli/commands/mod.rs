//! CLI command handlers. Each command is in its own file.

mod completions;
mod inline;
mod list;
mod run;
mod summary;

pub use completions::run_completions;
pub use inline::{run_inline, InlineArgs};
pub use list::run_list;
pub use run::run_tasks;
pub use summary::print_reports;
