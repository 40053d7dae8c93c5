//! CLI for datauri.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use datauri_core::config;
use datauri_core::task::DEFAULT_TASK_FILE;
use std::path::PathBuf;

use commands::{print_reports, run_completions, run_inline, run_list, run_tasks, InlineArgs};

/// Top-level CLI for datauri.
#[derive(Debug, Parser)]
#[command(name = "datauri")]
#[command(about = "Inline small images referenced from CSS as base64 data URIs", long_about = None)]
pub struct Cli {
    /// Append logs to ~/.local/state/datauri/datauri.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run tasks from a task file (all tasks when none are named).
    Run {
        /// Task names, as in `[tasks.<name>]`.
        tasks: Vec<String>,
        /// Task file.
        #[arg(long, short, default_value = DEFAULT_TASK_FILE, value_name = "FILE")]
        config: PathBuf,
        /// Print reports as JSON instead of a summary table.
        #[arg(long)]
        json: bool,
    },

    /// Inline one set of files without a task file.
    Inline {
        /// Source glob pattern (repeatable; `!pattern` excludes).
        #[arg(long, required = true, value_name = "GLOB")]
        src: Vec<String>,
        /// Output directory.
        #[arg(long, value_name = "DIR")]
        dest: PathBuf,
        /// Glob pattern of known image files (repeatable).
        #[arg(long, required = true, value_name = "GLOB")]
        target: Vec<String>,
        /// Accepted image extension (repeatable); defaults to the user config.
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,
        /// Regex deciding which URIs are images; overrides --ext.
        #[arg(long, value_name = "REGEX")]
        ext_regex: Option<String>,
        /// Resolve relative URIs against this directory instead of each source's.
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
        /// Largest image, in bytes, that is still inlined.
        #[arg(long, value_name = "N")]
        max_bytes: Option<u64>,
        /// Print the report as JSON instead of a summary table.
        #[arg(long)]
        json: bool,
    },

    /// List tasks defined in a task file.
    List {
        /// Task file.
        #[arg(long, short, default_value = DEFAULT_TASK_FILE, value_name = "FILE")]
        config: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Run {
                tasks,
                config: task_file,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let reports = run_tasks(&task_file, &tasks, &cfg)?;
                print_reports(&reports, json)?;
            }
            CliCommand::Inline {
                src,
                dest,
                target,
                extensions,
                ext_regex,
                base_dir,
                max_bytes,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = InlineArgs {
                    src,
                    dest,
                    target,
                    extensions,
                    ext_regex,
                    base_dir,
                    max_bytes,
                };
                let report = run_inline(args, &std::env::current_dir()?, &cfg)?;
                print_reports(std::slice::from_ref(&report), json)?;
            }
            CliCommand::List { config: task_file } => run_list(&task_file)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
