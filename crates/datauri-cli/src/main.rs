use clap::Parser;
use datauri_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.log_file {
        if let Err(err) = logging::init_logging_to_file() {
            logging::init_logging_stderr();
            tracing::warn!("log file unavailable ({:#}); logging to stderr", err);
        }
    } else {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run() {
        eprintln!("datauri error: {:#}", err);
        std::process::exit(1);
    }
}
