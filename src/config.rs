use crate::args::Command;

use bank::Result;

use std::path::PathBuf;

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Everything a single run needs: where the ledger lives and what to do with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub command: Command,
}

/// Logs go to stderr at `Warn` unless `RUST_LOG` says otherwise, so skipped data file lines are
/// always visible without mixing into command output.
pub fn configure_logging() -> Result {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    Ok(())
}
