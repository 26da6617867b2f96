//! On-disk format of the ledger.
//!
//! ```text
//! METADATA,4
//! account_number,name,balance
//! ACC001,Alice,25.00
//! ACC003,Bob,125.00
//! ```
//!
//! The first line carries the next account sequence number, the second is a fixed header, and
//! every following line is one account with its balance written to exactly 2 decimal places.

mod reader;
mod record;
mod writer;

pub use reader::{parse_ledger, read_ledger, RowOutcome, SkipReason, StoredLedger};
pub use record::AccountRecord;
pub use writer::write_ledger;

use std::path::PathBuf;

use thiserror::Error;

pub const METADATA_TAG: &str = "METADATA";
pub const HEADER: [&str; 3] = ["account_number", "name", "balance"];

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Couldn't open data file {0:?}: {1}")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Couldn't read data file: {0}")]
    Read(#[source] csv::Error),

    #[error("Couldn't write data file {0:?}: {1}")]
    Write(PathBuf, #[source] csv::Error),
}
