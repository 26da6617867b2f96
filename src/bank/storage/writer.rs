use super::{AccountRecord, StorageError, HEADER, METADATA_TAG};

use crate::Account;

use std::{io::Write, path::Path};

use csv::{Writer, WriterBuilder};

/// Replaces the data file at `path` with the given counter and accounts
pub fn write_ledger<'a>(
    path: &Path,
    sequence: u64,
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Result<(), StorageError> {
    let wtr = build_csv_writer()
        .from_path(path)
        .map_err(|e| StorageError::Write(path.to_path_buf(), e))?;

    write_records(wtr, sequence, accounts).map_err(|e| StorageError::Write(path.to_path_buf(), e))
}

fn build_csv_writer() -> WriterBuilder {
    let mut builder = WriterBuilder::new();

    // The metadata line has fewer columns than the account rows
    builder.has_headers(false).flexible(true);

    builder
}

fn write_records<'a, W: Write>(
    mut wtr: Writer<W>,
    sequence: u64,
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Result<(), csv::Error> {
    wtr.write_record([METADATA_TAG, sequence.to_string().as_str()])?;
    wtr.write_record(HEADER)?;

    for account in accounts {
        log::debug!("Serializing account: {account:?}");
        wtr.serialize(AccountRecord::from(account))?;
    }

    wtr.flush()?;

    Ok(())
}
