use super::{AccountRecord, StorageError, HEADER, METADATA_TAG};

use crate::{Account, LedgerError, MoneyError};

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use csv::{ByteRecord, ReaderBuilder, StringRecord};

use thiserror::Error;

/// Why a data line was left out of the ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected 3 columns, found {0}")]
    ColumnCount(usize),

    #[error("row is not valid UTF-8")]
    Encoding,

    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("invalid balance: {0}")]
    Balance(#[source] MoneyError),

    #[error("invalid account: {0}")]
    Invalid(#[source] LedgerError),
}

/// Result of parsing a single data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Loaded(Account),
    Skipped { line: u64, reason: SkipReason },
}

/// Everything recovered from a data file. Parsing never stops at a bad line, so `rows` holds one
/// outcome per data line in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredLedger {
    /// Sequence counter from the metadata line, `None` when that line was missing or unreadable
    pub sequence: Option<u64>,
    pub header_matched: bool,
    pub rows: Vec<RowOutcome>,
}

impl StoredLedger {
    #[cfg(test)]
    pub(crate) fn loaded(&self) -> impl Iterator<Item = &Account> {
        self.rows.iter().filter_map(|row| match row {
            RowOutcome::Loaded(account) => Some(account),
            RowOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, RowOutcome::Skipped { .. }))
            .count()
    }
}

/// Reads the data file at `path`. A missing file is not an error and yields `Ok(None)`.
pub fn read_ledger(path: &Path) -> Result<Option<StoredLedger>, StorageError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No data file found at {path:?}");
            return Ok(None);
        }
        Err(e) => return Err(StorageError::Open(path.to_path_buf(), e)),
    };

    parse_ledger(file).map(Some)
}

/// Parses a data file's content.
///
/// Only I/O failures of the underlying reader are returned as errors; every content problem is
/// degraded to a warning and either a default value or a skipped row.
pub fn parse_ledger<R: Read>(rdr: R) -> Result<StoredLedger, StorageError> {
    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr)
        .into_byte_records();

    let mut next_record = || records.next().transpose().map_err(StorageError::Read);

    let mut stored = StoredLedger::default();

    let first = match next_record()? {
        Some(record) => record,
        None => {
            log::debug!("Data file is empty");
            return Ok(stored);
        }
    };

    // Without a usable metadata line, the first line is read again as the header
    let header = match parse_metadata(&first) {
        Some(sequence) => {
            stored.sequence = Some(sequence);
            next_record()?
        }
        None => {
            log::warn!(
                "Missing or unreadable metadata line {:?}, using the default sequence number",
                lossy(&first)
            );
            Some(first)
        }
    };

    let header = match header {
        Some(header) => header,
        None => return Ok(stored),
    };

    stored.header_matched = header.iter().eq(HEADER.iter().map(|column| column.as_bytes()));
    if !stored.header_matched {
        log::warn!(
            "CSV header mismatch. Expected {HEADER:?}, got {:?}. Attempting to load the remaining lines anyway",
            lossy(&header)
        );
    }

    while let Some(record) = next_record()? {
        let row = parse_row(record);

        if let RowOutcome::Skipped { line, reason } = &row {
            log::warn!("Skipping line {line} of data file: {reason}");
        }

        stored.rows.push(row);
    }

    Ok(stored)
}

fn parse_metadata(record: &ByteRecord) -> Option<u64> {
    if record.get(0) != Some(METADATA_TAG.as_bytes()) {
        return None;
    }

    let value = std::str::from_utf8(record.get(1)?).ok()?;

    value.trim().parse().ok()
}

fn parse_row(record: ByteRecord) -> RowOutcome {
    let line = record.position().map(|pos| pos.line()).unwrap_or_default();

    match parse_account(record) {
        Ok(account) => RowOutcome::Loaded(account),
        Err(reason) => RowOutcome::Skipped { line, reason },
    }
}

fn parse_account(record: ByteRecord) -> Result<Account, SkipReason> {
    if record.len() != HEADER.len() {
        return Err(SkipReason::ColumnCount(record.len()));
    }

    let record = StringRecord::from_byte_record(record).map_err(|_| SkipReason::Encoding)?;

    let record: AccountRecord = record
        .deserialize(None)
        .map_err(|e| SkipReason::Malformed(e.to_string()))?;

    record.into_account()
}

fn lossy(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
