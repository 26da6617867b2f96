use crate::error::LedgerError;

/// Convenience type to make error mapping cleaner
pub type Result<T = ()> = anyhow::Result<T>;

/// Result of a ledger operation whose failure kind the caller is expected to match on
pub type LedgerResult<T = ()> = std::result::Result<T, LedgerError>;
