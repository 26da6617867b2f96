mod error;
pub mod ids;
mod ledger;
pub mod models;
mod money;
mod result;
pub mod storage;

pub use error::{LedgerError, TransferRole};
pub use ids::AccountId;
pub use ledger::{Ledger, LoadStatus, DEFAULT_DATA_FILE, NO_ACCOUNTS};
pub use models::Account;
pub use money::{Money, MoneyError, Quantizer};
pub use result::{LedgerResult, Result};
