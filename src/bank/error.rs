use crate::ids::AccountId;
use crate::Money;

use std::fmt;

use thiserror::Error;

/// Which end of a transfer an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferRole {
    Sender,
    Recipient,
}

impl fmt::Display for TransferRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransferRole::Sender => write!(f, "Sender"),
            TransferRole::Recipient => write!(f, "Recipient"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Money,
        requested: Money,
    },

    #[error("{role} account {id} not found")]
    NotFound { role: TransferRole, id: AccountId },
}
