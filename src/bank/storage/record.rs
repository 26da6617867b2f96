use super::SkipReason;

use crate::{Account, Money};

use serde::{Deserialize, Serialize};

/// One account row of the data file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub account_number: String,
    pub name: String,
    pub balance: String,
}

impl AccountRecord {
    /// Runs the row through the same validation as a freshly created account
    pub fn into_account(self) -> Result<Account, SkipReason> {
        let balance = Money::parse(&self.balance).map_err(SkipReason::Balance)?;

        Account::new(self.account_number, self.name, balance).map_err(SkipReason::Invalid)
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.id().to_string(),
            name: account.holder_name().to_string(),
            balance: account.balance().to_string(),
        }
    }
}
