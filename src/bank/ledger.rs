use crate::error::TransferRole;
use crate::ids::AccountId;
use crate::storage::{self, RowOutcome, StoredLedger};
use crate::{Account, LedgerError, LedgerResult, Money, Result};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "bank_data.csv";

/// Only entry of [`Ledger::list_accounts`] when there is nothing to list
pub const NO_ACCOUNTS: &str = "No accounts in the system.";

const INITIAL_SEQUENCE: u64 = 1;

const NO_ACCOUNT_NUMBERS_LEFT: LedgerError =
    LedgerError::InvalidArgument("No account numbers left");

/// How the last [`Ledger::load`] went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No data file, or an empty one
    Fresh,
    Loaded {
        accounts: usize,
        skipped: usize,
        /// `false` when the header line wasn't `account_number,name,balance`
        header_matched: bool,
    },
    /// The file couldn't be read at all and the ledger was reset
    Failed(String),
}

/// Owns every account, mints account numbers, and is the only thing that touches the data file.
///
/// Accounts live in insertion order in `accounts` with `lookup_map` pointing into it, so listing
/// and saving keep the order accounts were created (or loaded) in.
///
/// There is no internal locking; callers sharing a ledger between threads must serialize access.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    accounts: Vec<Account>,
    lookup_map: HashMap<AccountId, usize>,
    next_sequence: u64,
    load_status: LoadStatus,
}

impl Ledger {
    /// Builds a ledger backed by the data file at `path` and loads whatever is in it.
    ///
    /// Never fails: a missing or broken file leaves an empty ledger, see [`Ledger::load_status`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut ledger = Self {
            path: path.into(),
            accounts: vec![],
            lookup_map: HashMap::new(),
            next_sequence: INITIAL_SEQUENCE,
            load_status: LoadStatus::Fresh,
        };

        ledger.load();

        ledger
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn create_account(
        &mut self,
        holder_name: &str,
        initial_balance: Money,
    ) -> LedgerResult<&Account> {
        if holder_name.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "Account holder name must be a non-empty string",
            ));
        }

        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidArgument(
                "Initial balance cannot be negative",
            ));
        }

        let (id, sequence) = self.allocate_id()?;
        let next_sequence = sequence.checked_add(1).ok_or(NO_ACCOUNT_NUMBERS_LEFT)?;
        let account = Account::new(id, holder_name, initial_balance)?;

        log::debug!("Creating account: {account:?}");

        let index = self.insert(account);
        self.next_sequence = next_sequence;

        Ok(&self.accounts[index])
    }

    pub fn find_account(&self, id: &str) -> Option<&Account> {
        self.lookup_map.get(id).map(|&index| &self.accounts[index])
    }

    /// Returns the new balance, or `None` if there is no account `id`
    pub fn deposit(&mut self, id: &str, amount: Money) -> LedgerResult<Option<Money>> {
        let account = match self.find_account_mut(id) {
            Some(account) => account,
            None => return Ok(None),
        };

        account.deposit(amount)?;

        log::debug!("Deposited {amount} into {id}");

        Ok(Some(account.balance()))
    }

    /// Returns the new balance, or `None` if there is no account `id`
    pub fn withdraw(&mut self, id: &str, amount: Money) -> LedgerResult<Option<Money>> {
        let account = match self.find_account_mut(id) {
            Some(account) => account,
            None => return Ok(None),
        };

        account.withdraw(amount)?;

        log::debug!("Withdrew {amount} from {id}");

        Ok(Some(account.balance()))
    }

    /// Moves `amount` between two distinct accounts. Both new balances are worked out before
    /// either account is touched, so a failed transfer leaves both untouched.
    pub fn transfer(&mut self, from_id: &str, to_id: &str, amount: Money) -> LedgerResult {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidArgument(
                "Transfer amount must be positive",
            ));
        }

        if from_id == to_id {
            return Err(LedgerError::InvalidArgument(
                "Cannot transfer money to the same account",
            ));
        }

        let from_idx = self.index_of(from_id, TransferRole::Sender)?;
        let to_idx = self.index_of(to_id, TransferRole::Recipient)?;

        let sender = &self.accounts[from_idx];
        if sender.balance() < amount {
            return Err(sender.insufficient_funds(amount));
        }

        let debited = sender.balance_after_withdrawal(amount)?;
        let credited = self.accounts[to_idx].balance_after_deposit(amount)?;

        self.accounts[from_idx].set_balance(debited);
        self.accounts[to_idx].set_balance(credited);

        log::debug!("Transferred {amount} from {from_id} to {to_id}");

        Ok(())
    }

    pub fn list_accounts(&self) -> Vec<String> {
        if self.accounts.is_empty() {
            return vec![NO_ACCOUNTS.to_string()];
        }

        self.accounts.iter().map(|account| account.to_string()).collect()
    }

    /// Overwrites the data file with the current state. Failures are logged before being returned.
    pub fn save(&self) -> Result {
        if let Err(e) = storage::write_ledger(&self.path, self.next_sequence, &self.accounts) {
            log::error!("Error saving data: {e}");
            Err(e)?
        }

        log::info!(
            "Saved {} accounts to {:?}",
            self.accounts.len(),
            self.path
        );

        Ok(())
    }

    /// Replaces the in-memory state with the content of the data file.
    ///
    /// Bad lines are skipped with a warning. If the file can't be read at all the ledger is left
    /// empty and the failure is reported through the returned status.
    pub fn load(&mut self) -> &LoadStatus {
        self.reset();

        self.load_status = match storage::read_ledger(&self.path) {
            Ok(None) => {
                log::info!("No data file found at {:?}, starting empty", self.path);
                LoadStatus::Fresh
            }
            Ok(Some(stored)) if stored == StoredLedger::default() => {
                log::info!("Data file {:?} is empty, starting empty", self.path);
                LoadStatus::Fresh
            }
            Ok(Some(stored)) => self.hydrate(stored),
            Err(e) => {
                log::error!("Critical error loading data: {e}. Starting with an empty ledger");
                LoadStatus::Failed(e.to_string())
            }
        };

        &self.load_status
    }

    fn hydrate(&mut self, stored: StoredLedger) -> LoadStatus {
        let skipped = stored.skipped_count();
        let header_matched = stored.header_matched;

        self.next_sequence = stored
            .sequence
            .unwrap_or(INITIAL_SEQUENCE)
            .max(INITIAL_SEQUENCE);

        for row in stored.rows {
            if let RowOutcome::Loaded(account) = row {
                self.insert(account);
            }
        }

        self.reconcile_sequence();

        log::info!(
            "Loaded {} accounts from {:?} ({skipped} lines skipped), next sequence {}",
            self.accounts.len(),
            self.path,
            self.next_sequence
        );

        LoadStatus::Loaded {
            accounts: self.accounts.len(),
            skipped,
            header_matched,
        }
    }

    /// Raises the counter past every loaded `ACC<n>` id. Ids outside that scheme are ignored.
    fn reconcile_sequence(&mut self) {
        let highest = self
            .accounts
            .iter()
            .filter_map(|account| account.id().sequence())
            .max();

        if let Some(highest) = highest {
            if highest >= self.next_sequence {
                log::debug!(
                    "Stale sequence {} raised past loaded account number {highest}",
                    self.next_sequence
                );
                self.next_sequence = highest.saturating_add(1);
            }
        }
    }

    /// First free account number at or after the counter, along with its sequence number
    fn allocate_id(&self) -> LedgerResult<(AccountId, u64)> {
        let mut sequence = self.next_sequence;

        loop {
            let id = AccountId::from_sequence(sequence);

            if !self.lookup_map.contains_key(&id) {
                return Ok((id, sequence));
            }

            sequence = sequence.checked_add(1).ok_or(NO_ACCOUNT_NUMBERS_LEFT)?;
        }
    }

    /// Later duplicates replace earlier ones in place
    fn insert(&mut self, account: Account) -> usize {
        if let Some(&index) = self.lookup_map.get(account.id()) {
            log::warn!("Duplicate account {}, keeping the later entry", account.id());
            self.accounts[index] = account;
            return index;
        }

        let index = self.accounts.len();

        self.lookup_map.insert(account.id().clone(), index);
        self.accounts.push(account);

        index
    }

    fn index_of(&self, id: &str, role: TransferRole) -> LedgerResult<usize> {
        self.lookup_map
            .get(id)
            .copied()
            .ok_or_else(|| LedgerError::NotFound {
                role,
                id: AccountId::new(id),
            })
    }

    fn find_account_mut(&mut self, id: &str) -> Option<&mut Account> {
        let index = *self.lookup_map.get(id)?;

        self.accounts.get_mut(index)
    }

    fn reset(&mut self) {
        self.accounts.clear();
        self.lookup_map.clear();
        self.next_sequence = INITIAL_SEQUENCE;
    }
}
