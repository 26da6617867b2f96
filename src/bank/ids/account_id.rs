use std::borrow::Borrow;
use std::fmt;

/// Prefix of every account number minted by the ledger
pub const ACCOUNT_PREFIX: &str = "ACC";

/// Opaque account identifier.
///
/// Minted ids follow `ACC` + sequence number zero-padded to 3 digits, but ids read back from
/// storage may be anything non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{ACCOUNT_PREFIX}{sequence:03}"))
    }

    /// Numeric part of a minted id, `None` for ids that don't follow the prefix + number scheme
    pub fn sequence(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(ACCOUNT_PREFIX)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
