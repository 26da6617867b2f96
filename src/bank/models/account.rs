use crate::ids::AccountId;
use crate::{LedgerError, LedgerResult, Money, Quantizer};

use std::fmt;

const BALANCE_OUT_OF_RANGE: &str = "Balance is too large to hold in cents";

/// A single named balance in the ledger. The balance is never negative and always sits on the
/// [`Quantizer::CENTS`] scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    holder_name: String,
    balance: Money,
}

impl Account {
    pub fn new(
        id: impl Into<AccountId>,
        holder_name: impl Into<String>,
        initial_balance: Money,
    ) -> LedgerResult<Self> {
        let id = id.into();
        let holder_name = holder_name.into();

        if id.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "Account number must be a non-empty string",
            ));
        }

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

        let balance = Quantizer::CENTS
            .quantize(initial_balance)
            .ok_or(LedgerError::InvalidArgument(BALANCE_OUT_OF_RANGE))?;

        Ok(Self {
            id,
            holder_name,
            balance,
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn deposit(&mut self, amount: Money) -> LedgerResult {
        self.balance = self.balance_after_deposit(amount)?;

        Ok(())
    }

    pub fn withdraw(&mut self, amount: Money) -> LedgerResult {
        self.balance = self.balance_after_withdrawal(amount)?;

        Ok(())
    }

    /// Validates a deposit and returns the resulting balance without applying it
    pub(crate) fn balance_after_deposit(&self, amount: Money) -> LedgerResult<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidArgument(
                "Deposit amount must be positive",
            ));
        }

        self.balance
            .checked_add(amount)
            .and_then(|total| Quantizer::CENTS.quantize(total))
            .ok_or(LedgerError::InvalidArgument(BALANCE_OUT_OF_RANGE))
    }

    /// Validates a withdrawal and returns the resulting balance without applying it
    pub(crate) fn balance_after_withdrawal(&self, amount: Money) -> LedgerResult<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidArgument(
                "Withdrawal amount must be positive",
            ));
        }

        if amount > self.balance {
            return Err(self.insufficient_funds(amount));
        }

        self.balance
            .checked_sub(amount)
            .and_then(|remaining| Quantizer::CENTS.quantize(remaining))
            .ok_or(LedgerError::InvalidArgument(BALANCE_OUT_OF_RANGE))
    }

    pub(crate) fn insufficient_funds(&self, requested: Money) -> LedgerError {
        LedgerError::InsufficientFunds {
            account: self.id.clone(),
            balance: self.balance,
            requested,
        }
    }

    /// Only for balances already validated by `balance_after_*`
    pub(crate) fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Account Number: {}, Holder: {}, Balance: {}",
            self.id, self.holder_name, self.balance
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    const SOME_ID: &str = "ACC001";
    const SOME_NAME: &str = "John Doe";

    fn build_account(balance: Money) -> Account {
        Account::new(SOME_ID, SOME_NAME, balance).unwrap()
    }

    #[test]
    fn new() {
        let account = build_account(Money::new(dec!(100.50)));

        assert_eq!(account.id().as_str(), SOME_ID);
        assert_eq!(account.holder_name(), SOME_NAME);
        assert_eq!(account.balance().to_string(), "100.50");
    }

    #[test]
    fn new_defaults_to_two_places() {
        let account = build_account(Money::ZERO);
        assert_eq!(account.balance().to_string(), "0.00");

        let account = build_account(Money::new(dec!(75)));
        assert_eq!(account.balance().to_string(), "75.00");
    }

    #[test]
    fn new_quantizes_initial_balance() {
        let account = build_account(Money::new(dec!(10.003)));
        assert_eq!(account.balance().to_string(), "10.00");

        let account = build_account(Money::new(dec!(10.005)));
        assert_eq!(account.balance().to_string(), "10.00");

        let account = build_account(Money::new(dec!(10.015)));
        assert_eq!(account.balance().to_string(), "10.02");
    }

    #[test]
    fn new_rejects_invalid_arguments() {
        assert!(matches!(
            Account::new("", SOME_NAME, Money::ZERO),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert!(matches!(
            Account::new(SOME_ID, "", Money::ZERO),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert!(matches!(
            Account::new(SOME_ID, SOME_NAME, Money::new(dec!(-0.01))),
            Err(LedgerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn new_rejects_balance_without_room_for_cents() {
        assert_eq!(
            Account::new(SOME_ID, SOME_NAME, Money::new(Decimal::MAX)),
            Err(LedgerError::InvalidArgument(BALANCE_OUT_OF_RANGE))
        );
    }

    #[test]
    fn deposit() {
        let mut account = build_account(Money::new(dec!(100)));

        account.deposit(Money::new(dec!(50.25))).unwrap();
        assert_eq!(account.balance().to_string(), "150.25");

        account.deposit(Money::new(dec!(0.01))).unwrap();
        assert_eq!(account.balance().to_string(), "150.26");
    }

    #[test]
    fn deposit_requantizes() {
        let mut account = build_account(Money::new(dec!(10.003)));

        account.deposit(Money::new(dec!(0.007))).unwrap();
        assert_eq!(account.balance().to_string(), "10.01");

        account.deposit(Money::new(dec!(0.005))).unwrap();
        assert_eq!(account.balance().to_string(), "10.02");
    }

    #[test]
    fn deposit_rejects_non_positive() {
        let mut account = build_account(Money::new(dec!(100)));

        assert_eq!(
            account.deposit(Money::ZERO),
            Err(LedgerError::InvalidArgument("Deposit amount must be positive"))
        );
        assert_eq!(
            account.deposit(Money::new(dec!(-10))),
            Err(LedgerError::InvalidArgument("Deposit amount must be positive"))
        );
        assert_eq!(account.balance().to_string(), "100.00");
    }

    #[test]
    fn deposit_rejects_balance_without_room_for_cents() {
        let mut account = build_account(Money::ZERO);

        assert_eq!(
            account.deposit(Money::new(Decimal::MAX)),
            Err(LedgerError::InvalidArgument(BALANCE_OUT_OF_RANGE))
        );
        assert_eq!(account.balance().to_string(), "0.00");

        let mut account = build_account(Money::new(dec!(1)));
        assert_eq!(
            account.deposit(Money::new(Decimal::MAX)),
            Err(LedgerError::InvalidArgument(BALANCE_OUT_OF_RANGE))
        );
        assert_eq!(account.balance().to_string(), "1.00");
    }

    #[test]
    fn withdraw() {
        let mut account = build_account(Money::new(dec!(100)));

        account.withdraw(Money::new(dec!(30.25))).unwrap();
        assert_eq!(account.balance().to_string(), "69.75");

        account.withdraw(Money::new(dec!(69.75))).unwrap();
        assert_eq!(account.balance().to_string(), "0.00");
    }

    #[test]
    fn withdraw_insufficient_funds() {
        let mut account = build_account(Money::new(dec!(50)));

        let err = account.withdraw(Money::new(dec!(50.01))).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                account: AccountId::new(SOME_ID),
                balance: Money::new(dec!(50.00)),
                requested: Money::new(dec!(50.01)),
            }
        );
        assert_eq!(account.balance().to_string(), "50.00");
    }

    #[test]
    fn withdraw_rejects_non_positive() {
        let mut account = build_account(Money::new(dec!(50)));

        assert!(matches!(
            account.withdraw(Money::ZERO),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert!(matches!(
            account.withdraw(Money::new(dec!(-5))),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert_eq!(account.balance().to_string(), "50.00");
    }

    #[test]
    fn withdraw_sub_cent_remainder_rounds_to_zero() {
        let mut account = build_account(Money::new(dec!(100)));

        account.withdraw(Money::new(dec!(99.995))).unwrap();
        assert_eq!(account.balance().to_string(), "0.00");
    }

    #[test]
    fn display() {
        let account = build_account(Money::new(dec!(12.5)));

        assert_eq!(
            account.to_string(),
            "Account Number: ACC001, Holder: John Doe, Balance: 12.50"
        );
    }
}
