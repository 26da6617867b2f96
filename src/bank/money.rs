use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Money parse error: {0}, {1:?}")]
    Parse(&'static str, String),
}

/// Decimal monetary amount. Values are only guaranteed to be on a 2 place scale once they have
/// been through a [`Quantizer`]; amounts handed in by callers keep whatever precision they came with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a plain (`12.50`) or scientific (`1.25e1`) decimal string
    pub fn parse(string: &str) -> Result<Self, MoneyError> {
        let trimmed = string.trim();

        if trimmed.is_empty() {
            return Err(MoneyError::Parse("Empty amount", string.to_string()));
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| MoneyError::Parse("Not a decimal number", string.to_string()))?;

        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rounding configuration applied to every balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    scale: u32,
    strategy: RoundingStrategy,
}

impl Quantizer {
    /// Hundredths, rounding half to even (banker's rounding)
    pub const CENTS: Self = Self::new(2, RoundingStrategy::MidpointNearestEven);

    pub const fn new(scale: u32, strategy: RoundingStrategy) -> Self {
        Self { scale, strategy }
    }

    /// Rounds to `scale` places and pads so the result always carries exactly `scale` digits
    /// after the point (`100` becomes `100.00`). `None` when the value has too many integer
    /// digits left to hold that many places.
    pub fn quantize(&self, money: Money) -> Option<Money> {
        let mut value = money.0.round_dp_with_strategy(self.scale, self.strategy);
        value.rescale(self.scale);

        (value.scale() == self.scale).then_some(Money(value))
    }
}
