//! Exact integer money arithmetic.
//!
//! Amounts are integers in the smallest currency subunit (e.g. cents) and
//! cross the wire as decimal strings, never as binary floats. All arithmetic
//! is checked: overflow and currency mixing fail instead of producing a
//! wrong total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogItem;

/// ISO 4217 currency code (e.g. "USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Errors from money construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// An amount was negative where only non-negative values are valid.
    #[error("negative amount: {0}")]
    NegativeAmount(i64),

    /// Integer overflow while computing a total.
    #[error("amount overflow while computing total")]
    Overflow,

    /// Two amounts in different currencies were combined.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        expected: CurrencyCode,
        found: CurrencyCode,
    },

    /// A total was requested over no lines.
    #[error("cannot total an empty line sequence")]
    EmptyLines,
}

/// A non-negative amount in the smallest subunit of a single currency.
///
/// Serializes the amount as a decimal string:
/// `{"amount": "1100", "currency": "USD"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    #[serde(with = "amount_string")]
    amount: i64,
    currency: CurrencyCode,
}

impl Money {
    /// Creates a money value, rejecting negative amounts.
    pub fn new(amount: i64, currency: impl Into<CurrencyCode>) -> Result<Self, MoneyError> {
        if amount < 0 {
            return Err(MoneyError::NegativeAmount(amount));
        }
        Ok(Self {
            amount,
            currency: currency.into(),
        })
    }

    /// Returns zero in the given currency.
    pub fn zero(currency: impl Into<CurrencyCode>) -> Self {
        Self {
            amount: 0,
            currency: currency.into(),
        }
    }

    /// Returns the amount in smallest subunits.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency code.
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Adds another amount of the same currency, failing on mismatch or
    /// overflow.
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: self.currency.clone(),
                found: other.currency.clone(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Multiplies by a quantity, failing on overflow.
    pub fn checked_mul(&self, quantity: u32) -> Result<Money, MoneyError> {
        let amount = self
            .amount
            .checked_mul(i64::from(quantity))
            .ok_or(MoneyError::Overflow)?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Computes the exact total of resolved (item, quantity) lines.
///
/// All lines must share one currency; a mix indicates an upstream validation
/// bug and is rejected rather than silently resolved. Overflow fails closed.
pub fn compute_total<'a, I>(lines: I) -> Result<Money, MoneyError>
where
    I: IntoIterator<Item = (&'a CatalogItem, u32)>,
{
    let mut lines = lines.into_iter();
    let (first_item, first_qty) = lines.next().ok_or(MoneyError::EmptyLines)?;
    let mut total = first_item.unit_price.checked_mul(first_qty)?;

    for (item, quantity) in lines {
        let line_total = item.unit_price.checked_mul(quantity)?;
        total = total.checked_add(&line_total)?;
    }

    Ok(total)
}

mod amount_string {
    use serde::de::{Deserializer, Error};
    use serde::ser::Serializer;
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(amount: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let amount: i64 = raw
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid amount: {raw:?}")))?;
        if amount < 0 {
            return Err(D::Error::custom(format!("negative amount: {amount}")));
        }
        Ok(amount)
    }
}
