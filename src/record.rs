//! Wire representation: `{"amount": "100.50", "currency": "USD"}`.
//!
//! The amount travels as an exact decimal string in major units, so every
//! i64 minor-unit amount survives the round trip. On the way back in a JSON
//! number is accepted too, and either form is validated exactly like an
//! amount passed to [`Money::new`].

use crate::currency::CurrencyRegistry;
use crate::error::{MoneyError, Result};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialized form of a [`Money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyRecord {
    /// Amount in major units
    pub amount: Decimal,

    /// ISO 4217 alphabetic code
    pub currency: String,
}

impl MoneyRecord {
    /// Captures a money value. Fails for money without a currency.
    pub fn from_money(money: &Money<'_>) -> Result<Self> {
        let code = money.currency_code().ok_or(MoneyError::MissingCurrency)?;
        Ok(MoneyRecord {
            amount: money.amount_as_decimal(),
            currency: code.to_string(),
        })
    }

    /// Rebuilds the money against `registry`, with the same validation as
    /// construction.
    pub fn into_money_in<'c>(&self, registry: &'c CurrencyRegistry) -> Result<Money<'c>> {
        if self.currency.is_empty() {
            return Err(MoneyError::EmptyCurrencyCode);
        }
        Money::new_in(registry, self.amount, &self.currency)
    }

    /// Rebuilds the money against the ISO 4217 registry.
    pub fn into_money(&self) -> Result<Money<'static>> {
        self.into_money_in(CurrencyRegistry::iso4217())
    }
}

impl Serialize for Money<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        MoneyRecord::from_money(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money<'static> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        MoneyRecord::deserialize(deserializer)?
            .into_money()
            .map_err(serde::de::Error::custom)
    }
}
