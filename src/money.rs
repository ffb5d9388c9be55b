//! The money value type: construction, accessors and comparison.
//!
//! A `Money` is an integer count of a currency's minor units. Nothing in
//! this crate stores a fractional amount; decimal and float inputs are
//! validated and converted once, at construction.

use crate::currency::{Currency, CurrencyRegistry};
use crate::error::{MoneyError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Repr<'c> {
    Valid {
        amount: i64,
        currency: &'c Currency,
    },
    #[default]
    Invalid,
}

/// An immutable amount of money bound to a currency.
///
/// The lifetime ties the value to the [`CurrencyRegistry`] its currency
/// came from; values built with the ISO registry are `Money<'static>`.
/// A money without a currency is *invalid*: it answers the sign and zero
/// tests but fails arithmetic and comparison.
///
/// # Examples
///
/// ```
/// use pennywise::Money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let price = Money::new(Decimal::from_str("100.50").unwrap(), "USD").unwrap();
/// assert_eq!(price.amount_in_minor_units(), 10050);
/// assert_eq!(price.to_string(), "100.50 USD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Money<'c>(Repr<'c>);

impl Money<'static> {
    /// Creates money from an exact decimal amount in major units, using the
    /// ISO 4217 registry.
    pub fn new(amount: Decimal, currency_code: &str) -> Result<Self> {
        Self::new_in(CurrencyRegistry::iso4217(), amount, currency_code)
    }

    /// Creates money from a float amount in major units, using the ISO 4217
    /// registry.
    pub fn from_f64(amount: f64, currency_code: &str) -> Result<Self> {
        Self::from_f64_in(CurrencyRegistry::iso4217(), amount, currency_code)
    }

    /// Creates money from a count of minor units, using the ISO 4217 registry.
    pub fn from_minor_units(amount: i64, currency_code: &str) -> Result<Self> {
        Self::from_minor_units_in(CurrencyRegistry::iso4217(), amount, currency_code)
    }

    /// Zero in the given ISO 4217 currency.
    pub fn zero(currency_code: &str) -> Result<Self> {
        Self::zero_in(CurrencyRegistry::iso4217(), currency_code)
    }

    /// Creates money from input known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the currency is unknown or the amount is not representable.
    /// Only use this with literals or input validated elsewhere.
    pub fn must_new(amount: Decimal, currency_code: &str) -> Self {
        match Self::new(amount, currency_code) {
            Ok(money) => money,
            Err(e) => panic!("invalid money {} {}: {}", amount, currency_code, e),
        }
    }
}

impl<'c> Money<'c> {
    /// Creates money from an exact decimal amount in major units.
    ///
    /// Fails with `TooManyDecimalPlaces` when the amount has more fractional
    /// digits than the currency's minor unit.
    pub fn new_in(registry: &'c CurrencyRegistry, amount: Decimal, currency_code: &str) -> Result<Self> {
        let currency = registry.lookup(currency_code)?;
        Self::from_decimal(amount, currency)
    }

    /// Creates money from a float amount in major units.
    ///
    /// The float is read as its shortest decimal form, the digits `{}`
    /// prints, so `0.29` is 29 cents while `0.1 + 0.2` carries too many
    /// decimal places. Floats only hold about 15 significant digits; use
    /// [`Money::new_in`] for amounts that need more.
    pub fn from_f64_in(registry: &'c CurrencyRegistry, amount: f64, currency_code: &str) -> Result<Self> {
        let currency = registry.lookup(currency_code)?;
        if !amount.is_finite() {
            return Err(MoneyError::NonFiniteAmount);
        }

        let digits = amount.to_string();
        let decimals = digits.split_once('.').map_or(0, |(_, fraction)| fraction.len());
        if decimals > currency.minor_unit() as usize {
            return Err(MoneyError::TooManyDecimalPlaces);
        }
        let exact = Decimal::from_str(&digits).map_err(|_| out_of_range(amount < 0.0))?;

        Self::from_decimal(exact, currency)
    }

    fn from_decimal(amount: Decimal, currency: &'c Currency) -> Result<Self> {
        let scaled = amount
            .checked_mul(Decimal::from(currency.minor_per_major()))
            .ok_or_else(|| out_of_range(amount.is_sign_negative()))?;
        if !scaled.fract().is_zero() {
            return Err(MoneyError::TooManyDecimalPlaces);
        }
        let minor = scaled
            .to_i64()
            .ok_or_else(|| out_of_range(scaled.is_sign_negative()))?;

        Ok(Money::valid(minor, currency))
    }

    /// Creates money from a count of minor units.
    pub fn from_minor_units_in(registry: &'c CurrencyRegistry, amount: i64, currency_code: &str) -> Result<Self> {
        let currency = registry.lookup(currency_code)?;
        Ok(Money::valid(amount, currency))
    }

    /// Zero in the given currency.
    pub fn zero_in(registry: &'c CurrencyRegistry, currency_code: &str) -> Result<Self> {
        Self::from_minor_units_in(registry, 0, currency_code)
    }

    /// Money without a currency.
    pub fn invalid() -> Self {
        Money(Repr::Invalid)
    }

    pub(crate) fn valid(amount: i64, currency: &'c Currency) -> Self {
        Money(Repr::Valid { amount, currency })
    }

    /// Amount and currency, or `None` for invalid money.
    pub(crate) fn parts(&self) -> Option<(i64, &'c Currency)> {
        match self.0 {
            Repr::Valid { amount, currency } => Some((amount, currency)),
            Repr::Invalid => None,
        }
    }

    /// Amount and currency, failing with `MissingCurrency` for invalid money.
    pub(crate) fn require_currency(&self) -> Result<(i64, &'c Currency)> {
        self.parts().ok_or(MoneyError::MissingCurrency)
    }

    /// Returns `true` if the money has a currency.
    pub fn is_valid(&self) -> bool {
        matches!(self.0, Repr::Valid { .. })
    }

    /// The currency, if any.
    pub fn currency(&self) -> Option<&'c Currency> {
        self.parts().map(|(_, currency)| currency)
    }

    /// The alphabetic currency code, if any.
    pub fn currency_code(&self) -> Option<&'c str> {
        self.currency().map(Currency::code)
    }

    /// The amount as a count of minor units. Invalid money reports zero.
    pub fn amount_in_minor_units(&self) -> i64 {
        self.parts().map_or(0, |(amount, _)| amount)
    }

    /// The exact amount in major units, with the currency's minor unit as
    /// scale. Invalid money reports zero.
    pub fn amount_as_decimal(&self) -> Decimal {
        match self.parts() {
            Some((amount, currency)) => Decimal::new(amount, currency.minor_unit()),
            None => Decimal::ZERO,
        }
    }

    /// The amount in major units as the nearest float. Invalid money
    /// reports zero.
    pub fn amount_as_f64(&self) -> f64 {
        match self.parts() {
            Some((amount, currency)) => amount as f64 / 10f64.powi(currency.minor_unit() as i32),
            None => 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount_in_minor_units() == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_in_minor_units() > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_in_minor_units() < 0
    }

    /// Absolute value in the same currency.
    ///
    /// Fails with `Overflow` for the most negative amount, which has no
    /// positive counterpart. Invalid money maps to itself.
    pub fn absolute(&self) -> Result<Self> {
        match self.parts() {
            Some((amount, currency)) => amount
                .checked_abs()
                .map(|abs| Money::valid(abs, currency))
                .ok_or(MoneyError::Overflow),
            None => Ok(*self),
        }
    }

    /// Negated amount in the same currency. Invalid money maps to itself.
    pub fn negative(&self) -> Result<Self> {
        match self.parts() {
            Some((amount, currency)) => amount
                .checked_neg()
                .map(|neg| Money::valid(neg, currency))
                .ok_or(MoneyError::Overflow),
            None => Ok(*self),
        }
    }

    /// Minor-unit amounts of both operands, if they share a currency.
    fn same_currency_amounts(&self, other: &Money<'_>) -> Result<(i64, i64)> {
        match (self.parts(), other.parts()) {
            (Some((a, ca)), Some((b, cb))) if ca.same_as(cb) => Ok((a, b)),
            _ => Err(MoneyError::CurrencyMismatch),
        }
    }

    /// Orders two amounts of the same currency.
    pub fn compare(&self, other: &Money<'_>) -> Result<Ordering> {
        let (a, b) = self.same_currency_amounts(other)?;
        Ok(a.cmp(&b))
    }

    pub fn equals(&self, other: &Money<'_>) -> Result<bool> {
        let (a, b) = self.same_currency_amounts(other)?;
        Ok(a == b)
    }

    pub fn greater_than(&self, other: &Money<'_>) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn greater_than_or_equal(&self, other: &Money<'_>) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Less)
    }

    pub fn less_than(&self, other: &Money<'_>) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn less_than_or_equal(&self, other: &Money<'_>) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Greater)
    }
}

/// Overflow or underflow depending on the sign of the true result.
pub(crate) fn out_of_range(negative: bool) -> MoneyError {
    if negative {
        MoneyError::Underflow
    } else {
        MoneyError::Overflow
    }
}

impl fmt::Display for Money<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency() {
            Some(currency) => write!(f, "{} {}", self.amount_as_decimal(), currency.code()),
            None => f.write_str("0 (no currency)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money<'static> {
        Money::new(amount, "USD").unwrap()
    }

    #[test]
    fn test_new_stores_minor_units() {
        assert_eq!(usd(dec!(100.50)).amount_in_minor_units(), 10050);
        assert_eq!(usd(dec!(-0.01)).amount_in_minor_units(), -1);
        assert_eq!(Money::new(dec!(1.234), "BHD").unwrap().amount_in_minor_units(), 1234);
        assert_eq!(Money::new(dec!(500), "JPY").unwrap().amount_in_minor_units(), 500);
    }

    #[test]
    fn test_new_rejects_excess_precision() {
        assert_eq!(
            Money::new(dec!(100.123), "USD"),
            Err(MoneyError::TooManyDecimalPlaces)
        );
        assert_eq!(Money::new(dec!(1.5), "JPY"), Err(MoneyError::TooManyDecimalPlaces));
        // trailing zeros are not extra precision
        assert_eq!(usd(dec!(1.2300)).amount_in_minor_units(), 123);
    }

    #[test]
    fn test_new_unknown_currency() {
        assert_eq!(
            Money::new(dec!(1), "ABC"),
            Err(MoneyError::CurrencyNotFound("ABC".to_string()))
        );
    }

    #[test]
    fn test_new_out_of_range() {
        assert_eq!(
            Money::new(dec!(92233720368547758.08), "USD"),
            Err(MoneyError::Overflow)
        );
        assert_eq!(
            Money::new(dec!(-92233720368547758.09), "USD"),
            Err(MoneyError::Underflow)
        );
        assert_eq!(
            usd(dec!(-92233720368547758.08)).amount_in_minor_units(),
            i64::MIN
        );
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(100.50, "USD").unwrap().amount_in_minor_units(), 10050);
        assert_eq!(Money::from_f64(0.29, "USD").unwrap().amount_in_minor_units(), 29);
        assert_eq!(Money::from_f64(-19.99, "USD").unwrap().amount_in_minor_units(), -1999);
        assert_eq!(
            Money::from_f64(100.123, "USD"),
            Err(MoneyError::TooManyDecimalPlaces)
        );
        assert_eq!(Money::from_f64(f64::NAN, "USD"), Err(MoneyError::NonFiniteAmount));
        assert_eq!(Money::from_f64(1e30, "USD"), Err(MoneyError::Overflow));
        assert_eq!(Money::from_f64(-1e30, "USD"), Err(MoneyError::Underflow));
        assert_eq!(Money::from_f64(1e20, "USD"), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_from_f64_rejects_excess_precision_at_any_magnitude() {
        assert_eq!(
            Money::from_f64(0.1 + 0.2, "USD"),
            Err(MoneyError::TooManyDecimalPlaces)
        );
        assert_eq!(
            Money::from_f64(10000000000000.004, "USD"),
            Err(MoneyError::TooManyDecimalPlaces)
        );
        assert_eq!(
            Money::from_f64(1000000000000000.5, "JPY"),
            Err(MoneyError::TooManyDecimalPlaces)
        );
        assert_eq!(
            Money::from_f64(10000000000000.01, "USD").unwrap().amount_in_minor_units(),
            1_000_000_000_000_001
        );
        assert_eq!(Money::from_f64(-0.0, "USD").unwrap().amount_in_minor_units(), 0);
    }

    #[test]
    fn test_zero_and_trusted_constructors() {
        let zero = Money::zero("EUR").unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero.currency_code(), Some("EUR"));
        assert!(Money::zero("NOPE").is_err());

        assert_eq!(Money::must_new(dec!(3.14), "USD").amount_in_minor_units(), 314);
    }

    #[test]
    #[should_panic(expected = "too many decimal places")]
    fn test_must_new_panics_on_invalid_input() {
        Money::must_new(dec!(3.141), "USD");
    }

    #[test]
    fn test_accessors() {
        let m = Money::new(dec!(-12.345), "KWD").unwrap();
        assert_eq!(m.amount_as_decimal(), dec!(-12.345));
        assert_eq!(m.amount_as_decimal().scale(), 3);
        assert_eq!(m.amount_as_f64(), -12.345);
        assert_eq!(m.currency().unwrap().numeric_code(), "414");
        assert!(m.is_valid());
    }

    #[test]
    fn test_invalid_money() {
        let m = Money::invalid();
        assert!(!m.is_valid());
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
        assert_eq!(m.currency_code(), None);
        assert_eq!(m.amount_as_decimal(), Decimal::ZERO);
        assert_eq!(m.amount_as_f64(), 0.0);
        assert_eq!(m, Money::default());
        assert_eq!(m.absolute(), Ok(m));
        assert_eq!(m.negative(), Ok(m));
    }

    #[test]
    fn test_display() {
        assert_eq!(usd(dec!(100.5)).to_string(), "100.50 USD");
        assert_eq!(usd(dec!(-50.25)).to_string(), "-50.25 USD");
        assert_eq!(Money::zero("EUR").unwrap().to_string(), "0.00 EUR");
        assert_eq!(Money::new(dec!(-5), "JPY").unwrap().to_string(), "-5 JPY");
        assert_eq!(Money::invalid().to_string(), "0 (no currency)");
    }

    #[test]
    fn test_sign_tests() {
        assert!(usd(dec!(0.01)).is_positive());
        assert!(usd(dec!(-0.01)).is_negative());
        assert!(usd(dec!(0)).is_zero());
        assert!(!usd(dec!(0)).is_positive());
    }

    #[test]
    fn test_absolute_and_negative() {
        assert_eq!(usd(dec!(-100.50)).absolute(), Ok(usd(dec!(100.50))));
        assert_eq!(usd(dec!(100.50)).absolute(), Ok(usd(dec!(100.50))));
        assert_eq!(usd(dec!(100.50)).negative(), Ok(usd(dec!(-100.50))));
        assert_eq!(usd(dec!(-100.50)).negative(), Ok(usd(dec!(100.50))));

        let min = Money::from_minor_units(i64::MIN, "USD").unwrap();
        assert_eq!(min.absolute(), Err(MoneyError::Overflow));
        assert_eq!(min.negative(), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_compare() {
        let small = usd(dec!(10));
        let big = usd(dec!(20));

        assert_eq!(small.compare(&big), Ok(Ordering::Less));
        assert_eq!(big.compare(&small), Ok(Ordering::Greater));
        assert_eq!(small.compare(&usd(dec!(10.00))), Ok(Ordering::Equal));
    }

    #[test]
    fn test_derived_comparisons() {
        let small = usd(dec!(10));
        let big = usd(dec!(20));

        assert_eq!(small.equals(&small), Ok(true));
        assert_eq!(small.equals(&big), Ok(false));
        assert_eq!(big.greater_than(&small), Ok(true));
        assert_eq!(small.greater_than(&small), Ok(false));
        assert_eq!(small.greater_than_or_equal(&small), Ok(true));
        assert_eq!(small.less_than(&big), Ok(true));
        assert_eq!(big.less_than(&big), Ok(false));
        assert_eq!(big.less_than_or_equal(&big), Ok(true));
        assert_eq!(big.less_than_or_equal(&small), Ok(false));
    }

    #[test]
    fn test_comparison_currency_mismatch() {
        let dollars = usd(dec!(10));
        let euros = Money::new(dec!(10), "EUR").unwrap();

        assert_eq!(dollars.compare(&euros), Err(MoneyError::CurrencyMismatch));
        assert_eq!(dollars.equals(&euros), Err(MoneyError::CurrencyMismatch));
        assert_eq!(dollars.greater_than(&euros), Err(MoneyError::CurrencyMismatch));
        assert_eq!(dollars.less_than_or_equal(&euros), Err(MoneyError::CurrencyMismatch));
        assert_eq!(
            dollars.compare(&Money::invalid()),
            Err(MoneyError::CurrencyMismatch)
        );
        assert_eq!(
            Money::invalid().equals(&Money::invalid()),
            Err(MoneyError::CurrencyMismatch)
        );
    }

    #[test]
    fn test_identity_is_numeric_code() {
        let registry = CurrencyRegistry::from_currencies([Currency::new("USD", "840", 2)]).unwrap();
        let local = Money::new_in(&registry, dec!(5), "USD").unwrap();

        assert_eq!(local.equals(&usd(dec!(5))), Ok(true));
    }
}
