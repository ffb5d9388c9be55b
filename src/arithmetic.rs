//! Overflow-checked arithmetic on minor units.
//!
//! Every step is checked before it is applied, so a failing operation
//! reports `Overflow` or `Underflow` instead of wrapping. Operands are
//! matched by currency numeric code.

use crate::error::{MoneyError, Result};
use crate::money::{out_of_range, Money};

impl<'c> Money<'c> {
    /// Sums one or more amounts of the same currency.
    ///
    /// ```
    /// use pennywise::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let a = Money::new(dec!(1.25), "EUR").unwrap();
    /// let b = Money::new(dec!(2.50), "EUR").unwrap();
    /// assert_eq!(Money::add(&[a, b]).unwrap().to_string(), "3.75 EUR");
    /// ```
    pub fn add(operands: &[Money<'c>]) -> Result<Money<'c>> {
        let (first, rest) = operands
            .split_first()
            .ok_or(MoneyError::NeedAtLeastOneOperand)?;
        let (mut total, currency) = first.parts().ok_or(MoneyError::CurrencyMismatch)?;

        for operand in rest {
            let amount = match operand.parts() {
                Some((amount, other)) if other.same_as(currency) => amount,
                _ => return Err(MoneyError::CurrencyMismatch),
            };
            total = total
                .checked_add(amount)
                .ok_or_else(|| out_of_range(amount < 0))?;
        }

        Ok(Money::valid(total, currency))
    }

    /// Subtracts one or more amounts of the same currency from this one.
    pub fn subtract(&self, operands: &[Money<'_>]) -> Result<Money<'c>> {
        if operands.is_empty() {
            return Err(MoneyError::NeedAtLeastOneOperand);
        }
        let (mut total, currency) = self.parts().ok_or(MoneyError::CurrencyMismatch)?;

        for operand in operands {
            let amount = match operand.parts() {
                Some((amount, other)) if other.same_as(currency) => amount,
                _ => return Err(MoneyError::CurrencyMismatch),
            };
            total = total
                .checked_sub(amount)
                .ok_or_else(|| out_of_range(amount > 0))?;
        }

        Ok(Money::valid(total, currency))
    }

    /// Multiplies by each factor in turn.
    pub fn multiply(&self, factors: &[i64]) -> Result<Money<'c>> {
        let (mut total, currency) = self.require_currency()?;

        for &factor in factors {
            total = total
                .checked_mul(factor)
                .ok_or_else(|| out_of_range((total < 0) != (factor < 0)))?;
        }

        Ok(Money::valid(total, currency))
    }

    /// Divides by each divisor in turn, truncating toward zero.
    ///
    /// The remainder of every step is discarded. Use
    /// [`allocate`](Money::allocate) to split an amount without losing
    /// minor units.
    pub fn divide(&self, divisors: &[i64]) -> Result<Money<'c>> {
        let (mut total, currency) = self.require_currency()?;
        if divisors.contains(&0) {
            return Err(MoneyError::DivisionByZero);
        }

        for &divisor in divisors {
            // only i64::MIN / -1 can fail here
            total = total.checked_div(divisor).ok_or(MoneyError::Overflow)?;
        }

        Ok(Money::valid(total, currency))
    }
}
