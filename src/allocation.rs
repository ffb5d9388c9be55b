//! Penny-exact splitting by ratios and percentages.
//!
//! Each party first gets its truncated proportional share. Whatever is left
//! over is handed out one minor unit at a time, round-robin from the first
//! party, so the shares always add back up to the original amount.

use crate::error::{MoneyError, Result};
use crate::money::Money;

impl<'c> Money<'c> {
    /// Splits the amount in proportion to `ratios`.
    ///
    /// When every ratio is zero each party gets zero and nothing is
    /// distributed. Otherwise the shares sum to the original amount.
    ///
    /// ```
    /// use pennywise::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let total = Money::new(dec!(100.00), "ETB").unwrap();
    /// let parts: Vec<String> = total
    ///     .allocate(&[1, 2, 3])
    ///     .unwrap()
    ///     .iter()
    ///     .map(|m| m.to_string())
    ///     .collect();
    /// assert_eq!(parts, ["16.67 ETB", "33.33 ETB", "50.00 ETB"]);
    /// ```
    pub fn allocate(&self, ratios: &[i64]) -> Result<Vec<Money<'c>>> {
        let (amount, currency) = self.require_currency()?;
        if ratios.is_empty() {
            return Err(MoneyError::NoRatios);
        }

        let mut sum: i64 = 0;
        for &ratio in ratios {
            if ratio < 0 {
                return Err(MoneyError::InvalidRatio(ratio));
            }
            sum = sum.checked_add(ratio).ok_or(MoneyError::RatioSumOverflow)?;
        }

        if sum == 0 {
            return Ok(vec![Money::valid(0, currency); ratios.len()]);
        }

        let shares = ratios
            .iter()
            .map(|&ratio| {
                // |amount * ratio / sum| <= |amount|, so the cast back is lossless
                (i128::from(amount) * i128::from(ratio) / i128::from(sum)) as i64
            })
            .collect();

        Ok(distribute_leftover(amount, shares)
            .into_iter()
            .map(|share| Money::valid(share, currency))
            .collect())
    }

    /// Splits the amount in proportion to `percentages`.
    ///
    /// The percentages are normalised by their own sum, so they need not add
    /// up to 100. Zero-sum and remainder handling match
    /// [`allocate`](Money::allocate).
    pub fn allocate_by_percentage(&self, percentages: &[f64]) -> Result<Vec<Money<'c>>> {
        let (amount, currency) = self.require_currency()?;
        if percentages.is_empty() {
            return Err(MoneyError::NoPercentages);
        }

        let mut sum = 0.0_f64;
        for &percentage in percentages {
            if percentage.is_nan() || percentage < 0.0 {
                return Err(MoneyError::InvalidPercentage(percentage));
            }
            if percentage > f64::MAX - sum {
                return Err(MoneyError::PercentageSumOverflow);
            }
            sum += percentage;
        }

        if sum == 0.0 {
            return Ok(vec![Money::valid(0, currency); percentages.len()]);
        }

        let shares = percentages
            .iter()
            .map(|&percentage| (amount as f64 * (percentage / sum)).trunc() as i64)
            .collect();

        Ok(distribute_leftover(amount, shares)
            .into_iter()
            .map(|share| Money::valid(share, currency))
            .collect())
    }
}

/// Hands `total - Σshares` out one minor unit at a time, cycling through the
/// parties from index 0.
fn distribute_leftover(total: i64, mut shares: Vec<i64>) -> Vec<i64> {
    let allocated: i128 = shares.iter().map(|&share| i128::from(share)).sum();
    let mut leftover = i128::from(total) - allocated;
    let step = leftover.signum();

    let mut party = 0;
    while leftover != 0 {
        shares[party] += step as i64;
        leftover -= step;
        party = (party + 1) % shares.len();
    }

    shares
}
