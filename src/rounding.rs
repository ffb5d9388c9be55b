//! Rounding to whole major units.
//!
//! The amount is split into whole major units and a minor-unit remainder
//! (`q, r = amount / 10^minor, amount % 10^minor`, both truncating). The
//! scheme decides whether `q` stays or moves one unit in the direction of
//! the remainder's sign; ties are detected exactly as `2|r| == 10^minor`.

use crate::error::Result;
use crate::money::{out_of_range, Money};
use std::cmp::Ordering;

/// How to round an amount to a whole number of major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundScheme {
    /// Nearest; ties away from zero.
    HalfUp,
    /// Nearest; ties toward zero.
    HalfDown,
    /// Truncate.
    #[default]
    TowardZero,
    /// Any fraction moves the magnitude up.
    AwayFromZero,
    /// Nearest; ties to the even neighbour (banker's rounding).
    HalfEven,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
}

impl RoundScheme {
    /// Rounds `q + r/unit` to an integer, where `q` and `r` come from
    /// truncating division and so share a sign.
    fn apply(self, q: i128, r: i128, unit: i128) -> i128 {
        if r == 0 {
            return q;
        }
        let away = q + r.signum();
        let half = (2 * r.abs()).cmp(&unit);

        match self {
            RoundScheme::TowardZero => q,
            RoundScheme::AwayFromZero => away,
            RoundScheme::Ceiling => {
                if r > 0 {
                    away
                } else {
                    q
                }
            }
            RoundScheme::Floor => {
                if r < 0 {
                    away
                } else {
                    q
                }
            }
            RoundScheme::HalfUp => match half {
                Ordering::Less => q,
                _ => away,
            },
            RoundScheme::HalfDown => match half {
                Ordering::Greater => away,
                _ => q,
            },
            RoundScheme::HalfEven => match half {
                Ordering::Less => q,
                Ordering::Greater => away,
                Ordering::Equal if q % 2 == 0 => q,
                Ordering::Equal => away,
            },
        }
    }
}

impl<'c> Money<'c> {
    /// Rounds to whole major units, truncating toward zero.
    pub fn round(&self) -> Result<Money<'c>> {
        self.round_with(RoundScheme::default())
    }

    /// Rounds to whole major units with the given scheme.
    ///
    /// Invalid money rounds to itself. Fails with `Overflow` or `Underflow`
    /// only when the rounded amount lies beyond the i64 range, which needs
    /// an amount within one major unit of the limits.
    ///
    /// ```
    /// use pennywise::{Money, RoundScheme};
    /// use rust_decimal_macros::dec;
    ///
    /// let m = Money::new(dec!(100.50), "USD").unwrap();
    /// let rounded = m.round_with(RoundScheme::HalfEven).unwrap();
    /// assert_eq!(rounded.to_string(), "100.00 USD");
    /// ```
    pub fn round_with(&self, scheme: RoundScheme) -> Result<Money<'c>> {
        let (amount, currency) = match self.parts() {
            Some(parts) => parts,
            None => return Ok(*self),
        };

        let unit = i128::from(currency.minor_per_major());
        let amount = i128::from(amount);
        let major = scheme.apply(amount / unit, amount % unit, unit);

        let rounded = major * unit;
        let rounded = i64::try_from(rounded).map_err(|_| out_of_range(rounded < 0))?;
        Ok(Money::valid(rounded, currency))
    }
}
