//! # Pennywise
//!
//! Exact fixed-point money: an integer count of a currency's minor units
//! with overflow-checked arithmetic, seven rounding schemes, and allocation
//! that never loses or invents a minor unit.
//!
//! ## Design Principles
//!
//! - **Integer minor units**: amounts are `i64` cents (or yen, or fils);
//!   floats and decimals are only accepted at construction
//! - **Checked arithmetic**: every step reports `Overflow`/`Underflow`
//!   instead of wrapping
//! - **Penny-exact splits**: allocated shares always sum to the original
//! - **Explicit registry**: currencies come from an immutable
//!   [`CurrencyRegistry`], the ISO 4217 table by default
//!
//! ## Example
//!
//! ```
//! use pennywise::{Money, RoundScheme};
//! use rust_decimal_macros::dec;
//!
//! let bill = Money::new(dec!(100.00), "USD").unwrap();
//! let tip = bill.multiply(&[15]).unwrap().divide(&[100]).unwrap();
//! let total = Money::add(&[bill, tip]).unwrap();
//! assert_eq!(total.to_string(), "115.00 USD");
//!
//! let shares = total.allocate(&[1, 1, 1]).unwrap();
//! assert_eq!(shares[0].to_string(), "38.34 USD");
//! assert_eq!(shares[2].round_with(RoundScheme::HalfUp).unwrap().to_string(), "38.00 USD");
//! ```

pub mod allocation;
pub mod arithmetic;
pub mod currency;
pub mod engine;
pub mod error;
mod iso4217;
pub mod money;
pub mod record;
pub mod rounding;
pub mod split;

pub use currency::{Currency, CurrencyRegistry};
pub use engine::{Allocation, SplitEngine};
pub use error::{EngineError, EngineResult, MoneyError, Result};
pub use money::Money;
pub use record::MoneyRecord;
pub use rounding::RoundScheme;
pub use split::{SplitRecord, SplitRequest, Weights};
