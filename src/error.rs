//! Error types for money operations and the split engine.

use thiserror::Error;

/// Result type alias for money operations
pub type Result<T> = std::result::Result<T, MoneyError>;

/// Result type alias for batch engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors produced by construction, arithmetic, rounding and allocation.
///
/// Every failure leaves the operands untouched; operations never mutate
/// their inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoneyError {
    /// The currency code is not in the registry
    #[error("currency doesn't exist: {0}")]
    CurrencyNotFound(String),

    /// Operands carry different currencies, or one of them has none
    #[error("currencies don't match")]
    CurrencyMismatch,

    /// The amount has more fractional digits than the currency supports
    #[error("too many decimal places for currency")]
    TooManyDecimalPlaces,

    /// Add or subtract was called with no operands
    #[error("need at least one money")]
    NeedAtLeastOneOperand,

    /// Result would exceed the largest representable minor-unit amount
    #[error("amount overflow")]
    Overflow,

    /// Result would fall below the smallest representable minor-unit amount
    #[error("amount underflow")]
    Underflow,

    /// A divisor was zero
    #[error("division by zero")]
    DivisionByZero,

    /// Allocate was called without ratios
    #[error("no ratios specified")]
    NoRatios,

    /// Allocate by percentage was called without percentages
    #[error("no percentages specified")]
    NoPercentages,

    /// A ratio was negative
    #[error("negative ratios not allowed: {0}")]
    InvalidRatio(i64),

    /// A percentage was negative or not a number
    #[error("invalid percentage: {0}")]
    InvalidPercentage(f64),

    /// The ratios add up to more than i64::MAX
    #[error("sum of given ratios exceeds max int")]
    RatioSumOverflow,

    /// The percentages add up to more than f64::MAX
    #[error("sum of given percentages exceeds max float")]
    PercentageSumOverflow,

    /// The operation needs a currency and the money has none
    #[error("money has no currency")]
    MissingCurrency,

    /// A float amount was NaN or infinite
    #[error("amount is not a finite number")]
    NonFiniteAmount,

    /// A wire record carried an empty currency code
    #[error("currency code cannot be empty")]
    EmptyCurrencyCode,

    /// A registry entry failed validation
    #[error("invalid currency {code}: {reason}")]
    InvalidCurrency { code: String, reason: String },

    /// A currency table could not be read
    #[error("currency table error: {0}")]
    CurrencyTable(String),
}

/// Errors that can occur while running a split batch.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid split record
    #[error("Invalid split at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// A money operation failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: pennywise <splits.csv> [currencies.csv]")]
    MissingArgument,
}
