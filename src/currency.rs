//! Currency metadata and the registry that money is constructed against.
//!
//! A registry is an immutable value. The built-in ISO 4217 table is created
//! once on first use and shared process-wide; alternate registries can be
//! built for tests or loaded from CSV and passed to the `*_in` constructors
//! of [`Money`](crate::Money).

use crate::error::{MoneyError, Result};
use crate::iso4217::ISO_4217;
use csv::{ReaderBuilder, Trim};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::Read;

/// Largest supported minor unit; `10^18` is the largest power of ten an
/// `i64` holds.
pub const MAX_MINOR_UNIT: u32 = 18;

static ISO_REGISTRY: Lazy<CurrencyRegistry> = Lazy::new(|| {
    CurrencyRegistry::build(
        ISO_4217
            .iter()
            .map(|&(code, numeric, minor)| Currency::new(code, numeric, minor)),
    )
});

/// A currency as described by ISO 4217.
///
/// Identity is the numeric code: two currencies with equal numeric codes
/// are the same currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    code: String,
    numeric_code: String,
    minor_unit: u32,
}

impl Currency {
    /// Creates a currency description. Validation happens when it is added
    /// to a registry.
    pub fn new(code: impl Into<String>, numeric_code: impl Into<String>, minor_unit: u32) -> Self {
        Currency {
            code: code.into(),
            numeric_code: numeric_code.into(),
            minor_unit,
        }
    }

    /// Three-letter alphabetic code, e.g. `USD`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Three-digit numeric code, e.g. `840`.
    pub fn numeric_code(&self) -> &str {
        &self.numeric_code
    }

    /// Number of decimal digits in the minor unit (2 for cents).
    pub fn minor_unit(&self) -> u32 {
        self.minor_unit
    }

    /// `10^minor_unit`, the number of minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        10i64.pow(self.minor_unit)
    }

    /// Returns `true` if both currencies share a numeric code.
    pub fn same_as(&self, other: &Currency) -> bool {
        self.numeric_code == other.numeric_code
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| MoneyError::InvalidCurrency {
            code: self.code.clone(),
            reason: reason.to_string(),
        };

        if self.code.len() != 3 || !self.code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid("code must be three uppercase ASCII letters"));
        }
        if self.numeric_code.len() != 3 || !self.numeric_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("numeric code must be three ASCII digits"));
        }
        if self.minor_unit > MAX_MINOR_UNIT {
            return Err(invalid("minor unit exceeds 18"));
        }
        Ok(())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Row of a currency table CSV: `code,numeric_code,minor_unit`.
#[derive(Debug, Deserialize)]
struct CurrencyRow {
    code: String,
    numeric_code: String,
    minor_unit: u32,
}

/// Read-only lookup table from currency code to [`Currency`].
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    by_code: BTreeMap<String, Currency>,
    by_numeric: HashMap<String, String>,
}

impl CurrencyRegistry {
    /// The built-in ISO 4217 registry.
    pub fn iso4217() -> &'static CurrencyRegistry {
        &ISO_REGISTRY
    }

    /// Builds a registry from currency descriptions.
    ///
    /// Fails on a malformed entry or on a duplicated code or numeric code.
    pub fn from_currencies<I>(currencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = Currency>,
    {
        let mut registry = CurrencyRegistry::default();
        for currency in currencies {
            currency.validate()?;
            if registry.by_code.contains_key(&currency.code) {
                return Err(MoneyError::InvalidCurrency {
                    code: currency.code,
                    reason: "duplicate code".to_string(),
                });
            }
            if registry.by_numeric.contains_key(&currency.numeric_code) {
                return Err(MoneyError::InvalidCurrency {
                    code: currency.code,
                    reason: "duplicate numeric code".to_string(),
                });
            }
            registry.insert(currency);
        }
        Ok(registry)
    }

    /// Loads a registry from CSV with the header `code,numeric_code,minor_unit`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let mut currencies = Vec::new();
        for result in csv_reader.deserialize::<CurrencyRow>() {
            let row = result.map_err(|e| MoneyError::CurrencyTable(e.to_string()))?;
            currencies.push(Currency::new(row.code, row.numeric_code, row.minor_unit));
        }

        Self::from_currencies(currencies)
    }

    fn build<I>(currencies: I) -> Self
    where
        I: IntoIterator<Item = Currency>,
    {
        let mut registry = CurrencyRegistry::default();
        for currency in currencies {
            registry.insert(currency);
        }
        registry
    }

    fn insert(&mut self, currency: Currency) {
        self.by_numeric
            .insert(currency.numeric_code.clone(), currency.code.clone());
        self.by_code.insert(currency.code.clone(), currency);
    }

    /// Looks up a currency by its alphabetic code.
    pub fn lookup(&self, code: &str) -> Result<&Currency> {
        self.by_code
            .get(code)
            .ok_or_else(|| MoneyError::CurrencyNotFound(code.to_string()))
    }

    /// Looks up the alphabetic code for a numeric code.
    pub fn reverse_lookup(&self, numeric_code: &str) -> Result<&str> {
        self.by_numeric
            .get(numeric_code)
            .map(String::as_str)
            .ok_or_else(|| MoneyError::CurrencyNotFound(numeric_code.to_string()))
    }

    /// Returns `true` if the code is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Number of registered currencies.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns `true` if no currency is registered.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Iterates over the currencies in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.by_code.values()
    }
}
