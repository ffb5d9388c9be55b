//! Split request models for CSV parsing.

use crate::error::{EngineError, EngineResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw split request as read from CSV.
///
/// Header: `id,amount,currency,method,weights`. The weights column is a
/// `;`-separated list such as `1;2;3` or `60;25.5;14.5`.
#[derive(Debug, Deserialize)]
pub struct SplitRecord {
    /// Caller-chosen identifier, echoed in the output
    pub id: String,

    /// Amount in major units, as an exact decimal string
    pub amount: String,

    /// ISO 4217 alphabetic code
    pub currency: String,

    /// `ratio` or `percent`
    pub method: String,

    /// `;`-separated weights
    pub weights: String,
}

impl SplitRecord {
    /// Parses the raw CSV record into a typed request.
    pub fn parse(&self, row: usize) -> EngineResult<SplitRequest> {
        let invalid = |message: String| EngineError::InvalidRecord { row, message };

        let id = self.id.trim();
        if id.is_empty() {
            return Err(invalid("missing id".to_string()));
        }

        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|e| invalid(format!("bad amount {:?}: {}", self.amount, e)))?;

        let weights = match self.method.trim().to_lowercase().as_str() {
            "ratio" => Weights::Ratio(
                parse_list(&self.weights).map_err(|e| invalid(format!("bad ratio: {}", e)))?,
            ),
            "percent" => Weights::Percent(
                parse_list(&self.weights).map_err(|e| invalid(format!("bad percentage: {}", e)))?,
            ),
            other => return Err(invalid(format!("unknown method {:?}", other))),
        };

        Ok(SplitRequest {
            id: id.to_string(),
            amount,
            currency: self.currency.trim().to_string(),
            weights,
        })
    }
}

fn parse_list<T: FromStr>(raw: &str) -> std::result::Result<Vec<T>, String>
where
    T::Err: std::fmt::Display,
{
    let raw = raw.trim();
    let raw = raw.strip_suffix(';').unwrap_or(raw);
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(';')
        .map(str::trim)
        .enumerate()
        .map(|(party, s)| {
            if s.is_empty() {
                return Err(format!("empty weight for party {}", party));
            }
            s.parse::<T>().map_err(|e| format!("{:?}: {}", s, e))
        })
        .collect()
}

/// A parsed split request ready for allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRequest {
    pub id: String,
    pub amount: Decimal,
    pub currency: String,
    pub weights: Weights,
}

/// How the parties' shares are weighted.
#[derive(Debug, Clone, PartialEq)]
pub enum Weights {
    /// Integer ratios, split with [`Money::allocate`](crate::Money::allocate).
    Ratio(Vec<i64>),

    /// Percentages, split with
    /// [`Money::allocate_by_percentage`](crate::Money::allocate_by_percentage).
    Percent(Vec<f64>),
}
