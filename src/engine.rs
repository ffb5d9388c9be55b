//! Batch split engine.
//!
//! Reads split requests from CSV, allocates each one penny-exactly, and
//! writes one output line per share. Rows that cannot be parsed or
//! allocated are logged and skipped; the batch carries on.

use crate::currency::CurrencyRegistry;
use crate::error::{EngineError, EngineResult};
use crate::money::Money;
use crate::split::{SplitRecord, SplitRequest, Weights};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// The shares produced for one split request.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<'c> {
    /// Identifier from the input row
    pub id: String,

    /// Shares in input weight order; they sum to the requested amount
    /// unless every weight was zero.
    pub shares: Vec<Money<'c>>,
}

/// Allocates split requests against a currency registry.
///
/// # Output Ordering
///
/// Allocations are written in input order, parties in weight order.
pub struct SplitEngine<'c> {
    registry: &'c CurrencyRegistry,
    allocations: Vec<Allocation<'c>>,
}

impl SplitEngine<'static> {
    /// Creates an engine backed by the ISO 4217 registry.
    pub fn new() -> Self {
        SplitEngine::with_registry(CurrencyRegistry::iso4217())
    }
}

impl Default for SplitEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> SplitEngine<'c> {
    /// Creates an engine backed by a custom registry.
    pub fn with_registry(registry: &'c CurrencyRegistry) -> Self {
        SplitEngine {
            registry,
            allocations: Vec::new(),
        }
    }

    /// Processes split requests from a CSV reader in streaming fashion.
    ///
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> EngineResult<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<SplitRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let outcome = result
                .map_err(EngineError::from)
                .and_then(|record| record.parse(row_num))
                .and_then(|request| self.process_request(request, row_num));

            if let Err(e) = outcome {
                warn!("Row {}: {}", row_num, e);
            }
        }

        Ok(())
    }

    /// Allocates a single parsed request.
    fn process_request(&mut self, request: SplitRequest, row: usize) -> EngineResult<()> {
        let total = Money::new_in(self.registry, request.amount, &request.currency)?;

        let shares = match &request.weights {
            Weights::Ratio(ratios) => total.allocate(ratios)?,
            Weights::Percent(percentages) => total.allocate_by_percentage(percentages)?,
        };

        debug!(
            "Row {}: Split {} for {} into {} shares",
            row,
            total,
            request.id,
            shares.len()
        );

        self.allocations.push(Allocation {
            id: request.id,
            shares,
        });
        Ok(())
    }

    /// Allocations processed so far, in input order.
    pub fn allocations(&self) -> &[Allocation<'c>] {
        &self.allocations
    }

    /// Writes every share as CSV.
    ///
    /// Amounts are rendered with the currency's minor-unit decimals.
    pub fn write_output<W: Write>(&self, writer: W) -> EngineResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "party", "amount", "currency"])?;

        for allocation in &self.allocations {
            for (party, share) in allocation.shares.iter().enumerate() {
                csv_writer.write_record([
                    allocation.id.clone(),
                    party.to_string(),
                    share.amount_as_decimal().to_string(),
                    share.currency_code().unwrap_or_default().to_string(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use std::io::Cursor;

    fn process_csv_str(csv: &str) -> SplitEngine<'static> {
        let mut engine = SplitEngine::new();
        engine.process_csv(Cursor::new(csv)).unwrap();
        engine
    }

    fn amounts(engine: &SplitEngine<'_>, index: usize) -> Vec<String> {
        engine.allocations()[index]
            .shares
            .iter()
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn test_ratio_split() {
        let csv = "id,amount,currency,method,weights\nrent,100.00,ETB,ratio,1;2;3\n";

        let engine = process_csv_str(csv);
        assert_eq!(engine.allocations().len(), 1);
        assert_eq!(engine.allocations()[0].id, "rent");
        assert_eq!(amounts(&engine, 0), ["16.67 ETB", "33.33 ETB", "50.00 ETB"]);
    }

    #[test]
    fn test_percent_split() {
        let csv = "id,amount,currency,method,weights\nfee,0.10,USD,percent,50;50;0\n";

        let engine = process_csv_str(csv);
        assert_eq!(amounts(&engine, 0), ["0.05 USD", "0.05 USD", "0.00 USD"]);
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = r#"id,amount,currency,method,weights
a,100.123,USD,ratio,1;1
b,10,XXX,ratio,1;1
c,10,USD,ratio,1;-1
d,10,USD,ratio,
e,10,USD,split,1
f,10.00,USD,ratio,1;1"#;

        let engine = process_csv_str(csv);
        assert_eq!(engine.allocations().len(), 1);
        assert_eq!(engine.allocations()[0].id, "f");
        assert_eq!(amounts(&engine, 0), ["5.00 USD", "5.00 USD"]);
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = "id, amount, currency, method, weights\n x , 0.07 , USD , ratio , 1;1;1\n";

        let engine = process_csv_str(csv);
        assert_eq!(engine.allocations()[0].id, "x");
        assert_eq!(amounts(&engine, 0), ["0.03 USD", "0.02 USD", "0.02 USD"]);
    }

    #[test]
    fn test_custom_registry() {
        let registry =
            CurrencyRegistry::from_currencies([Currency::new("PTS", "999", 0)]).unwrap();
        let mut engine = SplitEngine::with_registry(&registry);
        engine
            .process_csv(Cursor::new(
                "id,amount,currency,method,weights\np,10,PTS,ratio,1;1;1\nq,10,USD,ratio,1\n",
            ))
            .unwrap();

        assert_eq!(engine.allocations().len(), 1);
        assert_eq!(amounts(&engine, 0), ["4 PTS", "3 PTS", "3 PTS"]);
    }

    #[test]
    fn test_output_format() {
        let csv = "id,amount,currency,method,weights\nrent,100.00,ETB,ratio,1;2\nyen,7,JPY,ratio,1;1\n";

        let engine = process_csv_str(csv);
        let mut output = Vec::new();
        engine.write_output(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "id,party,amount,currency\n\
             rent,0,33.34,ETB\n\
             rent,1,66.66,ETB\n\
             yen,0,4,JPY\n\
             yen,1,3,JPY\n"
        );
    }
}
