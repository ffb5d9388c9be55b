//! Pennywise CLI
//!
//! Reads split requests from CSV and writes the penny-exact shares.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- splits.csv > shares.csv
//! cargo run -- splits.csv currencies.csv > shares.csv
//! ```
//!
//! The optional second file replaces the built-in ISO 4217 table; its
//! header is `code,numeric_code,minor_unit`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use pennywise::{CurrencyRegistry, EngineError, EngineResult, SplitEngine};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> EngineResult<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(EngineError::MissingArgument);
    }

    let custom_registry = match args.get(2) {
        Some(path) => {
            let file = File::open(path)?;
            let registry = CurrencyRegistry::from_csv_reader(BufReader::new(file))?;
            log::info!("Loaded {} currencies from {}", registry.len(), path);
            Some(registry)
        }
        None => None,
    };
    let registry = match &custom_registry {
        Some(registry) => registry,
        None => CurrencyRegistry::iso4217(),
    };

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut engine = SplitEngine::with_registry(registry);
    engine.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_output(handle)?;

    Ok(())
}
