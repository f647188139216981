//! Basket engine replay CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > report.csv
//! cargo run -- --strategy sync operations.csv > report.csv
//! cargo run -- --region DE --locale de operations.csv > report.csv
//! cargo run -- --restore basket.json --save basket.json operations.csv > report.csv
//! ```
//!
//! Reads basket operations from the input CSV, applies them with the selected
//! strategy and writes the per-seller report to stdout. Logs go to stderr and
//! are filtered with `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, unreadable snapshot, output failure, etc.)

use basket_engine::cli;
use basket_engine::core::BasketSnapshot;
use basket_engine::io::{load_snapshot, save_snapshot};
use basket_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &cli::CliArgs) -> Result<(), String> {
    let initial = match &args.restore {
        Some(path) => load_snapshot(path).map_err(|e| e.to_string())?,
        None => BasketSnapshot::default(),
    };

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.display_options())
    };

    let mut output = std::io::stdout();
    let snapshot = strategy.process(&args.input_file, initial, &mut output)?;

    if let Some(path) = &args.save {
        save_snapshot(&snapshot, path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
