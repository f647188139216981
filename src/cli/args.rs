use crate::format::DisplayOptions;
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay basket operations and report per-seller totals
#[derive(Parser, Debug)]
#[command(name = "basket-engine")]
#[command(about = "Replay basket operations and report per-seller totals", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing basket operations
    #[arg(value_name = "INPUT", help = "Path to the operation log CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for single-threaded or 'async' for batched parallel replay"
    )]
    pub strategy: StrategyType,

    /// Number of operations per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads (async mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// User region, used to pick the display currency
    #[arg(long = "region", value_name = "CODE", help = "Two-letter region code, e.g. SA")]
    pub region: Option<String>,

    /// Display currency; overrides the region's currency
    #[arg(long = "currency", value_name = "CODE", help = "Three-letter currency code, e.g. EUR")]
    pub currency: Option<String>,

    /// Display locale
    #[arg(long = "locale", value_name = "TAG", help = "Locale tag, e.g. de-DE (default: en)")]
    pub locale: Option<String>,

    /// Basket snapshot to start from
    #[arg(long = "restore", value_name = "FILE")]
    pub restore: Option<PathBuf>,

    /// Where to write the final basket snapshot
    #[arg(long = "save", value_name = "FILE")]
    pub save: Option<PathBuf>,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.worker_threads.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.worker_threads.unwrap_or(default.worker_threads),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Display options: `--currency` wins, then the `--region` currency
    pub fn display_options(&self) -> DisplayOptions {
        match &self.currency {
            Some(code) => DisplayOptions::new(code.trim().to_uppercase(), self.locale.clone()),
            None => DisplayOptions::for_region(self.region.as_deref(), self.locale.clone()),
        }
    }
}
