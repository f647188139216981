//! Synchronous processing strategy
//!
//! Single-threaded replay on a `Basket`. The strategy only orchestrates:
//! - CSV parsing is done by `SyncReader` (iterator interface)
//! - Basket rules live in `Basket`
//! - Report output is `csv_format::write_checkout_report`
//!
//! Rows are streamed one at a time; memory grows with the number of basket
//! lines, not the length of the log.

use crate::core::{group_by_seller, Basket, BasketSnapshot, BasketStore};
use crate::format::DisplayOptions;
use crate::io::csv_format::write_checkout_report;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Synchronous processing strategy
///
/// ```no_run
/// use basket_engine::core::BasketSnapshot;
/// use basket_engine::format::DisplayOptions;
/// use basket_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(DisplayOptions::default());
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(Path::new("operations.csv"), BasketSnapshot::default(), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    display: DisplayOptions,
}

impl SyncProcessingStrategy {
    pub fn new(display: DisplayOptions) -> Self {
        Self { display }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        initial: BasketSnapshot,
        output: &mut dyn Write,
    ) -> Result<BasketSnapshot, String> {
        let mut basket = Basket::from_snapshot(initial);
        let reader = SyncReader::new(input_path)?;

        let mut applied = 0usize;
        for result in reader {
            match result {
                Ok(operation) => {
                    let name = operation.name();
                    let outcome = basket.apply(operation);
                    debug!(op = name, ?outcome, "applied");
                    applied += 1;
                }
                Err(e) => warn!(error = %e, "skipping row"),
            }
        }
        info!(applied, lines = basket.len(), "replay finished");

        write_checkout_report(&group_by_seller(basket.line_items()), &self.display, output)?;

        Ok(basket.snapshot())
    }
}
