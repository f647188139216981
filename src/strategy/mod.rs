//! Processing strategy module for basket replay
//!
//! A strategy is a complete replay pipeline: read an operation log, apply it
//! to a basket restored from a snapshot, write the per-seller report and hand
//! back the final snapshot. Synchronous and batched asynchronous pipelines
//! are selected at runtime.

use crate::cli::StrategyType;
use crate::core::BasketSnapshot;
use crate::format::DisplayOptions;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for basket replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the operations in `input_path` on top of `initial`
    ///
    /// Writes the checkout report to `output` and returns the resulting
    /// basket as a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The async runtime cannot be created
    /// - The report cannot be written
    ///
    /// Invalid rows are logged and skipped; they never fail the replay.
    fn process(
        &self,
        input_path: &Path,
        initial: BasketSnapshot,
        output: &mut dyn Write,
    ) -> Result<BasketSnapshot, String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` only applies to the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    display: DisplayOptions,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(display)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, display))
        }
    }
}
