//! Asynchronous batch processing strategy
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (barrier split + line partitioning)
//!     └── AsyncBasket (DashMap-backed shared basket)
//! ```
//!
//! Batches are applied one after another so operations on the same line keep
//! their file order across batch boundaries. Inside a batch, different lines
//! run in parallel on the tokio multi-threaded runtime and seller/basket
//! clears wait for everything queued before them.

use crate::core::r#async::{AsyncBasket, BatchProcessor};
use crate::core::{group_by_seller, BasketSnapshot};
use crate::format::DisplayOptions;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_checkout_report;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Worker threads of the runtime
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                worker_threads,
                default = default.worker_threads,
                "invalid worker_threads, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    display: DisplayOptions,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, display: DisplayOptions) -> Self {
        Self { config, display }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        initial: BasketSnapshot,
        output: &mut dyn Write,
    ) -> Result<BasketSnapshot, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let basket = Arc::new(AsyncBasket::from_snapshot(initial));
            let processor = BatchProcessor::new(Arc::clone(&basket));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio::fs::File speaks tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut applied = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let results = processor.process_batch(batch).await;
                debug!(operations = results.len(), "batch applied");
                applied += results.len();
            }
            info!(applied, lines = basket.len(), "replay finished");

            write_checkout_report(&group_by_seller(&basket.line_items()), &self.display, output)?;

            Ok(basket.snapshot())
        })
    }
}
