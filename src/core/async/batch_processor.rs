//! Batch processing with line-based partitioning for concurrent replay
//!
//! This module provides the `BatchProcessor` struct, which applies batches of
//! basket operations to a shared `AsyncBasket` with as much parallelism as the
//! operations allow.
//!
//! # Design
//!
//! Operations on different lines commute, so a run of line operations
//! (add, remove, remove_line) is partitioned by line key and each key's
//! operations are applied in order by their own task. Seller and basket
//! clears span many lines; they act as barriers that split the batch into
//! segments, and a segment only starts once the previous one has finished.
//!
//! ```text
//! add A, add B, remove A | clear_seller 7 | add A, add C
//! └── segment: A-task, B-task ─┘   barrier    └── segment: A-task, C-task
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncBasket;
use crate::core::traits::BasketStore;
use crate::types::{BasketOperation, LineItemKey, OperationOutcome};
use tracing::warn;

/// Result of applying a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub operation: BasketOperation,

    /// What the basket reported
    pub outcome: OperationOutcome,
}

/// A run of operations that can be scheduled together
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Single-line operations, free to run per key in parallel
    Lines(Vec<BasketOperation>),
    /// A multi-line operation that must run alone
    Barrier(BasketOperation),
}

/// Batch processor with line-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Shared basket every task mutates
    basket: Arc<AsyncBasket>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor over a shared basket
    pub fn new(basket: Arc<AsyncBasket>) -> Self {
        Self { basket }
    }

    /// Split a batch at barrier operations
    ///
    /// Segments come out in input order; consecutive line operations are
    /// gathered into one `Lines` segment and every barrier is its own segment.
    pub fn split_at_barriers(&self, batch: Vec<BasketOperation>) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut pending = Vec::new();

        for operation in batch {
            if operation.is_barrier() {
                if !pending.is_empty() {
                    segments.push(Segment::Lines(std::mem::take(&mut pending)));
                }
                segments.push(Segment::Barrier(operation));
            } else {
                pending.push(operation);
            }
        }
        if !pending.is_empty() {
            segments.push(Segment::Lines(pending));
        }

        segments
    }

    /// Partition line operations by line key
    ///
    /// Operations arrive paired with their log sequence number. Each key's
    /// operations keep their original relative order. Barrier operations have
    /// no single key and do not belong here; they are logged and left out.
    pub fn partition_by_line(
        &self,
        operations: Vec<(u64, BasketOperation)>,
    ) -> HashMap<LineItemKey, Vec<(u64, BasketOperation)>> {
        let mut partitions: HashMap<LineItemKey, Vec<(u64, BasketOperation)>> = HashMap::new();

        for (seq, operation) in operations {
            match operation.line_key() {
                Some(key) => partitions.entry(key).or_default().push((seq, operation)),
                None => warn!(op = operation.name(), "barrier operation passed to line partitioning"),
            }
        }

        partitions
    }

    /// Apply one key's operations in order
    ///
    /// An add that creates the line takes the operation's sequence number, so
    /// lines end up in log order whichever task gets there first.
    pub async fn process_line_operations(
        &self,
        operations: Vec<(u64, BasketOperation)>,
    ) -> Vec<ProcessingResult> {
        let mut basket: &AsyncBasket = &self.basket;
        let mut results = Vec::with_capacity(operations.len());

        for (seq, operation) in operations {
            let outcome = match &operation {
                BasketOperation::Add(entry) => {
                    OperationOutcome::Added(self.basket.add_item_at(entry.clone(), seq))
                }
                _ => basket.apply(operation.clone()),
            };
            results.push(ProcessingResult { operation, outcome });
        }

        results
    }

    /// Apply a batch, running different lines concurrently
    ///
    /// Results of one segment are collected before the next segment starts.
    /// Within a segment, results are grouped per line rather than in input
    /// order.
    pub async fn process_batch(&self, batch: Vec<BasketOperation>) -> Vec<ProcessingResult> {
        let mut results = Vec::new();
        let mut next_seq = self.basket.reserve_sequence(batch.len() as u64);

        for segment in self.split_at_barriers(batch) {
            match segment {
                Segment::Barrier(operation) => {
                    next_seq += 1;
                    let mut basket: &AsyncBasket = &self.basket;
                    let outcome = basket.apply(operation.clone());
                    results.push(ProcessingResult { operation, outcome });
                }
                Segment::Lines(operations) => {
                    let first = next_seq;
                    next_seq += operations.len() as u64;
                    let sequenced = (first..).zip(operations).collect();

                    let mut tasks = Vec::new();
                    for (_key, line_operations) in self.partition_by_line(sequenced) {
                        let processor = self.clone();
                        tasks.push(tokio::spawn(async move {
                            processor.process_line_operations(line_operations).await
                        }));
                    }

                    for task in tasks {
                        match task.await {
                            Ok(line_results) => results.extend(line_results),
                            Err(e) => warn!(error = %e, "line task failed"),
                        }
                    }
                }
            }
        }

        results
    }
}
