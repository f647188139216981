//! Concurrent implementations of the core components
//!
//! - **AsyncBasket**: thread-safe basket using DashMap with per-key locking
//! - **BatchProcessor**: applies operation batches, lines in parallel,
//!   seller/basket clears as barriers
//!
//! # Thread Safety
//!
//! - Operations on different lines proceed in parallel
//! - Operations on the same line are serialized by the line's shard lock
//! - No global lock around the basket

pub mod basket;
pub mod batch_processor;

pub use basket::AsyncBasket;
pub use batch_processor::{BatchProcessor, ProcessingResult, Segment};
