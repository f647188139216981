//! Core business logic module
//!
//! - `traits` - Basket trait shared by the single-owner and concurrent baskets
//! - `basket` - Single-owner basket engine and its persisted snapshot
//! - `checkout` - Seller grouping and checkout settlement
//! - `catalog` - Catalog product input and add-request validation
//! - `async` - Thread-safe basket and batch processor

pub mod r#async;
pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod traits;

pub use basket::{Basket, BasketSnapshot};
pub use catalog::{CatalogProduct, Discount};
pub use checkout::{group_by_seller, prepare_checkout, settle_group, SellerGroup, SubmissionOutcome};
pub use r#async::{AsyncBasket, BatchProcessor};
pub use traits::BasketStore;
