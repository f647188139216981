//! Basket Engine Library
//! # Overview
//!
//! Client-side shopping basket for a multi-seller marketplace: line items
//! keyed by product and variant, merge-on-add with the price locked at first
//! add, step-down removal, per-seller checkout grouping and locale-aware money
//! formatting. A CSV replay pipeline (sync and async strategies) drives the
//! engine from an operation log.
//!
//! # Architecture
//!
//! - [`types`] - Line items, operations and their outcomes, errors
//! - [`core`] - Business logic:
//!   - [`core::basket`] - Single-owner basket and its snapshot
//!   - [`core::r#async`] - Shared DashMap-backed basket and batch processor
//!   - [`core::checkout`] - Seller grouping and settlement after submission
//!   - [`core::catalog`] - Catalog products and validated add requests
//! - [`format`] - Currency symbols, locale rendering, region to currency
//! - [`io`] - Operation log readers, report writer, snapshot persistence
//! - [`strategy`] - Replay pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Line Identity
//!
//! Two adds land on the same line exactly when product id and variant key
//! match. The second add only bumps the quantity: price, name and image stay
//! as snapshotted by the first.

pub mod cli;
pub mod core;
pub mod format;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    group_by_seller, prepare_checkout, settle_group, AsyncBasket, Basket, BasketSnapshot,
    BasketStore, CatalogProduct, SellerGroup, SubmissionOutcome,
};
pub use format::{currency_symbol, format_currency, format_decimal, get_currency_for_country};
pub use io::write_checkout_report;
pub use types::{
    BasketError, BasketOperation, LineItem, LineItemKey, NewLineItem, ProductId, SellerId,
};
