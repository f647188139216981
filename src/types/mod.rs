//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `line_item`: Line items, their identity key and add-requests
//! - `operation`: Basket operations and their outcomes
//! - `error`: Error types for the basket engine

pub mod error;
pub mod line_item;
pub mod operation;

pub use error::BasketError;
pub use line_item::{LineItem, LineItemKey, NewLineItem, ProductId, SellerId};
pub use operation::{AddOutcome, BasketOperation, OperationOutcome, RemoveOutcome};
