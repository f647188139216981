//! Error types for the basket engine
//!
//! The engine itself never fails: merges, step-downs and clears are total.
//! Errors only exist at the edges, where caller input is validated before it
//! reaches the engine and where files are read or written.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed rows, unknown operations, missing fields
//! - **Contract Violations**: Non-positive ids, negative prices, zero quantities
//! - **Catalog Errors**: Unknown variant, out of stock, unavailable product
//! - **Checkout Errors**: Checkout started on an empty basket
//! - **Snapshot Errors**: Persisted basket state could not be (de)serialized

use super::line_item::ProductId;
use thiserror::Error;

/// Main error type for the basket engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BasketError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation name in an operation log
    #[error("Invalid operation '{op}'")]
    InvalidOperation {
        /// The operation string as read
        op: String,
    },

    /// A field required by the operation is absent or empty
    #[error("{op} operation requires a {field}")]
    MissingField {
        /// Operation name
        op: String,
        /// Name of the missing field
        field: String,
    },

    /// Product id is not a positive integer
    #[error("Invalid product id '{value}'")]
    InvalidProductId { value: String },

    /// Seller id is not a positive integer
    #[error("Invalid seller id '{value}'")]
    InvalidSellerId { value: String },

    /// Unit price is malformed or negative
    #[error("Invalid price '{value}'")]
    InvalidPrice { value: String },

    /// Quantity is malformed or not positive
    #[error("Invalid quantity '{value}'")]
    InvalidQuantity { value: String },

    /// The requested variant is not offered for the product
    #[error("Product {product_id} has no variant '{variant}'")]
    UnknownVariant {
        product_id: ProductId,
        variant: String,
    },

    /// Not enough stock for the requested quantity
    #[error("Product {product_id} is out of stock: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// The catalog product can no longer be sold
    #[error("Product {product_id} is unavailable")]
    ProductUnavailable { product_id: ProductId },

    /// Checkout was initiated with nothing in the basket
    #[error("Cannot check out an empty basket")]
    EmptyBasket,

    /// Basket snapshot could not be read or written
    #[error("Snapshot error: {message}")]
    SnapshotError { message: String },
}

impl From<std::io::Error> for BasketError {
    fn from(error: std::io::Error) -> Self {
        BasketError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BasketError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BasketError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for BasketError {
    fn from(error: serde_json::Error) -> Self {
        BasketError::SnapshotError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BasketError {
    /// Create an InvalidOperation error
    pub fn invalid_operation(op: &str) -> Self {
        BasketError::InvalidOperation { op: op.to_string() }
    }

    /// Create a ParseError for a row that could not be turned into an operation
    pub fn parse_error(line: u64, error: impl std::fmt::Display) -> Self {
        BasketError::ParseError {
            line: Some(line),
            message: error.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str) -> Self {
        BasketError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an InvalidProductId error
    pub fn invalid_product_id(value: &str) -> Self {
        BasketError::InvalidProductId {
            value: value.to_string(),
        }
    }

    /// Create an InvalidSellerId error
    pub fn invalid_seller_id(value: &str) -> Self {
        BasketError::InvalidSellerId {
            value: value.to_string(),
        }
    }

    /// Create an InvalidPrice error
    pub fn invalid_price(value: &str) -> Self {
        BasketError::InvalidPrice {
            value: value.to_string(),
        }
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(value: &str) -> Self {
        BasketError::InvalidQuantity {
            value: value.to_string(),
        }
    }

    /// Create an UnknownVariant error
    pub fn unknown_variant(product_id: ProductId, variant: &str) -> Self {
        BasketError::UnknownVariant {
            product_id,
            variant: variant.to_string(),
        }
    }

    /// Create an OutOfStock error
    pub fn out_of_stock(product_id: ProductId, available: u32, requested: u32) -> Self {
        BasketError::OutOfStock {
            product_id,
            available,
            requested,
        }
    }
}
