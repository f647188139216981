//! Line item types for the basket engine
//!
//! A line item is one row of the basket: a product, an optional variant
//! (size, portion, ...), the seller that owns it, and the quantity. The pair
//! `(product_id, variant_key)` is the identity of a row.

use super::error::BasketError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifier from the catalog
pub type ProductId = u64;

/// Seller (store, restaurant, vendor) identifier
pub type SellerId = u64;

/// Identity of a line item
///
/// At most one line item exists per key. An empty `variant_key` means the
/// product has no variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineItemKey {
    pub product_id: ProductId,
    pub variant_key: String,
}

impl LineItemKey {
    pub fn new(product_id: ProductId, variant_key: impl Into<String>) -> Self {
        Self {
            product_id,
            variant_key: variant_key.into(),
        }
    }

    /// Whether the key names a specific variant
    pub fn has_variant(&self) -> bool {
        !self.variant_key.is_empty()
    }
}

impl fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_variant() {
            write!(f, "{}/{}", self.product_id, self.variant_key)
        } else {
            write!(f, "{}", self.product_id)
        }
    }
}

/// One row in the basket
///
/// Everything except `quantity` is fixed when the row is first created.
/// In particular `unit_price` is the price at add-time (post-discount) and is
/// never refreshed from a later add or from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,

    /// Empty string when the product has no variant
    #[serde(default)]
    pub variant_key: String,

    /// Denormalized at add-time; the catalog entry may disappear later
    pub seller_id: SellerId,

    pub unit_price: Decimal,

    /// Always >= 1 while the row exists
    pub quantity: u32,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub image_ref: String,
}

impl LineItem {
    /// The identity key of this row
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(self.product_id, self.variant_key.clone())
    }

    /// Whether this row is identified by `(product_id, variant_key)`
    ///
    /// Avoids allocating a key for the common lookup path.
    pub fn matches(&self, product_id: ProductId, variant_key: &str) -> bool {
        self.product_id == product_id && self.variant_key == variant_key
    }

    /// `unit_price * quantity`, saturating instead of overflowing
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Request to add a product to the basket
///
/// Carries the catalog data snapshotted at add-time. `quantity` is optional;
/// the engine treats `None` and `Some(0)` as 1.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub variant_key: String,
    pub seller_id: SellerId,
    pub unit_price: Decimal,
    pub display_name: String,
    pub image_ref: String,
    pub quantity: Option<u32>,
}

impl NewLineItem {
    /// Create a request for one unit of a product without a variant
    pub fn new(product_id: ProductId, seller_id: SellerId, unit_price: Decimal) -> Self {
        Self {
            product_id,
            variant_key: String::new(),
            seller_id,
            unit_price,
            display_name: String::new(),
            image_ref: String::new(),
            quantity: None,
        }
    }

    pub fn with_variant(mut self, variant_key: impl Into<String>) -> Self {
        self.variant_key = variant_key.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_display(mut self, display_name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self.image_ref = image_ref.into();
        self
    }

    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(self.product_id, self.variant_key.clone())
    }

    /// Quantity the engine will apply: 1 when omitted or zero
    pub fn effective_quantity(&self) -> u32 {
        match self.quantity {
            Some(quantity) if quantity >= 1 => quantity,
            _ => 1,
        }
    }

    /// Check the caller contract before the request reaches the engine
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The product id or seller id is zero
    /// - The unit price is negative
    /// - An explicit quantity of zero was given
    pub fn validate(&self) -> Result<(), BasketError> {
        if self.product_id == 0 {
            return Err(BasketError::invalid_product_id(&self.product_id.to_string()));
        }
        if self.seller_id == 0 {
            return Err(BasketError::invalid_seller_id(&self.seller_id.to_string()));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(BasketError::invalid_price(&self.unit_price.to_string()));
        }
        if self.quantity == Some(0) {
            return Err(BasketError::invalid_quantity("0"));
        }
        Ok(())
    }

    /// Turn the request into a new basket row
    pub fn into_line_item(self) -> LineItem {
        let quantity = self.effective_quantity();
        LineItem {
            product_id: self.product_id,
            variant_key: self.variant_key,
            seller_id: self.seller_id,
            unit_price: self.unit_price,
            quantity,
            display_name: self.display_name,
            image_ref: self.image_ref,
        }
    }
}
