//! Catalog snapshot input
//!
//! The catalog is owned by the network layer and is read-only here. A
//! `CatalogProduct` is what the product screen hands over when the user taps
//! "add": this module checks that request against the product (variant
//! offered, stock, still sellable) and snapshots the post-discount price into
//! a `NewLineItem`. Everything rejected here never reaches the basket.

use crate::types::{BasketError, NewLineItem, ProductId, SellerId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Discount advertised on a catalog product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Discount {
    /// Percentage off the list price (e.g. 15 for 15%)
    Percent(Decimal),
    /// Fixed amount off the list price
    Fixed(Decimal),
}

/// Read-only view of a sellable product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub seller_id: SellerId,
    pub name: String,
    #[serde(default)]
    pub image_ref: String,
    /// List price before discount
    pub price: Decimal,
    #[serde(default)]
    pub discount: Option<Discount>,
    /// Units available; `None` when the seller does not track stock
    #[serde(default)]
    pub stock: Option<u32>,
    /// Offered variants; empty when the product has none
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogProduct {
    /// Price a buyer pays per unit right now
    ///
    /// Applies the discount, never goes below zero or above the list price,
    /// rounds to cents.
    pub fn unit_price(&self) -> Decimal {
        let discounted = match self.discount {
            Some(Discount::Percent(percent)) => {
                let remaining = Decimal::ONE_HUNDRED
                    - percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                // Divide first: price * remaining can overflow near Decimal::MAX
                (remaining / Decimal::ONE_HUNDRED)
                    .checked_mul(self.price)
                    .unwrap_or(self.price)
            }
            Some(Discount::Fixed(amount)) => self.price.saturating_sub(amount.max(Decimal::ZERO)),
            None => self.price,
        };
        discounted
            .max(Decimal::ZERO)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Whether the product is currently discounted
    pub fn on_sale(&self) -> bool {
        self.unit_price() < self.price
    }

    /// Build a validated add-request for `quantity` units of `variant`
    ///
    /// Pass an empty `variant` for products without variants.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The product is inactive
    /// - `quantity` is zero
    /// - The variant is not offered (or a variant is given for a product without any)
    /// - Tracked stock is lower than `quantity`
    /// - The product or seller id violates the add contract
    pub fn line_entry(&self, variant: &str, quantity: u32) -> Result<NewLineItem, BasketError> {
        if !self.active {
            return Err(BasketError::ProductUnavailable {
                product_id: self.id,
            });
        }
        if quantity == 0 {
            return Err(BasketError::invalid_quantity("0"));
        }

        let variant_offered = if self.variants.is_empty() {
            variant.is_empty()
        } else {
            self.variants.iter().any(|v| v == variant)
        };
        if !variant_offered {
            return Err(BasketError::unknown_variant(self.id, variant));
        }

        if let Some(available) = self.stock {
            if available < quantity {
                return Err(BasketError::out_of_stock(self.id, available, quantity));
            }
        }

        let entry = NewLineItem::new(self.id, self.seller_id, self.unit_price())
            .with_variant(variant)
            .with_quantity(quantity)
            .with_display(self.name.clone(), self.image_ref.clone());
        entry.validate()?;
        Ok(entry)
    }
}
