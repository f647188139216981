//! Single-owner basket engine
//!
//! `Basket` owns the line items of one session and enforces the identity
//! rule: at most one line per `(product_id, variant_key)`. Adding an existing
//! key merges quantity, removal steps down one unit at a time, and the two
//! clears drop lines by seller or wholesale.
//!
//! Totals are recomputed from the lines on every read. Baskets hold a handful
//! of lines, and a cached total would have to be kept in sync with every
//! mutation.

use crate::core::traits::BasketStore;
use crate::types::{
    AddOutcome, LineItem, NewLineItem, ProductId, RemoveOutcome, SellerId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Plain-data form of a basket for persistence
///
/// Holds only the lines; every total is derived again after a restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketSnapshot {
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Basket owned by a single session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    /// Lines in insertion order
    items: Vec<LineItem>,
}

impl Basket {
    /// Create an empty basket
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Restore a basket from persisted state
    ///
    /// Persisted data comes from outside the engine, so the identity rule is
    /// re-established while loading: rows with a repeated key are folded into
    /// the first row (its price and presentation fields win) and rows with a
    /// zero quantity are dropped.
    pub fn from_snapshot(snapshot: BasketSnapshot) -> Self {
        let mut basket = Self::new();
        for item in snapshot.items {
            if item.quantity == 0 {
                debug!(product = item.product_id, variant = %item.variant_key, "dropping zero-quantity line from snapshot");
                continue;
            }
            match basket.position(item.product_id, &item.variant_key) {
                Some(index) => {
                    let existing = &mut basket.items[index];
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                    debug!(key = %existing.key(), quantity = existing.quantity, "folded duplicate snapshot line");
                }
                None => basket.items.push(item),
            }
        }
        basket
    }

    /// Plain-data copy of the current lines
    pub fn snapshot(&self) -> BasketSnapshot {
        BasketSnapshot {
            items: self.items.clone(),
        }
    }

    fn position(&self, product_id: ProductId, variant_key: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.matches(product_id, variant_key))
    }

    /// Add units of a product
    ///
    /// If a line with the same `(product_id, variant_key)` exists its quantity
    /// grows and nothing else changes: the unit price stays the one captured by
    /// the first add. Otherwise a new line is appended.
    pub fn add_item(&mut self, entry: NewLineItem) -> AddOutcome {
        let quantity = entry.effective_quantity();

        if let Some(index) = self.position(entry.product_id, &entry.variant_key) {
            let existing = &mut self.items[index];
            existing.quantity = existing.quantity.saturating_add(quantity);
            debug!(key = %existing.key(), quantity = existing.quantity, "merged into existing line");
            return AddOutcome::Merged {
                quantity: existing.quantity,
            };
        }

        let item = entry.into_line_item();
        debug!(key = %item.key(), seller = item.seller_id, quantity = item.quantity, "inserted line");
        self.items.push(item);
        AddOutcome::Inserted
    }

    /// Step-down removal of one unit
    ///
    /// A line with more than one unit loses one; a line with exactly one unit
    /// is dropped. An absent line is left alone.
    pub fn remove_item(&mut self, product_id: ProductId, variant_key: &str) -> RemoveOutcome {
        let Some(index) = self.position(product_id, variant_key) else {
            return RemoveOutcome::NotFound;
        };

        let item = &mut self.items[index];
        if item.quantity > 1 {
            item.quantity -= 1;
            debug!(key = %item.key(), remaining = item.quantity, "decremented line");
            RemoveOutcome::Decremented {
                remaining: item.quantity,
            }
        } else {
            let removed = self.items.remove(index);
            debug!(key = %removed.key(), "removed line");
            RemoveOutcome::Removed
        }
    }

    /// Drop the whole line in one action
    pub fn remove_line_completely(
        &mut self,
        product_id: ProductId,
        variant_key: &str,
    ) -> RemoveOutcome {
        match self.position(product_id, variant_key) {
            Some(index) => {
                let removed = self.items.remove(index);
                debug!(key = %removed.key(), quantity = removed.quantity, "removed whole line");
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Drop all lines of one seller, leaving every other line untouched
    pub fn clear_seller(&mut self, seller_id: SellerId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.seller_id != seller_id);
        let removed = before - self.items.len();
        debug!(seller = seller_id, removed, "cleared seller");
        removed
    }

    /// Empty the basket
    pub fn clear_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        debug!(removed, "cleared basket");
        removed
    }

    /// All lines in insertion order
    pub fn line_items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by key
    pub fn get(&self, product_id: ProductId, variant_key: &str) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.matches(product_id, variant_key))
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sellers present in the basket, in order of first appearance
    pub fn seller_ids(&self) -> Vec<SellerId> {
        let mut sellers = Vec::new();
        for item in &self.items {
            if !sellers.contains(&item.seller_id) {
                sellers.push(item.seller_id);
            }
        }
        sellers
    }

    /// Sum of line totals for one seller
    pub fn seller_subtotal(&self, seller_id: SellerId) -> Decimal {
        self.items
            .iter()
            .filter(|item| item.seller_id == seller_id)
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Sum of all line totals
    pub fn grand_total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }
}

impl BasketStore for Basket {
    fn add_item(&mut self, entry: NewLineItem) -> AddOutcome {
        Basket::add_item(self, entry)
    }

    fn remove_item(&mut self, product_id: ProductId, variant_key: &str) -> RemoveOutcome {
        Basket::remove_item(self, product_id, variant_key)
    }

    fn remove_line_completely(
        &mut self,
        product_id: ProductId,
        variant_key: &str,
    ) -> RemoveOutcome {
        Basket::remove_line_completely(self, product_id, variant_key)
    }

    fn clear_seller(&mut self, seller_id: SellerId) -> usize {
        Basket::clear_seller(self, seller_id)
    }

    fn clear_all(&mut self) -> usize {
        Basket::clear_all(self)
    }

    fn line_items(&self) -> Vec<LineItem> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasketOperation, LineItemKey, OperationOutcome};
    use rstest::rstest;

    fn entry(product_id: ProductId, variant: &str, seller_id: SellerId, cents: i64) -> NewLineItem {
        NewLineItem::new(product_id, seller_id, Decimal::new(cents, 2)).with_variant(variant)
    }

    #[test]
    fn test_new_basket_is_empty() {
        let basket = Basket::new();
        assert!(basket.is_empty());
        assert_eq!(basket.grand_total(), Decimal::ZERO);
        assert!(basket.seller_ids().is_empty());
    }

    #[test]
    fn test_add_same_key_twice_merges() {
        let mut basket = Basket::new();

        assert_eq!(basket.add_item(entry(5, "M", 1, 1000)), AddOutcome::Inserted);
        assert_eq!(
            basket.add_item(entry(5, "M", 1, 1000)),
            AddOutcome::Merged { quantity: 2 }
        );

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.get(5, "M").map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_different_variants_are_separate_lines() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "M", 1, 1000));
        basket.add_item(entry(5, "L", 1, 1200));
        basket.add_item(entry(5, "", 1, 900));

        assert_eq!(basket.len(), 3);
    }

    #[test]
    fn test_merge_keeps_first_price() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "M", 1, 1000).with_display("Shirt", "shirt.png"));
        basket.add_item(entry(5, "M", 2, 1500).with_display("Renamed", "other.png"));

        let item = basket.get(5, "M").unwrap();
        assert_eq!(item.unit_price, Decimal::new(1000, 2));
        assert_eq!(item.seller_id, 1);
        assert_eq!(item.display_name, "Shirt");
        assert_eq!(item.image_ref, "shirt.png");
    }

    #[test]
    fn test_add_merges_explicit_quantity() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "", 1, 1000).with_quantity(2));
        basket.add_item(entry(5, "", 1, 1000).with_quantity(3));

        assert_eq!(basket.get(5, "").map(|i| i.quantity), Some(5));
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "", 1, 1000).with_quantity(0));

        assert_eq!(basket.get(5, "").map(|i| i.quantity), Some(1));
    }

    #[test]
    fn test_add_saturates_quantity() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "", 1, 1).with_quantity(u32::MAX));
        basket.add_item(entry(5, "", 1, 1).with_quantity(10));

        assert_eq!(basket.get(5, "").map(|i| i.quantity), Some(u32::MAX));
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn test_uniqueness_over_many_adds() {
        let mut basket = Basket::new();
        for round in 0..5 {
            for product in 1..=4 {
                for variant in ["", "S", "M"] {
                    basket.add_item(entry(product, variant, product % 2 + 1, 100 + round));
                }
            }
        }

        assert_eq!(basket.len(), 12);
        let mut keys: Vec<LineItemKey> = basket.line_items().iter().map(LineItem::key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 12);
        assert!(basket.line_items().iter().all(|item| item.quantity == 5));
    }

    #[test]
    fn test_step_down_removal() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "M", 1, 1000).with_quantity(3));

        assert_eq!(
            basket.remove_item(5, "M"),
            RemoveOutcome::Decremented { remaining: 2 }
        );
        assert_eq!(basket.get(5, "M").map(|i| i.quantity), Some(2));

        assert_eq!(
            basket.remove_item(5, "M"),
            RemoveOutcome::Decremented { remaining: 1 }
        );
        assert_eq!(basket.remove_item(5, "M"), RemoveOutcome::Removed);
        assert!(basket.get(5, "M").is_none());

        assert_eq!(basket.remove_item(5, "M"), RemoveOutcome::NotFound);
        assert!(basket.is_empty());
    }

    #[test]
    fn test_remove_only_touches_matching_variant() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "M", 1, 1000));
        basket.add_item(entry(5, "L", 1, 1000));

        basket.remove_item(5, "M");

        assert!(basket.get(5, "M").is_none());
        assert_eq!(basket.get(5, "L").map(|i| i.quantity), Some(1));
    }

    #[test]
    fn test_remove_line_completely() {
        let mut basket = Basket::new();
        basket.add_item(entry(5, "M", 1, 1000).with_quantity(3));
        basket.add_item(entry(6, "", 1, 500));

        assert_eq!(basket.remove_line_completely(5, "M"), RemoveOutcome::Removed);
        assert!(basket.get(5, "M").is_none());
        assert_eq!(basket.len(), 1);

        assert_eq!(
            basket.remove_line_completely(5, "M"),
            RemoveOutcome::NotFound
        );
    }

    #[test]
    fn test_clear_seller_isolation() {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 10, 1000).with_quantity(2));
        basket.add_item(entry(2, "S", 20, 500).with_quantity(3));
        basket.add_item(entry(3, "", 10, 250));
        basket.add_item(entry(4, "", 30, 700));

        let before_20 = basket.get(2, "S").cloned();
        let before_30 = basket.get(4, "").cloned();

        assert_eq!(basket.clear_seller(10), 2);

        assert!(basket.line_items().iter().all(|item| item.seller_id != 10));
        assert_eq!(basket.get(2, "S").cloned(), before_20);
        assert_eq!(basket.get(4, "").cloned(), before_30);
        assert_eq!(basket.len(), 2);
    }

    #[test]
    fn test_clear_seller_without_lines_is_noop() {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 10, 1000));

        assert_eq!(basket.clear_seller(99), 0);
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn test_clear_all() {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 10, 1000));
        basket.add_item(entry(2, "", 20, 1000));

        assert_eq!(basket.clear_all(), 2);
        assert!(basket.is_empty());
        assert_eq!(basket.clear_all(), 0);
    }

    #[test]
    fn test_totals() {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 1, 10000).with_quantity(2));
        basket.add_item(entry(2, "", 1, 5000));

        assert_eq!(basket.seller_subtotal(1), Decimal::new(250, 0));
        assert_eq!(basket.grand_total(), Decimal::new(250, 0));

        basket.add_item(entry(3, "", 2, 3000));

        assert_eq!(basket.grand_total(), Decimal::new(280, 0));
        assert_eq!(basket.seller_subtotal(1), Decimal::new(250, 0));
        assert_eq!(basket.seller_subtotal(2), Decimal::new(30, 0));
        assert_eq!(basket.seller_subtotal(3), Decimal::ZERO);
    }

    #[test]
    fn test_totals_follow_mutations() {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 1, 1999).with_quantity(3));
        assert_eq!(basket.grand_total(), Decimal::new(5997, 2));

        basket.remove_item(1, "");
        assert_eq!(basket.grand_total(), Decimal::new(3998, 2));
        assert_eq!(basket.unit_count(), 2);
    }

    #[test]
    fn test_seller_ids_in_first_appearance_order() {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 30, 100));
        basket.add_item(entry(2, "", 10, 100));
        basket.add_item(entry(3, "", 30, 100));
        basket.add_item(entry(4, "", 20, 100));

        assert_eq!(basket.seller_ids(), vec![30, 10, 20]);
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_order() {
        let mut basket = Basket::new();
        basket.add_item(entry(3, "", 1, 100));
        basket.add_item(entry(1, "M", 2, 200).with_quantity(4));

        let restored = Basket::from_snapshot(basket.snapshot());
        assert_eq!(restored, basket);
    }

    #[test]
    fn test_from_snapshot_restores_invariants() {
        let first = entry(5, "M", 1, 1000).with_quantity(2).into_line_item();
        let duplicate = entry(5, "M", 1, 1500).with_quantity(3).into_line_item();
        let mut empty = entry(6, "", 1, 100).into_line_item();
        empty.quantity = 0;

        let basket = Basket::from_snapshot(BasketSnapshot {
            items: vec![first, empty, duplicate],
        });

        assert_eq!(basket.len(), 1);
        let item = basket.get(5, "M").unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(item.unit_price, Decimal::new(1000, 2));
    }

    #[rstest]
    #[case::add(BasketOperation::Add(entry(1, "", 1, 100)), OperationOutcome::Added(AddOutcome::Merged { quantity: 3 }))]
    #[case::remove(BasketOperation::Remove(LineItemKey::new(1, "")), OperationOutcome::Removed(RemoveOutcome::Decremented { remaining: 1 }))]
    #[case::remove_line(BasketOperation::RemoveLine(LineItemKey::new(1, "")), OperationOutcome::Removed(RemoveOutcome::Removed))]
    #[case::remove_missing(BasketOperation::Remove(LineItemKey::new(1, "XL")), OperationOutcome::Removed(RemoveOutcome::NotFound))]
    #[case::clear_seller(BasketOperation::ClearSeller(1), OperationOutcome::Cleared(1))]
    #[case::clear_all(BasketOperation::ClearAll, OperationOutcome::Cleared(2))]
    fn test_apply_dispatch(#[case] op: BasketOperation, #[case] expected: OperationOutcome) {
        let mut basket = Basket::new();
        basket.add_item(entry(1, "", 1, 100).with_quantity(2));
        basket.add_item(entry(2, "", 2, 100));

        assert_eq!(BasketStore::apply(&mut basket, op), expected);
    }
}
