//! Thread-safe basket for concurrent callers
//!
//! `AsyncBasket` is the basket to hand out when mutations can arrive from
//! several tasks or threads at once. Lines live in a `DashMap` keyed by
//! `(product_id, variant_key)`, and every per-key mutation (merge, step-down,
//! whole-line removal) runs through the map's entry API while the key's shard
//! is locked. Two adds of the same key therefore cannot both insert a row, and
//! an add racing a remove cannot lose an update.
//!
//! # Ordering
//!
//! A map has no order, so each line records an insertion sequence number.
//! Reads return lines sorted by that number, which gives the same stable
//! order a single-owner basket would show. A replay that applies adds out of
//! log order reserves a block of numbers up front and inserts with
//! `add_item_at`, so the final order still follows the log.

use crate::core::basket::{Basket, BasketSnapshot};
use crate::core::traits::BasketStore;
use crate::types::{
    AddOutcome, LineItem, LineItemKey, NewLineItem, ProductId, RemoveOutcome, SellerId,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Clone)]
struct Slot {
    /// Insertion sequence, used only for read ordering
    seq: u64,
    item: LineItem,
}

/// Basket safe to share across threads (wrap it in an `Arc`)
#[derive(Debug, Default)]
pub struct AsyncBasket {
    lines: DashMap<LineItemKey, Slot>,
    next_seq: AtomicU64,
}

impl AsyncBasket {
    /// Create an empty basket
    pub fn new() -> Self {
        Self {
            lines: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Restore from persisted state, with the same invariant repair as
    /// `Basket::from_snapshot`
    pub fn from_snapshot(snapshot: BasketSnapshot) -> Self {
        let basket = Self::new();
        for item in Basket::from_snapshot(snapshot).line_items() {
            let seq = basket.next_seq.fetch_add(1, Ordering::Relaxed);
            basket.lines.insert(
                item.key(),
                Slot {
                    seq,
                    item: item.clone(),
                },
            );
        }
        basket
    }

    /// Plain-data copy of the current lines in insertion order
    pub fn snapshot(&self) -> BasketSnapshot {
        BasketSnapshot {
            items: self.line_items(),
        }
    }

    /// Reserve `count` consecutive sequence numbers, returning the first
    pub fn reserve_sequence(&self, count: u64) -> u64 {
        self.next_seq.fetch_add(count, Ordering::Relaxed)
    }

    /// Add units of a product; see `Basket::add_item`
    ///
    /// The lookup and the merge-or-insert happen under one shard lock.
    pub fn add_item(&self, entry: NewLineItem) -> AddOutcome {
        let seq = self.reserve_sequence(1);
        self.add_item_at(entry, seq)
    }

    /// Add with an explicit sequence number
    ///
    /// `seq` only matters when the add creates a new line; a merge keeps the
    /// line's original position.
    pub fn add_item_at(&self, entry: NewLineItem, seq: u64) -> AddOutcome {
        let quantity = entry.effective_quantity();

        match self.lines.entry(entry.key()) {
            Entry::Occupied(mut occupied) => {
                let slot = occupied.get_mut();
                slot.item.quantity = slot.item.quantity.saturating_add(quantity);
                debug!(key = %slot.item.key(), quantity = slot.item.quantity, "merged into existing line");
                AddOutcome::Merged {
                    quantity: slot.item.quantity,
                }
            }
            Entry::Vacant(vacant) => {
                let item = entry.into_line_item();
                debug!(key = %item.key(), seller = item.seller_id, quantity = item.quantity, "inserted line");
                vacant.insert(Slot { seq, item });
                AddOutcome::Inserted
            }
        }
    }

    /// Step-down removal of one unit; see `Basket::remove_item`
    pub fn remove_item(&self, product_id: ProductId, variant_key: &str) -> RemoveOutcome {
        match self.lines.entry(LineItemKey::new(product_id, variant_key)) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().item.quantity > 1 {
                    let slot = occupied.get_mut();
                    slot.item.quantity -= 1;
                    debug!(key = %slot.item.key(), remaining = slot.item.quantity, "decremented line");
                    RemoveOutcome::Decremented {
                        remaining: slot.item.quantity,
                    }
                } else {
                    let slot = occupied.remove();
                    debug!(key = %slot.item.key(), "removed line");
                    RemoveOutcome::Removed
                }
            }
            Entry::Vacant(_) => RemoveOutcome::NotFound,
        }
    }

    /// Drop the whole line in one action
    pub fn remove_line_completely(&self, product_id: ProductId, variant_key: &str) -> RemoveOutcome {
        match self.lines.remove(&LineItemKey::new(product_id, variant_key)) {
            Some((key, slot)) => {
                debug!(%key, quantity = slot.item.quantity, "removed whole line");
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Drop all lines of one seller
    pub fn clear_seller(&self, seller_id: SellerId) -> usize {
        let mut removed = 0;
        self.lines.retain(|_, slot| {
            let keep = slot.item.seller_id != seller_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        debug!(seller = seller_id, removed, "cleared seller");
        removed
    }

    /// Empty the basket
    pub fn clear_all(&self) -> usize {
        let mut removed = 0;
        self.lines.retain(|_, _| {
            removed += 1;
            false
        });
        debug!(removed, "cleared basket");
        removed
    }

    /// All lines in insertion order
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut slots: Vec<Slot> = self
            .lines
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.item).collect()
    }

    /// Copy of one line
    pub fn get(&self, product_id: ProductId, variant_key: &str) -> Option<LineItem> {
        self.lines
            .get(&LineItemKey::new(product_id, variant_key))
            .map(|entry| entry.value().item.clone())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals for one seller
    pub fn seller_subtotal(&self, seller_id: SellerId) -> Decimal {
        self.lines
            .iter()
            .filter(|entry| entry.value().item.seller_id == seller_id)
            .fold(Decimal::ZERO, |acc, entry| {
                acc.saturating_add(entry.value().item.line_total())
            })
    }

    /// Sum of all line totals
    pub fn grand_total(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, entry| {
            acc.saturating_add(entry.value().item.line_total())
        })
    }
}

// Implemented on the shared reference, like `Write for &File`: every method
// only needs `&AsyncBasket`, so any number of handles can drive one basket.
impl BasketStore for &AsyncBasket {
    fn add_item(&mut self, entry: NewLineItem) -> AddOutcome {
        AsyncBasket::add_item(*self, entry)
    }

    fn remove_item(&mut self, product_id: ProductId, variant_key: &str) -> RemoveOutcome {
        AsyncBasket::remove_item(*self, product_id, variant_key)
    }

    fn remove_line_completely(
        &mut self,
        product_id: ProductId,
        variant_key: &str,
    ) -> RemoveOutcome {
        AsyncBasket::remove_line_completely(*self, product_id, variant_key)
    }

    fn clear_seller(&mut self, seller_id: SellerId) -> usize {
        AsyncBasket::clear_seller(*self, seller_id)
    }

    fn clear_all(&mut self) -> usize {
        AsyncBasket::clear_all(*self)
    }

    fn line_items(&self) -> Vec<LineItem> {
        AsyncBasket::line_items(*self)
    }
}
