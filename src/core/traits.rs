//! Core trait for basket storage
//!
//! Lets the single-owner `Basket` and the concurrent `AsyncBasket` be driven
//! interchangeably by checkout settlement and operation replay.

use crate::types::{
    AddOutcome, BasketOperation, LineItem, NewLineItem, OperationOutcome, ProductId,
    RemoveOutcome, SellerId,
};

/// Mutations and reads every basket implementation provides
///
/// None of the operations can fail. Removing an absent line and clearing a
/// seller without lines are no-ops reported through the outcome values.
pub trait BasketStore {
    /// Add units, merging into the line with the same `(product_id, variant_key)`
    fn add_item(&mut self, entry: NewLineItem) -> AddOutcome;

    /// Take one unit off a line, dropping the line when it reaches zero
    fn remove_item(&mut self, product_id: ProductId, variant_key: &str) -> RemoveOutcome;

    /// Drop a whole line regardless of its quantity
    fn remove_line_completely(&mut self, product_id: ProductId, variant_key: &str)
        -> RemoveOutcome;

    /// Drop every line of a seller, returning how many were dropped
    fn clear_seller(&mut self, seller_id: SellerId) -> usize;

    /// Drop every line, returning how many were dropped
    fn clear_all(&mut self) -> usize;

    /// All lines in stable insertion order
    fn line_items(&self) -> Vec<LineItem>;

    /// Apply a logged operation
    fn apply(&mut self, operation: BasketOperation) -> OperationOutcome {
        match operation {
            BasketOperation::Add(entry) => OperationOutcome::Added(self.add_item(entry)),
            BasketOperation::Remove(key) => {
                OperationOutcome::Removed(self.remove_item(key.product_id, &key.variant_key))
            }
            BasketOperation::RemoveLine(key) => OperationOutcome::Removed(
                self.remove_line_completely(key.product_id, &key.variant_key),
            ),
            BasketOperation::ClearSeller(seller_id) => {
                OperationOutcome::Cleared(self.clear_seller(seller_id))
            }
            BasketOperation::ClearAll => OperationOutcome::Cleared(self.clear_all()),
        }
    }
}
