//! Basket operations and their outcomes
//!
//! Every mutation of a basket is one of the operations below. Outcomes report
//! what actually happened; none of them is an error. Removing an absent line
//! or clearing a seller with no lines are plain no-ops.

use super::line_item::{LineItemKey, NewLineItem, SellerId};

/// A single basket mutation
#[derive(Debug, Clone, PartialEq)]
pub enum BasketOperation {
    /// Add units of a product, merging into an existing line with the same key
    Add(NewLineItem),

    /// Step-down removal: take one unit off the line, dropping it at zero
    Remove(LineItemKey),

    /// Drop the whole line in one action, whatever its quantity
    RemoveLine(LineItemKey),

    /// Drop every line belonging to a seller (after that seller's checkout)
    ClearSeller(SellerId),

    /// Empty the basket (logout)
    ClearAll,
}

impl BasketOperation {
    /// Name used in operation logs
    pub fn name(&self) -> &'static str {
        match self {
            BasketOperation::Add(_) => "add",
            BasketOperation::Remove(_) => "remove",
            BasketOperation::RemoveLine(_) => "remove_line",
            BasketOperation::ClearSeller(_) => "clear_seller",
            BasketOperation::ClearAll => "clear_all",
        }
    }

    /// The single line this operation touches, if it touches only one
    pub fn line_key(&self) -> Option<LineItemKey> {
        match self {
            BasketOperation::Add(entry) => Some(entry.key()),
            BasketOperation::Remove(key) | BasketOperation::RemoveLine(key) => Some(key.clone()),
            BasketOperation::ClearSeller(_) | BasketOperation::ClearAll => None,
        }
    }

    /// Whether the operation spans several lines
    ///
    /// Barriers must observe every operation queued before them and be
    /// observed by every operation queued after them.
    pub fn is_barrier(&self) -> bool {
        self.line_key().is_none()
    }
}

/// Result of `add_item`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended
    Inserted,
    /// An existing line absorbed the units; `quantity` is the new total
    Merged { quantity: u32 },
}

/// Result of `remove_item` / `remove_line_completely`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// One unit was taken off; the line stays
    Decremented { remaining: u32 },
    /// The line is gone
    Removed,
    /// No line with that key existed
    NotFound,
}

/// Result of applying any `BasketOperation`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Added(AddOutcome),
    Removed(RemoveOutcome),
    /// Number of lines dropped by a clear
    Cleared(usize),
}
