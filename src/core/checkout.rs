//! Checkout grouping
//!
//! The backend accepts one order submission per seller, so a basket is split
//! into seller groups when the user starts checkout. Grouping works purely on
//! the lines it is handed; whether a seller is still active is for the
//! submission step to find out.

use crate::core::traits::BasketStore;
use crate::types::{BasketError, LineItem, SellerId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Lines of one seller plus their subtotal
#[derive(Debug, Clone, PartialEq)]
pub struct SellerGroup {
    pub seller_id: SellerId,
    /// The seller's lines, in basket order
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
}

impl SellerGroup {
    fn new(seller_id: SellerId) -> Self {
        Self {
            seller_id,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
        }
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across the group's lines
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Partition lines into one group per seller
///
/// Groups come out in order of each seller's first line; lines keep their
/// basket order inside a group. An empty slice gives no groups.
pub fn group_by_seller(items: &[LineItem]) -> Vec<SellerGroup> {
    let mut groups: Vec<SellerGroup> = Vec::new();

    for item in items {
        let index = match groups.iter().position(|g| g.seller_id == item.seller_id) {
            Some(index) => index,
            None => {
                groups.push(SellerGroup::new(item.seller_id));
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.subtotal = group.subtotal.saturating_add(item.line_total());
        group.items.push(item.clone());
    }

    groups
}

/// Start a checkout: reject an empty basket, otherwise group it
///
/// # Errors
///
/// Returns `BasketError::EmptyBasket` when there are no lines.
pub fn prepare_checkout(items: &[LineItem]) -> Result<Vec<SellerGroup>, BasketError> {
    if items.is_empty() {
        return Err(BasketError::EmptyBasket);
    }
    let groups = group_by_seller(items);
    debug!(groups = groups.len(), "prepared checkout");
    Ok(groups)
}

/// Response of the order submission for one seller group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The backend created the order
    Confirmed,
    /// The backend refused the order or the request failed
    Rejected { reason: String },
}

/// Apply a submission response to the basket
///
/// Only a confirmed order clears the seller's lines. A rejected or failed
/// submission leaves the basket exactly as it was so nothing is lost.
/// Returns the number of lines cleared.
pub fn settle_group<B: BasketStore + ?Sized>(
    basket: &mut B,
    seller_id: SellerId,
    outcome: &SubmissionOutcome,
) -> usize {
    match outcome {
        SubmissionOutcome::Confirmed => basket.clear_seller(seller_id),
        SubmissionOutcome::Rejected { reason } => {
            warn!(seller = seller_id, %reason, "order submission rejected; basket kept");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Basket;
    use crate::types::NewLineItem;

    fn basket_with(lines: &[(u64, &str, u64, i64, u32)]) -> Basket {
        let mut basket = Basket::new();
        for &(product, variant, seller, cents, quantity) in lines {
            basket.add_item(
                NewLineItem::new(product, seller, Decimal::new(cents, 2))
                    .with_variant(variant)
                    .with_quantity(quantity),
            );
        }
        basket
    }

    #[test]
    fn test_empty_basket_has_no_groups() {
        assert!(group_by_seller(&[]).is_empty());
    }

    #[test]
    fn test_groups_two_sellers() {
        let basket = basket_with(&[
            (1, "", 10, 10000, 2),
            (2, "M", 20, 3000, 1),
            (3, "", 10, 5000, 1),
        ]);

        let groups = group_by_seller(basket.line_items());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].seller_id, 10);
        assert!(groups[0].items.iter().all(|i| i.seller_id == 10));
        assert_eq!(groups[0].line_count(), 2);
        assert_eq!(groups[0].unit_count(), 3);
        assert_eq!(groups[0].subtotal, Decimal::new(250, 0));

        assert_eq!(groups[1].seller_id, 20);
        assert!(groups[1].items.iter().all(|i| i.seller_id == 20));
        assert_eq!(groups[1].subtotal, Decimal::new(30, 0));

        let sum: Decimal = groups.iter().map(|g| g.subtotal).sum();
        assert_eq!(sum, basket.grand_total());
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let basket = basket_with(&[
            (1, "", 30, 100, 1),
            (2, "", 10, 100, 1),
            (3, "", 30, 100, 1),
        ]);

        let first = group_by_seller(basket.line_items());
        let second = group_by_seller(basket.line_items());

        assert_eq!(first, second);
        let sellers: Vec<SellerId> = first.iter().map(|g| g.seller_id).collect();
        assert_eq!(sellers, basket.seller_ids());
    }

    #[test]
    fn test_group_items_keep_basket_order() {
        let basket = basket_with(&[
            (7, "", 1, 100, 1),
            (3, "", 2, 100, 1),
            (5, "", 1, 100, 1),
        ]);

        let groups = group_by_seller(basket.line_items());
        let products: Vec<u64> = groups[0].items.iter().map(|i| i.product_id).collect();
        assert_eq!(products, vec![7, 5]);
    }

    #[test]
    fn test_prepare_checkout_rejects_empty_basket() {
        let basket = Basket::new();
        assert_eq!(
            prepare_checkout(basket.line_items()),
            Err(BasketError::EmptyBasket)
        );
    }

    #[test]
    fn test_prepare_checkout_groups() {
        let basket = basket_with(&[(1, "", 1, 100, 1), (2, "", 2, 100, 1)]);
        let groups = prepare_checkout(basket.line_items()).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_settle_confirmed_clears_only_that_seller() {
        let mut basket = basket_with(&[(1, "", 1, 100, 1), (2, "", 2, 100, 3)]);

        let cleared = settle_group(&mut basket, 1, &SubmissionOutcome::Confirmed);

        assert_eq!(cleared, 1);
        assert_eq!(basket.seller_ids(), vec![2]);
        assert_eq!(basket.get(2, "").map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_settle_rejected_keeps_basket() {
        let mut basket = basket_with(&[(1, "", 1, 100, 1), (2, "", 2, 100, 3)]);
        let before = basket.clone();

        let cleared = settle_group(
            &mut basket,
            1,
            &SubmissionOutcome::Rejected {
                reason: "seller closed".to_string(),
            },
        );

        assert_eq!(cleared, 0);
        assert_eq!(basket, before);
    }
}
