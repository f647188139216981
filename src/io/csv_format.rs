//! CSV format handling for operation logs and checkout reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to basket operations
//! - Per-seller report serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::SellerGroup;
use crate::format::DisplayOptions;
use crate::types::{BasketError, BasketOperation, LineItemKey, NewLineItem, ProductId, SellerId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// op, product, variant, seller, price, quantity, name, image
///
/// Everything but `op` is optional at this level; which fields an operation
/// needs is checked in `convert_csv_record`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A present, non-blank field
fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_product(op: &str, value: &Option<String>) -> Result<ProductId, BasketError> {
    let raw = field(value).ok_or_else(|| BasketError::missing_field(op, "product"))?;
    match raw.parse::<ProductId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(BasketError::invalid_product_id(raw)),
    }
}

fn parse_seller(op: &str, value: &Option<String>) -> Result<SellerId, BasketError> {
    let raw = field(value).ok_or_else(|| BasketError::missing_field(op, "seller"))?;
    match raw.parse::<SellerId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(BasketError::invalid_seller_id(raw)),
    }
}

fn parse_price(op: &str, value: &Option<String>) -> Result<Decimal, BasketError> {
    let raw = field(value).ok_or_else(|| BasketError::missing_field(op, "price"))?;
    match Decimal::from_str(raw) {
        Ok(price) if price >= Decimal::ZERO => Ok(price),
        _ => Err(BasketError::invalid_price(raw)),
    }
}

fn parse_quantity(value: &Option<String>) -> Result<Option<u32>, BasketError> {
    let Some(raw) = field(value) else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(Some(quantity)),
        _ => Err(BasketError::invalid_quantity(raw)),
    }
}

/// Convert a CsvRecord to a BasketOperation
///
/// This function:
/// - Parses the op name (case-insensitive)
/// - Checks the fields that op requires and ignores the rest
/// - Validates ids (positive), price (non-negative) and quantity (positive)
///
/// # Errors
///
/// Returns a `BasketError` describing the first problem found.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<BasketOperation, BasketError> {
    let op = csv_record.op.trim().to_lowercase();
    let variant = field(&csv_record.variant).unwrap_or_default().to_string();

    match op.as_str() {
        "add" => {
            let product_id = parse_product(&op, &csv_record.product)?;
            let seller_id = parse_seller(&op, &csv_record.seller)?;
            let unit_price = parse_price(&op, &csv_record.price)?;

            let mut entry = NewLineItem::new(product_id, seller_id, unit_price)
                .with_variant(variant)
                .with_display(
                    field(&csv_record.name).unwrap_or_default(),
                    field(&csv_record.image).unwrap_or_default(),
                );
            entry.quantity = parse_quantity(&csv_record.quantity)?;
            Ok(BasketOperation::Add(entry))
        }
        "remove" => {
            let product_id = parse_product(&op, &csv_record.product)?;
            Ok(BasketOperation::Remove(LineItemKey::new(product_id, variant)))
        }
        "remove_line" => {
            let product_id = parse_product(&op, &csv_record.product)?;
            Ok(BasketOperation::RemoveLine(LineItemKey::new(product_id, variant)))
        }
        "clear_seller" => Ok(BasketOperation::ClearSeller(parse_seller(
            &op,
            &csv_record.seller,
        )?)),
        "clear_all" => Ok(BasketOperation::ClearAll),
        _ => Err(BasketError::invalid_operation(&csv_record.op)),
    }
}

/// Write the per-seller checkout report
///
/// Columns: seller, lines, units, subtotal, display. Sellers are sorted by id
/// for deterministic output, followed by a `total` row.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_checkout_report(
    groups: &[SellerGroup],
    options: &DisplayOptions,
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["seller", "lines", "units", "subtotal", "display"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_groups: Vec<&SellerGroup> = groups.iter().collect();
    sorted_groups.sort_by_key(|group| group.seller_id);

    let mut lines = 0usize;
    let mut units = 0u64;
    let mut total = Decimal::ZERO;

    for group in sorted_groups {
        lines += group.line_count();
        units += group.unit_count();
        total = total.saturating_add(group.subtotal);

        writer
            .write_record(&[
                group.seller_id.to_string(),
                group.line_count().to_string(),
                group.unit_count().to_string(),
                format!("{:.2}", group.subtotal),
                options.format(group.subtotal),
            ])
            .map_err(|e| format!("Failed to write seller record: {}", e))?;
    }

    writer
        .write_record(&[
            "total".to_string(),
            lines.to_string(),
            units.to_string(),
            format!("{:.2}", total),
            options.format(total),
        ])
        .map_err(|e| format!("Failed to write total record: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
