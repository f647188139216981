//! Basket persistence
//!
//! The basket survives app restarts as a JSON snapshot. Prices are stored as
//! strings so no precision is lost on the way through JSON.

use crate::core::BasketSnapshot;
use crate::types::BasketError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Load a snapshot from disk
///
/// # Errors
///
/// `FileNotFound` when the path does not exist, `SnapshotError` when the
/// contents are not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<BasketSnapshot, BasketError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BasketError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => BasketError::from(e),
    })?;

    let snapshot: BasketSnapshot = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), lines = snapshot.items.len(), "loaded snapshot");
    Ok(snapshot)
}

/// Write a snapshot to disk, replacing any previous one
pub fn save_snapshot(snapshot: &BasketSnapshot, path: &Path) -> Result<(), BasketError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.flush()?;
    debug!(path = %path.display(), lines = snapshot.items.len(), "saved snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Basket;
    use crate::types::NewLineItem;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("basket.json");

        let mut basket = Basket::new();
        basket.add_item(
            NewLineItem::new(3, 1, Decimal::new(1999, 2))
                .with_variant("blue")
                .with_quantity(2)
                .with_display("Mug", "mug.jpg"),
        );
        basket.add_item(NewLineItem::new(8, 2, Decimal::new(5, 1)));

        save_snapshot(&basket.snapshot(), &path).unwrap();
        let restored = Basket::from_snapshot(load_snapshot(&path).unwrap());

        assert_eq!(restored.line_items(), basket.line_items());
    }

    #[test]
    fn test_prices_are_stored_as_strings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("basket.json");

        let mut basket = Basket::new();
        basket.add_item(NewLineItem::new(3, 1, Decimal::new(1999, 2)));
        save_snapshot(&basket.snapshot(), &path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"19.99\""));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(
            load_snapshot(&path),
            Err(BasketError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("basket.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_snapshot(&path),
            Err(BasketError::SnapshotError { .. })
        ));
    }

    #[test]
    fn test_load_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("basket.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(load_snapshot(&path).unwrap(), BasketSnapshot::default());
    }
}
