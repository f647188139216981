//! Asynchronous CSV reader with batch interface
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of BasketOperations
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```
//!
//! Invalid rows are logged and skipped; a batch only ever holds operations
//! that converted cleanly.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::BasketOperation;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read up to `batch_size` operations
    ///
    /// Returns an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<BasketOperation> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let Some(row) = records.next().await else {
                break;
            };
            self.line_num += 1;

            match row {
                Ok(csv_record) => match convert_csv_record(csv_record) {
                    Ok(operation) => batch.push(operation),
                    Err(e) => warn!(line = self.line_num, error = %e, "skipping invalid row"),
                },
                Err(e) => warn!(line = self.line_num, error = %e, "CSV parse error"),
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    const HEADER: &str = "op,product,variant,seller,price,quantity,name,image\n";

    fn reader(rows: &str) -> AsyncReader<Cursor<Vec<u8>>> {
        AsyncReader::new(Cursor::new(format!("{HEADER}{rows}").into_bytes()))
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut async_reader = reader(
            "add,1,,1,1.00,,,\n\
             add,2,,1,2.00,,,\n\
             clear_all,,,,,,,\n",
        );

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].line_key().map(|k| k.product_id), Some(1));
        assert_eq!(batch[1].line_key().map(|k| k.product_id), Some(2));

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch, vec![BasketOperation::ClearAll]);

        assert!(async_reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = reader("");
        assert!(async_reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_rows() {
        let mut async_reader = reader(
            "checkout,1,,1,,,,\n\
             add,1,,1,-1,,,\n\
             remove,4,,,,,,\n",
        );

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].name(), "remove");
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_and_case() {
        let mut async_reader = reader("  Clear_Seller  ,  ,  ,  8  ,,,,\n");

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch, vec![BasketOperation::ClearSeller(8)]);
    }
}
