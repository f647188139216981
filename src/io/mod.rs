//! I/O module
//!
//! Handles replay log parsing, report output and basket persistence.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `snapshot` - JSON snapshot load/save

pub mod async_reader;
pub mod csv_format;
pub mod snapshot;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_checkout_report, CsvRecord};
pub use snapshot::{load_snapshot, save_snapshot};
pub use sync_reader::SyncReader;
