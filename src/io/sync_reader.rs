//! Synchronous CSV reader with iterator interface
//!
//! Streams basket operations from a replay log one row at a time and
//! delegates field handling to the csv_format module.
//!
//! ```no_run
//! use basket_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(op) => println!("Applying {}", op.name()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Row errors are yielded as Err variants with the line number attached,
//!   so callers can skip them and carry on

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{BasketError, BasketOperation};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open a replay log
    ///
    /// The CSV reader trims all fields, tolerates short rows (trailing
    /// optional columns may be left off) and uses an 8KB buffer.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<BasketOperation, BasketError>;

    /// Read and convert the next row
    ///
    /// Every row error comes back as `BasketError::ParseError`. Line numbers
    /// count the header as line 1.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;
        let line = self.line_num as u64 + 1;

        Some(match row {
            Ok(csv_record) => {
                convert_csv_record(csv_record).map_err(|e| BasketError::parse_error(line, e))
            }
            Err(e) => Err(BasketError::from(e)),
        })
    }
}
