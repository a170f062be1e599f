#![warn(clippy::uninlined_format_args)]

pub mod clock;
pub mod config;
pub mod csv_snapshot;
pub mod error;
pub mod json_store;
pub mod records;
pub mod sheet_rows;

pub use clock::SystemClock;
pub use config::{DEFAULT_CONFIG_PATH, load_config, load_config_with_fallback};
pub use csv_snapshot::CsvSnapshotReader;
pub use error::ImportError;
pub use json_store::JsonExpenseStore;
pub use sheet_rows::{SHEET_HEADER, SheetFileStore, decode_sheet_rows, encode_sheet_rows};
