#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod expense_book;
pub mod ledger_processor;
pub mod model;
pub mod ports;
pub mod sync;

pub use error::{ExpenseBookError, StoreError, SyncError};
pub use expense_book::ExpenseBook;
pub use ledger_processor::{LedgerProcessor, LedgerReport};
pub use model::{NewExpense, TripConfig};
pub use ports::{Clock, ExpenseStore, FixedClock, RemoteExpenseStore};
pub use sync::{MergeOutcome, SyncService, merge_by_id};
