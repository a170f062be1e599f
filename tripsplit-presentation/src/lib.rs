#![warn(clippy::uninlined_format_args)]

pub mod expense_presenter;
pub mod format;
pub mod ledger_presenter;
pub mod summary_presenter;
pub mod text_table;

pub use expense_presenter::ExpensePresenter;
pub use format::{format_balance, format_currency, format_percentage, format_split_among};
pub use ledger_presenter::LedgerPresenter;
pub use summary_presenter::SummaryPresenter;
