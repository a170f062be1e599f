#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Category, Currency, CurrencyCode, CustomSplits, Expense, ExpenseId, LedgerTotals, Money,
    ParticipantList, PerCurrency, PersonBalance, Settlement, Split, SplitKind,
};
pub use services::{
    Aggregation, BalanceAggregator, CoveringSplits, ExpenseFilter, LenientSplits,
    SettlementPlanner, ShareCalculator, SortKey, SortOrder, SplitValidator, SplitViolation,
};
