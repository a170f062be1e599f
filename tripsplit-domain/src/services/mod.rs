pub mod balance_aggregator;
pub mod expense_query;
pub mod normalization;
pub mod settlement_planner;
pub mod share_calculator;
pub mod split_validation;
pub mod statistics;

pub use balance_aggregator::{Aggregation, BalanceAggregator, RejectedExpense};
pub use expense_query::{
    BoundEdge, ExpenseFilter, SortKey, SortOrder, parse_date_bound, sort_expenses,
};
pub use normalization::{parse_amount, parse_date, parse_time_of_day, resolve_timestamp};
pub use settlement_planner::SettlementPlanner;
pub use share_calculator::ShareCalculator;
pub use split_validation::{CoveringSplits, LenientSplits, SplitValidator, SplitViolation};
pub use statistics::{
    CategoryStat, CategoryTable, PersonShare, PersonStats, category_stats, person_spend,
    person_stats, totals,
};
