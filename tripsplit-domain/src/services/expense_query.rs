use crate::{model::Expense, services::normalization::parse_date};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use std::cmp::Ordering;

/// Derived views over the raw expense list. Every criterion is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub currency: Option<String>,
    pub category: Option<String>,
    pub participant: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn category(mut self, label: impl Into<String>) -> Self {
        self.category = Some(label.into());
        self
    }

    pub fn participant(mut self, name: impl Into<String>) -> Self {
        self.participant = Some(name.into());
        self
    }

    pub fn date_from(mut self, bound: Option<DateTime<Utc>>) -> Self {
        self.date_from = bound;
        self
    }

    pub fn date_to(mut self, bound: Option<DateTime<Utc>>) -> Self {
        self.date_to = bound;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(currency) = &self.currency
            && expense.currency.as_str() != currency
        {
            return false;
        }
        if let Some(category) = &self.category
            && expense.category.as_str() != category
        {
            return false;
        }
        if let Some(name) = &self.participant
            && !expense.involves(name)
        {
            return false;
        }

        // Records without a comparable instant stay visible.
        let Some(occurred_at) = expense.occurred_at() else {
            return true;
        };
        if self.date_from.is_some_and(|from| occurred_at < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| occurred_at > to) {
            return false;
        }
        true
    }

    pub fn apply<'e>(&self, expenses: &'e [Expense]) -> Vec<&'e Expense> {
        expenses.iter().filter(|expense| self.matches(expense)).collect()
    }
}

/// Which end of a date range a bound closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundEdge {
    Start,
    End,
}

/// Parses a date-range bound. RFC 3339 text is an exact instant; a
/// `YYYY-MM-DD` bound covers that whole calendar day in `tz`, so `Start` is
/// local midnight and `End` the last instant before the next midnight.
/// Unparseable bounds yield `None`, which disables that side of the range.
pub fn parse_date_bound<Tz: TimeZone>(tz: &Tz, raw: &str, edge: BoundEdge) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    let day = parse_date(raw)?;
    match edge {
        BoundEdge::Start => Some(day_start(tz, day)),
        BoundEdge::End => day
            .succ_opt()
            .map(|next| day_start(tz, next) - TimeDelta::nanoseconds(1)),
    }
}

fn day_start<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
        // Midnight can fall in a DST gap.
        .unwrap_or_else(|| midnight.and_utc())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Stable sort over a filtered view. Under `SortKey::Date`, records without a
/// comparable instant keep their position and the dated records are ordered
/// around them.
pub fn sort_expenses(expenses: &mut [&Expense], key: SortKey, order: SortOrder) {
    let directed = |ordering: Ordering| match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    };

    match key {
        SortKey::Date => {
            let slots: Vec<usize> = (0..expenses.len())
                .filter(|&idx| expenses[idx].occurred_at().is_some())
                .collect();
            let mut dated: Vec<&Expense> = slots.iter().map(|&idx| expenses[idx]).collect();
            dated.sort_by(|lhs, rhs| directed(lhs.occurred_at().cmp(&rhs.occurred_at())));
            for (slot, expense) in slots.into_iter().zip(dated) {
                expenses[slot] = expense;
            }
        }
        SortKey::Amount => {
            expenses.sort_by(|lhs, rhs| directed(lhs.total_amount.cmp(&rhs.total_amount)));
        }
        SortKey::Category => {
            expenses.sort_by(|lhs, rhs| {
                directed(lhs.category.as_str().cmp(rhs.category.as_str()))
            });
        }
    }
}
