use crate::error::StoreError;
use chrono::{DateTime, Utc};
use tripsplit_domain::{
    Expense,
    services::{BoundEdge, parse_date_bound, resolve_timestamp},
};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Resolves a date/time pair entered in the trip's local time. Invalid
    /// input falls back to `now()`.
    fn resolve(&self, date: &str, time: &str) -> DateTime<Utc>;

    /// Parses a list-filter bound in the same zone `resolve` uses.
    fn date_bound(&self, raw: &str, edge: BoundEdge) -> Option<DateTime<Utc>>;
}

/// Local key-value store holding the whole expense list.
pub trait ExpenseStore: Send + Sync {
    fn load(&self) -> Result<Vec<Expense>, StoreError>;
    fn save(&self, expenses: &[Expense]) -> Result<(), StoreError>;
}

/// Shared remote copy of the expense list; source of truth on sync.
pub trait RemoteExpenseStore: Send + Sync {
    fn read_all(&self) -> Result<Vec<Expense>, StoreError>;
    fn write_all(&self, expenses: &[Expense]) -> Result<(), StoreError>;
}

/// Clock pinned to one instant, resolving local times as UTC.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn resolve(&self, date: &str, time: &str) -> DateTime<Utc> {
        resolve_timestamp(&Utc, date, time, self.0)
    }

    fn date_bound(&self, raw: &str, edge: BoundEdge) -> Option<DateTime<Utc>> {
        parse_date_bound(&Utc, raw, edge)
    }
}
