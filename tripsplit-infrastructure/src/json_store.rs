use crate::{error::malformed, records::ExpenseRecord};
use std::{fs, io::ErrorKind, path::PathBuf};
use tripsplit_application::{Clock, ExpenseStore, StoreError};
use tripsplit_domain::Expense;

/// Local expense list kept as one JSON array file.
pub struct JsonExpenseStore<C> {
    path: PathBuf,
    clock: C,
}

impl<C: Clock> JsonExpenseStore<C> {
    pub fn new(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }
}

impl<C: Clock> ExpenseStore for JsonExpenseStore<C> {
    /// A missing file is an empty list. Records stored without a timestamp
    /// get one from their date and time.
    fn load(&self) -> Result<Vec<Expense>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<ExpenseRecord> =
            serde_json::from_str(&raw).map_err(|err| malformed("parsing expense store", err))?;

        let mut repaired = 0usize;
        let expenses: Vec<Expense> = records
            .into_iter()
            .map(|record| {
                record.into_expense(|date, time| {
                    repaired += 1;
                    self.clock.resolve(date, time)
                })
            })
            .collect();

        if repaired > 0 {
            tracing::info!(repaired, "Rebuilt missing expense timestamps");
        }
        tracing::debug!(count = expenses.len(), path = %self.path.display(), "Loaded local expenses");
        Ok(expenses)
    }

    fn save(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|err| malformed("serializing expense store", err))?;
        fs::write(&self.path, json)?;
        tracing::debug!(count = expenses.len(), path = %self.path.display(), "Saved local expenses");
        Ok(())
    }
}
