use crate::{
    error::SyncError,
    ports::{ExpenseStore, RemoteExpenseStore},
};
use fxhash::FxHashSet;
use tripsplit_domain::Expense;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: Vec<Expense>,
    /// Records that existed only locally and were appended after the remote ones.
    pub local_only: usize,
}

/// Remote records win on id collision; local-only records are appended in
/// their local order.
pub fn merge_by_id(remote: Vec<Expense>, local: &[Expense]) -> MergeOutcome {
    let remote_ids: FxHashSet<&str> = remote.iter().map(|expense| expense.id.as_str()).collect();
    let extra: Vec<Expense> = local
        .iter()
        .filter(|expense| !remote_ids.contains(expense.id.as_str()))
        .cloned()
        .collect();

    let local_only = extra.len();
    let mut merged = remote;
    merged.extend(extra);
    MergeOutcome { merged, local_only }
}

/// Moves the expense list between the local store and the shared remote copy.
#[derive(Clone, Copy)]
pub struct SyncService<'a> {
    remote: &'a dyn RemoteExpenseStore,
    local: &'a dyn ExpenseStore,
}

impl<'a> SyncService<'a> {
    pub fn new(remote: &'a dyn RemoteExpenseStore, local: &'a dyn ExpenseStore) -> Self {
        Self { remote, local }
    }

    /// Remote replaces local.
    pub fn pull(&self) -> Result<Vec<Expense>, SyncError> {
        let expenses = self.remote.read_all().map_err(SyncError::RemoteRead)?;
        self.local.save(&expenses).map_err(SyncError::LocalSave)?;
        tracing::info!(count = expenses.len(), "Pulled expenses from remote");
        Ok(expenses)
    }

    /// Local overwrites remote.
    pub fn push(&self, expenses: &[Expense]) -> Result<(), SyncError> {
        self.remote.write_all(expenses).map_err(SyncError::RemoteWrite)?;
        tracing::info!(count = expenses.len(), "Pushed expenses to remote");
        Ok(())
    }

    /// Merges both sides by id. The remote is rewritten only when local-only
    /// records had to be added to it.
    pub fn sync(&self, local: &[Expense]) -> Result<Vec<Expense>, SyncError> {
        let remote = self.remote.read_all().map_err(SyncError::RemoteRead)?;
        let MergeOutcome { merged, local_only } = merge_by_id(remote, local);

        if local_only > 0 {
            self.remote.write_all(&merged).map_err(SyncError::RemoteWrite)?;
        }
        self.local.save(&merged).map_err(SyncError::LocalSave)?;

        tracing::info!(count = merged.len(), local_only, "Synced expenses");
        Ok(merged)
    }
}
