use thiserror::Error;
use tripsplit_domain::ExpenseId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseBookError {
    #[error("select at least one person to split the expense among")]
    EmptySplit,
    #[error("an expense needs a payer")]
    MissingPayer,
    #[error("no expense with id {0}")]
    UnknownExpense(ExpenseId),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed")]
    Io(#[from] std::io::Error),
    #[error("malformed store contents: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("reading the remote store failed")]
    RemoteRead(#[source] StoreError),
    #[error("writing the remote store failed")]
    RemoteWrite(#[source] StoreError),
    #[error("saving the local store failed")]
    LocalSave(#[source] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn sync_error_names_the_cause_only_once() {
        let err = SyncError::RemoteRead(StoreError::Io(io::Error::other("disk gone")));

        assert_eq!(err.to_string(), "reading the remote store failed");
        let store = err.source().expect("store error");
        assert_eq!(store.to_string(), "store I/O failed");
        assert_eq!(store.source().map(ToString::to_string).as_deref(), Some("disk gone"));
    }
}
