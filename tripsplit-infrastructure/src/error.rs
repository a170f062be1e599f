use thiserror::Error;
use tripsplit_application::StoreError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("reading the snapshot failed")]
    Io(#[from] std::io::Error),
    #[error("decoding the CSV snapshot failed")]
    Csv(#[from] csv::Error),
}

pub(crate) fn malformed(context: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::Malformed(format!("{context}: {err}"))
}

/// Keeps I/O failures distinguishable from malformed contents.
pub(crate) fn from_csv(context: &str, err: csv::Error) -> StoreError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::Io(io),
            other => malformed(context, format!("{other:?}")),
        }
    } else {
        malformed(context, err)
    }
}
