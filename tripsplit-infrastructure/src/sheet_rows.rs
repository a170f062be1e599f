//! Spreadsheet layout of the shared expense list: one header row, then data
//! in columns A..K. The sheet has no time column.

use crate::{
    error::from_csv,
    records::{custom_splits_from_json, custom_splits_to_json},
};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tripsplit_application::{Clock, RemoteExpenseStore, StoreError};
use tripsplit_domain::{
    Category, CurrencyCode, Expense, ExpenseId, ParticipantList, Split, SplitKind,
    services::{parse_amount, resolve_timestamp},
};

pub const SHEET_HEADER: [&str; 11] = [
    "expense_id",
    "date",
    "description",
    "category",
    "total_amount",
    "currency",
    "paid_by",
    "split_among",
    "split_type",
    "custom_splits",
    "notes",
];

/// Decodes data rows (header excluded). Trailing empty cells may be missing.
/// Dates are read as UTC midnight; rows whose share table is not valid JSON
/// are skipped.
pub fn decode_sheet_rows(rows: &[Vec<String>], now: DateTime<Utc>) -> Vec<Expense> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
        .filter_map(|(idx, row)| decode_row(row, idx + 2, now))
        .collect()
}

fn decode_row(row: &[String], sheet_row: usize, now: DateTime<Utc>) -> Option<Expense> {
    let cell = |idx: usize| row.get(idx).map(|value| value.trim()).unwrap_or_default();
    let or_default = |idx: usize, default: String| {
        let value = cell(idx);
        if value.is_empty() { default } else { value.to_owned() }
    };

    let custom_splits = match cell(9) {
        "" => None,
        raw => match custom_splits_from_json(raw) {
            Ok(shares) => Some(shares),
            Err(err) => {
                tracing::warn!(sheet_row, error = %err, "Invalid custom splits JSON, skipping row");
                return None;
            }
        },
    };

    let date = or_default(1, now.date_naive().format("%Y-%m-%d").to_string());
    Some(Expense {
        id: ExpenseId::new(or_default(0, format!("exp_{}_{sheet_row}", now.timestamp_millis()))),
        timestamp: Some(resolve_timestamp(&Utc, &date, "", now)),
        date,
        time: String::new(),
        description: cell(2).to_owned(),
        category: Category::new(cell(3)),
        notes: cell(10).to_owned(),
        total_amount: parse_amount(cell(4)),
        currency: CurrencyCode::parse(&or_default(5, "THB".to_owned())),
        paid_by: cell(6).to_owned(),
        split_among: ParticipantList::parse(cell(7)),
        split: Split::from_parts(SplitKind::parse(cell(8)), custom_splits),
    })
}

pub fn encode_sheet_rows(expenses: &[Expense]) -> Vec<Vec<String>> {
    expenses
        .iter()
        .map(|expense| {
            vec![
                expense.id.to_string(),
                expense.date.clone(),
                expense.description.clone(),
                expense.category.to_string(),
                expense.total_amount.to_string(),
                expense.currency.to_string(),
                expense.paid_by.clone(),
                expense.split_among.joined(),
                expense.split.kind().as_str().to_owned(),
                expense
                    .split
                    .custom_splits()
                    .map(custom_splits_to_json)
                    .unwrap_or_default(),
                expense.notes.clone(),
            ]
        })
        .collect()
}

/// Remote store kept as a CSV file in sheet layout. A missing file reads as
/// an empty sheet.
pub struct SheetFileStore<C> {
    path: PathBuf,
    clock: C,
}

impl<C: Clock> SheetFileStore<C> {
    pub fn new(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| from_csv("opening sheet", err))?;

        rdr.records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_owned).collect())
                    .map_err(|err| from_csv("reading sheet row", err))
            })
            .collect()
    }
}

impl<C: Clock> RemoteExpenseStore for SheetFileStore<C> {
    fn read_all(&self) -> Result<Vec<Expense>, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Sheet file missing, treating as empty");
            return Ok(Vec::new());
        }
        let rows = self.read_rows()?;
        let expenses = decode_sheet_rows(&rows, self.clock.now());
        tracing::info!(count = expenses.len(), path = %self.path.display(), "Read expenses from sheet");
        Ok(expenses)
    }

    fn write_all(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut wtr = WriterBuilder::new()
            .from_path(&self.path)
            .map_err(|err| from_csv("creating sheet", err))?;
        wtr.write_record(SHEET_HEADER)
            .map_err(|err| from_csv("writing sheet header", err))?;
        for row in encode_sheet_rows(expenses) {
            wtr.write_record(&row)
                .map_err(|err| from_csv("writing sheet row", err))?;
        }
        wtr.flush()?;
        tracing::info!(count = expenses.len(), path = %self.path.display(), "Wrote expenses to sheet");
        Ok(())
    }
}
