//! Published-spreadsheet CSV export. Header:
//! expense_id,date,time,description,category,total_amount,currency,paid_by,split_among,split_type,custom_splits,notes

use crate::{error::ImportError, records::custom_splits_from_json};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use tripsplit_application::Clock;
use tripsplit_domain::{
    Category, CurrencyCode, Expense, ExpenseId, ParticipantList, Split, SplitKind,
    services::parse_amount,
};

const SNAPSHOT_COLUMNS: usize = 12;

pub struct CsvSnapshotReader<'a> {
    clock: &'a dyn Clock,
}

impl<'a> CsvSnapshotReader<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// Reads every well-formed row. Short rows and rows with an unreadable
    /// share table are skipped; only I/O failures abort the import.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Expense>, ImportError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut expenses = Vec::new();
        let mut skipped = 0usize;

        for (index, record) in rdr.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(error = %err, "Unreadable CSV row, skipping");
                    skipped += 1;
                    continue;
                }
            };
            // Data lines are numbered from 1, after the header.
            let line = record
                .position()
                .map(|position| position.line().saturating_sub(1))
                .unwrap_or(index as u64 + 1);

            if record.iter().all(str::is_empty) {
                continue;
            }
            if record.len() < SNAPSHOT_COLUMNS {
                tracing::warn!(
                    line,
                    fields = record.len(),
                    "Insufficient fields in CSV row, skipping"
                );
                skipped += 1;
                continue;
            }

            match self.decode_row(&record, line) {
                Some(expense) => expenses.push(expense),
                None => skipped += 1,
            }
        }

        tracing::info!(count = expenses.len(), skipped, "Loaded expenses from CSV snapshot");
        Ok(expenses)
    }

    fn decode_row(&self, record: &StringRecord, line: u64) -> Option<Expense> {
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let or_default = |idx: usize, default: &str| -> String {
            let value = field(idx);
            let chosen = if value.is_empty() { default } else { value };
            chosen.to_owned()
        };

        let now = self.clock.now();
        let kind = SplitKind::parse(field(9));
        let custom_splits = match (kind, field(10)) {
            (SplitKind::Custom, raw) if !raw.is_empty() => match custom_splits_from_json(raw) {
                Ok(shares) => Some(shares),
                Err(err) => {
                    tracing::warn!(line, error = %err, "Invalid custom splits JSON, skipping row");
                    return None;
                }
            },
            _ => None,
        };

        let id = or_default(0, &format!("exp_{}_{line}", now.timestamp_millis()));
        let date = or_default(1, &now.date_naive().format("%Y-%m-%d").to_string());
        let time = field(2).to_owned();

        Some(Expense {
            id: ExpenseId::new(id),
            timestamp: Some(self.clock.resolve(&date, &time)),
            date,
            time,
            description: field(3).to_owned(),
            category: Category::new(field(4)),
            notes: field(11).to_owned(),
            total_amount: parse_amount(field(5)),
            currency: CurrencyCode::parse(&or_default(6, "THB")),
            paid_by: field(7).to_owned(),
            split_among: ParticipantList::parse(field(8)),
            split: Split::from_parts(kind, custom_splits),
        })
    }
}
