use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SHEET_NAME: &str = "Expenses";

/// Trip-wide options, usually read from `tripsplit.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TripConfig {
    /// Directory of trip members; seeds zero balances for people who never
    /// appear on an expense.
    pub participants: Vec<String>,
    pub google_sheets_csv_url: Option<String>,
    pub google_sheets_id: Option<String>,
    pub google_sheets_name: String,
    pub local_store_path: Option<PathBuf>,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            google_sheets_csv_url: None,
            google_sheets_id: None,
            google_sheets_name: DEFAULT_SHEET_NAME.to_owned(),
            local_store_path: None,
        }
    }
}

/// Form-style input for a new expense. Amount and currency stay raw text and
/// are coerced leniently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewExpense {
    pub date: String,
    pub time: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub currency: String,
    pub paid_by: String,
    pub split_among: Vec<String>,
    pub notes: String,
}
