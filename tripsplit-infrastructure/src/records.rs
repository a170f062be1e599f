//! Serialized expense shape shared by the local JSON store and the sheet
//! codec. Field names follow the stored format (`expense_id`, `paid_by`, ...).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tripsplit_domain::{
    Category, CurrencyCode, CustomSplits, Expense, ExpenseId, Money, ParticipantList, Split,
    SplitKind, services::parse_amount,
};

/// `split_among` is stored either comma-joined or as a list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SplitAmong {
    Joined(String),
    Names(Vec<String>),
}

impl Default for SplitAmong {
    fn default() -> Self {
        SplitAmong::Joined(String::new())
    }
}

impl SplitAmong {
    pub fn to_participants(&self) -> ParticipantList {
        match self {
            SplitAmong::Joined(joined) => ParticipantList::parse(joined),
            SplitAmong::Names(names) => ParticipantList::from_names(names),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExpenseRecord {
    pub expense_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub total_amount: Value,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub paid_by: String,
    #[serde(default)]
    pub split_among: SplitAmong,
    #[serde(default)]
    pub split_type: String,
    #[serde(default)]
    pub custom_splits: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub notes: String,
}

impl ExpenseRecord {
    /// Converts to the domain model. A missing or unreadable timestamp is
    /// rebuilt from the date and time fields through `resolve`.
    pub fn into_expense(self, resolve: impl FnOnce(&str, &str) -> DateTime<Utc>) -> Expense {
        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|instant| instant.with_timezone(&Utc))
            .unwrap_or_else(|| resolve(&self.date, &self.time));

        let currency = if self.currency.trim().is_empty() {
            CurrencyCode::parse("THB")
        } else {
            CurrencyCode::parse(self.currency.trim())
        };
        let custom_splits = self.custom_splits.as_ref().map(custom_splits_from_values);

        Expense {
            id: ExpenseId::new(self.expense_id),
            timestamp: Some(timestamp),
            date: self.date,
            time: self.time,
            description: self.description,
            category: Category::new(&self.category),
            notes: self.notes,
            total_amount: amount_from_value(&self.total_amount),
            currency,
            paid_by: self.paid_by.trim().to_owned(),
            split_among: self.split_among.to_participants(),
            split: Split::from_parts(SplitKind::parse(&self.split_type), custom_splits),
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            expense_id: expense.id.as_str().to_owned(),
            timestamp: expense.timestamp.map(|instant| instant.to_rfc3339()),
            date: expense.date.clone(),
            time: expense.time.clone(),
            description: expense.description.clone(),
            category: expense.category.as_str().to_owned(),
            total_amount: amount_to_value(expense.total_amount),
            currency: expense.currency.as_str().to_owned(),
            paid_by: expense.paid_by.clone(),
            split_among: SplitAmong::Names(expense.split_among.members().to_vec()),
            split_type: expense.split.kind().as_str().to_owned(),
            custom_splits: expense.split.custom_splits().map(|shares| {
                shares
                    .iter()
                    .map(|(name, amount)| (name.clone(), amount_to_value(*amount)))
                    .collect()
            }),
            notes: expense.notes.clone(),
        }
    }
}

/// Numbers and numeric strings are accepted; anything else is zero.
pub fn amount_from_value(value: &Value) -> Money {
    match value {
        Value::Number(number) => parse_amount(&number.to_string()),
        Value::String(raw) => parse_amount(raw),
        Value::Null => Money::ZERO,
        other => parse_amount(&other.to_string()),
    }
}

pub fn amount_to_value(amount: Money) -> Value {
    let text = amount.to_string();
    text.parse::<Number>()
        .map(Value::Number)
        .unwrap_or(Value::String(text))
}

pub fn custom_splits_from_values(values: &IndexMap<String, Value>) -> CustomSplits {
    values
        .iter()
        .map(|(name, value)| (name.trim().to_owned(), amount_from_value(value)))
        .collect()
}

/// JSON object text for a share table, as stored in spreadsheet cells.
pub fn custom_splits_to_json(shares: &CustomSplits) -> String {
    let object: serde_json::Map<String, Value> = shares
        .iter()
        .map(|(name, amount)| (name.clone(), amount_to_value(*amount)))
        .collect();
    Value::Object(object).to_string()
}

/// Parses a spreadsheet cell holding a share table.
pub fn custom_splits_from_json(raw: &str) -> Result<CustomSplits, serde_json::Error> {
    let values: IndexMap<String, Value> = serde_json::from_str(raw)?;
    Ok(custom_splits_from_values(&values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use tripsplit_domain::Currency;

    fn fallback() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn record(json: Value) -> ExpenseRecord {
        serde_json::from_value(json).expect("record")
    }

    #[rstest]
    #[case::number(serde_json::json!(12.5), Money::new(125, 1))]
    #[case::numeric_string(serde_json::json!("300"), Money::from_i64(300))]
    #[case::garbage(serde_json::json!("abc"), Money::ZERO)]
    #[case::null(Value::Null, Money::ZERO)]
    #[case::negative(serde_json::json!(-4), Money::ZERO)]
    fn amounts_are_lenient(#[case] value: Value, #[case] expected: Money) {
        assert_eq!(amount_from_value(&value), expected);
    }

    #[test]
    fn stored_record_with_list_and_custom_splits() {
        let expense = record(serde_json::json!({
            "expense_id": "EXP-1",
            "timestamp": "2025-03-14T05:00:00.000Z",
            "date": "2025-03-14",
            "total_amount": 300,
            "currency": "THB",
            "paid_by": "Ann",
            "split_among": ["Ann", "Ben"],
            "split_type": "Custom",
            "custom_splits": {"Ann": 100, "Ben": "200"}
        }))
        .into_expense(|_, _| fallback());

        assert_eq!(expense.timestamp, Utc.with_ymd_and_hms(2025, 3, 14, 5, 0, 0).single());
        assert_eq!(expense.split_among.members(), ["Ann", "Ben"]);
        let shares = expense.split.custom_splits().expect("custom");
        assert_eq!(shares.get("Ben"), Some(&Money::from_i64(200)));
        assert_eq!(expense.category.as_str(), Category::OTHER);
    }

    #[test]
    fn missing_timestamp_is_rebuilt_and_defaults_apply() {
        let expense = record(serde_json::json!({
            "expense_id": "EXP-2",
            "date": "2025-03-14",
            "time": "19:30",
            "total_amount": "80",
            "paid_by": "Ben",
            "split_among": "Ann, Ben",
            "split_type": "Custom"
        }))
        .into_expense(|date, time| {
            assert_eq!((date, time), ("2025-03-14", "19:30"));
            fallback()
        });

        assert_eq!(expense.timestamp, Some(fallback()));
        assert_eq!(expense.currency, CurrencyCode::Supported(Currency::Thb));
        assert_eq!(expense.split, Split::Equal);
        assert_eq!(expense.split_among.members(), ["Ann", "Ben"]);
    }

    #[test]
    fn serialized_record_keeps_stored_field_names() {
        let expense = record(serde_json::json!({
            "expense_id": "EXP-3",
            "timestamp": "2025-03-14T05:00:00+00:00",
            "total_amount": 45.5,
            "currency": "HKD",
            "paid_by": "Cat",
            "split_among": ["Cat"]
        }))
        .into_expense(|_, _| fallback());

        let value = serde_json::to_value(ExpenseRecord::from(&expense)).expect("json");

        assert_eq!(value["expense_id"], "EXP-3");
        assert_eq!(value["total_amount"], serde_json::json!(45.5));
        assert_eq!(value["split_among"], serde_json::json!(["Cat"]));
        assert_eq!(value["split_type"], "Equal");
        assert_eq!(value["custom_splits"], Value::Null);
    }

    #[test]
    fn stored_whitespace_is_normalized_on_load() {
        let expense = record(serde_json::json!({
            "expense_id": "EXP-4",
            "date": "2025-03-14",
            "total_amount": "80",
            "currency": " HKD ",
            "paid_by": " Cat ",
            "split_among": "Cat, Dan"
        }))
        .into_expense(|_, _| fallback());

        assert_eq!(expense.currency, CurrencyCode::Supported(Currency::Hkd));
        assert_eq!(expense.paid_by, "Cat");
        assert!(expense.involves("Cat"));
    }

    #[test]
    fn share_table_json_cell() {
        let shares = custom_splits_from_json(r#"{"Ann": 100.5, "Ben": 50}"#).expect("json");
        assert_eq!(shares.get("Ann"), Some(&Money::new(1005, 1)));
        assert_eq!(custom_splits_to_json(&shares), r#"{"Ann":100.5,"Ben":50}"#);
        assert!(custom_splits_from_json("{not json").is_err());
    }
}
