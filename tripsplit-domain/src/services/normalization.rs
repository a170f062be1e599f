//! Lenient coercion of raw record fields. Nothing here fails: malformed input
//! degrades to a default value and is logged.

use crate::model::Money;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a non-negative amount. Unparseable text and negative values become zero.
pub fn parse_amount(raw: &str) -> Money {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Money::ZERO;
    }

    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    match parsed {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            tracing::warn!(raw = trimmed, "Negative amount coerced to zero");
            Money::ZERO
        }
        Ok(value) => Money::from_decimal(value),
        Err(_) => {
            tracing::warn!(raw = trimmed, "Unparseable amount coerced to zero");
            Money::ZERO
        }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Resolves the instant an expense occurred.
///
/// Valid date and time give that wall-clock instant in `tz`; a valid date with
/// a missing or invalid time gives midnight in `tz`; an invalid or empty date
/// gives `created_at`.
pub fn resolve_timestamp<Tz: TimeZone>(
    tz: &Tz,
    date: &str,
    time: &str,
    created_at: DateTime<Utc>,
) -> DateTime<Utc> {
    let Some(day) = parse_date(date) else {
        if !date.trim().is_empty() {
            tracing::debug!(date, "Invalid expense date, using creation instant");
        }
        return created_at;
    };

    parse_time_of_day(time)
        .and_then(|time_of_day| local_instant(tz, day.and_time(time_of_day)))
        .or_else(|| local_instant(tz, day.and_time(NaiveTime::MIN)))
        .unwrap_or(created_at)
}

fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::integer("300", dec!(300))]
    #[case::decimal(" 12.50 ", dec!(12.50))]
    #[case::scientific("1e3", dec!(1000))]
    #[case::garbage("abc", dec!(0))]
    #[case::empty("", dec!(0))]
    #[case::negative("-5", dec!(0))]
    fn parse_amount_absorbs_bad_input(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw), Money::from_decimal(expected));
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid instant")
    }

    #[rstest]
    #[case::date_and_time("2025-03-14", "18:30", utc(2025, 3, 14, 18, 30))]
    #[case::seconds("2025-03-14", "18:30:15", utc(2025, 3, 14, 18, 30) + chrono::Duration::seconds(15))]
    #[case::missing_time("2025-03-14", "", utc(2025, 3, 14, 0, 0))]
    #[case::invalid_time("2025-03-14", "25:99", utc(2025, 3, 14, 0, 0))]
    #[case::invalid_date("14/03/2025", "18:30", utc(2020, 1, 1, 9, 0))]
    #[case::empty_date("", "", utc(2020, 1, 1, 9, 0))]
    fn resolve_timestamp_precedence(
        #[case] date: &str,
        #[case] time: &str,
        #[case] expected: DateTime<Utc>,
    ) {
        let created_at = utc(2020, 1, 1, 9, 0);
        assert_eq!(resolve_timestamp(&Utc, date, time, created_at), expected);
    }

    #[test]
    fn resolve_timestamp_uses_local_midnight() {
        let bangkok = FixedOffset::east_opt(7 * 3600).expect("offset");
        let resolved = resolve_timestamp(&bangkok, "2025-03-14", "", utc(2020, 1, 1, 0, 0));
        assert_eq!(resolved, utc(2025, 3, 13, 17, 0));
    }
}
