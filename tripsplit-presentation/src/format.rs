use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use tripsplit_domain::{Money, ParticipantList};

const NAMES_PER_ROW: usize = 3;

/// `1,234.56 THB`: two decimals, thousands separators.
pub fn format_currency(amount: Money, currency: impl Display) -> String {
    format!("{} {currency}", group_thousands(amount.round_dp(2).as_decimal()))
}

/// Like [`format_currency`] with an explicit `+` on credits.
pub fn format_balance(amount: Money, currency: impl Display) -> String {
    let sign = if amount.round_dp(2).as_decimal() > Decimal::ZERO {
        "+"
    } else {
        ""
    };
    format!("{sign}{}", format_currency(amount, currency))
}

/// One decimal place, e.g. `12.3%`.
pub fn format_percentage(percentage: Decimal) -> String {
    let rounded =
        percentage.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

/// Names joined with `, `, three per line.
pub fn format_split_among(participants: &ParticipantList) -> String {
    participants
        .members()
        .chunks(NAMES_PER_ROW)
        .map(|row| row.join(", "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn group_thousands(value: Decimal) -> String {
    let text = format!("{:.2}", value.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}
