use rust_decimal::Decimal;

/// Net position of one person in a single ledger.
/// Positive: others owe this person. Negative: this person owes others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonBalance<'a> {
    pub name: &'a str,
    pub balance: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payment<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Decimal,
}
