use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Exact division into `parts` equal shares. Zero parts yields zero.
    pub fn split_evenly(self, parts: usize) -> Self {
        if parts == 0 {
            return Self::ZERO;
        }
        self.0
            .checked_div(Decimal::from(parts))
            .map_or(Self::ZERO, Self)
    }

    pub fn round_dp(self, dp: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Currencies with their own ledger. Ledgers are never combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Currency {
    Thb,
    Hkd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Thb, Currency::Hkd];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Thb => "THB",
            Currency::Hkd => "HKD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "THB" => Some(Currency::Thb),
            "HKD" => Some(Currency::Hkd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Currency as recorded on an expense. Anything other than THB/HKD is kept
/// verbatim and is invisible to every ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurrencyCode {
    Supported(Currency),
    Unsupported(String),
}

impl CurrencyCode {
    /// Exact match on `THB`/`HKD`; callers normalize whitespace at the
    /// record boundary.
    pub fn parse(code: &str) -> Self {
        match Currency::from_code(code) {
            Some(currency) => CurrencyCode::Supported(currency),
            None => CurrencyCode::Unsupported(code.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CurrencyCode::Supported(currency) => currency.code(),
            CurrencyCode::Unsupported(code) => code,
        }
    }

    pub fn supported(&self) -> Option<Currency> {
        match self {
            CurrencyCode::Supported(currency) => Some(*currency),
            CurrencyCode::Unsupported(_) => None,
        }
    }
}

impl From<Currency> for CurrencyCode {
    fn from(currency: Currency) -> Self {
        CurrencyCode::Supported(currency)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per ledger currency.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerCurrency<T> {
    pub thb: T,
    pub hkd: T,
}

impl<T> PerCurrency<T> {
    pub fn from_fn(mut f: impl FnMut(Currency) -> T) -> Self {
        Self {
            thb: f(Currency::Thb),
            hkd: f(Currency::Hkd),
        }
    }

    pub fn get(&self, currency: Currency) -> &T {
        match currency {
            Currency::Thb => &self.thb,
            Currency::Hkd => &self.hkd,
        }
    }

    pub fn get_mut(&mut self, currency: Currency) -> &mut T {
        match currency {
            Currency::Thb => &mut self.thb,
            Currency::Hkd => &mut self.hkd,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, &T)> {
        Currency::ALL
            .into_iter()
            .map(move |currency| (currency, self.get(currency)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Open-set category label; blank input falls back to "Other".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    pub const OTHER: &'static str = "Other";

    pub fn new(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            Self(Self::OTHER.to_owned())
        } else {
            Self(label.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(Self::OTHER.to_owned())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty participant names in first-seen order without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantList(Vec<String>);

impl ParticipantList {
    /// Parses comma-joined text such as `"A, B,C"`.
    pub fn parse(joined: &str) -> Self {
        Self::from_names(joined.split(','))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut members: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || members.iter().any(|existing| existing == name) {
                continue;
            }
            members.push(name.to_owned());
        }
        Self(members)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|member| member == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn members(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

/// Absolute share per participant, in the expense's currency.
pub type CustomSplits = IndexMap<String, Money>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Split {
    #[default]
    Equal,
    Custom(CustomSplits),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitKind {
    Equal,
    Custom,
}

impl SplitKind {
    /// Only the exact label `Custom` selects custom splitting.
    pub fn parse(label: &str) -> Self {
        if label.trim() == "Custom" {
            SplitKind::Custom
        } else {
            SplitKind::Equal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SplitKind::Equal => "Equal",
            SplitKind::Custom => "Custom",
        }
    }
}

impl Split {
    pub fn kind(&self) -> SplitKind {
        match self {
            Split::Equal => SplitKind::Equal,
            Split::Custom(_) => SplitKind::Custom,
        }
    }

    pub fn custom_splits(&self) -> Option<&CustomSplits> {
        match self {
            Split::Equal => None,
            Split::Custom(shares) => Some(shares),
        }
    }

    /// A `Custom` label without a share table splits equally.
    pub fn from_parts(kind: SplitKind, custom_splits: Option<CustomSplits>) -> Self {
        match (kind, custom_splits) {
            (SplitKind::Custom, Some(shares)) => Split::Custom(shares),
            _ => Split::Equal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    /// Resolved instant; `None` only for records that were stored without one.
    pub timestamp: Option<DateTime<Utc>>,
    /// Raw `YYYY-MM-DD` text kept for display and as the ordering fallback.
    pub date: String,
    pub time: String,
    pub description: String,
    pub category: Category,
    pub notes: String,
    pub total_amount: Money,
    pub currency: CurrencyCode,
    pub paid_by: String,
    pub split_among: ParticipantList,
    pub split: Split,
}

impl Expense {
    /// The instant used for ordering and date filters: the timestamp, else
    /// the `date` field at UTC midnight, else nothing comparable.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.or_else(|| {
            NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
                .ok()
                .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
        })
    }

    /// Payer or split member.
    pub fn involves(&self, name: &str) -> bool {
        self.paid_by == name || self.split_among.contains(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub paid: Money,
    pub owed: Money,
    pub balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonBalance {
    pub name: String,
    pub ledgers: PerCurrency<LedgerTotals>,
}

impl PersonBalance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ledgers: PerCurrency::default(),
        }
    }

    pub fn ledger(&self, currency: Currency) -> &LedgerTotals {
        self.ledgers.get(currency)
    }

    pub fn balance(&self, currency: Currency) -> Money {
        self.ledgers.get(currency).balance
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: Money,
    pub currency: Currency,
}
