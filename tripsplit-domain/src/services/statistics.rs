use crate::{
    model::{Category, Currency, Expense, LedgerTotals, Money, PerCurrency, PersonBalance},
    services::ShareCalculator,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryStat {
    pub total: Money,
    pub count: usize,
    /// Share of the currency total, 0-100.
    pub percentage: Decimal,
}

/// Category breakdown for one currency, in first-appearance order.
pub type CategoryTable = IndexMap<Category, CategoryStat>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersonShare {
    pub totals: LedgerTotals,
    pub paid_percentage: Decimal,
    pub owed_percentage: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonStats {
    /// Currency total divided by the number of people (at least one).
    pub averages: PerCurrency<Money>,
    pub people: IndexMap<String, PerCurrency<PersonShare>>,
}

/// Sum of expense totals per ledger currency.
pub fn totals(expenses: &[Expense]) -> PerCurrency<Money> {
    let mut totals = PerCurrency::<Money>::default();
    for expense in expenses {
        if let Some(currency) = expense.currency.supported() {
            *totals.get_mut(currency) += expense.total_amount;
        }
    }
    totals
}

pub fn category_stats(expenses: &[Expense]) -> PerCurrency<CategoryTable> {
    let mut stats = PerCurrency::<CategoryTable>::default();
    for expense in expenses {
        let Some(currency) = expense.currency.supported() else {
            continue;
        };
        let stat = stats
            .get_mut(currency)
            .entry(expense.category.clone())
            .or_default();
        stat.total += expense.total_amount;
        stat.count += 1;
    }

    let totals = totals(expenses);
    for currency in Currency::ALL {
        let total = *totals.get(currency);
        for stat in stats.get_mut(currency).values_mut() {
            stat.percentage = percentage(stat.total, total);
        }
    }
    stats
}

pub fn person_stats<'p, I>(people: I, totals: &PerCurrency<Money>) -> PersonStats
where
    I: IntoIterator<Item = &'p PersonBalance>,
{
    let mut stats = PersonStats::default();
    for person in people {
        let share = PerCurrency::from_fn(|currency| {
            let ledger = *person.ledger(currency);
            let total = *totals.get(currency);
            PersonShare {
                totals: ledger,
                paid_percentage: percentage(ledger.paid, total),
                owed_percentage: percentage(ledger.owed, total),
            }
        });
        stats.people.insert(person.name.clone(), share);
    }

    let head_count = stats.people.len().max(1);
    stats.averages = PerCurrency::from_fn(|currency| totals.get(currency).split_evenly(head_count));
    stats
}

/// What one person consumed per currency: the sum of their shares over the
/// expenses they are split into.
pub fn person_spend(expenses: &[Expense], name: &str) -> PerCurrency<Money> {
    let calculator = ShareCalculator;
    let mut spend = PerCurrency::<Money>::default();
    for expense in expenses {
        if let Some(currency) = expense.currency.supported()
            && expense.split_among.contains(name)
        {
            *spend.get_mut(currency) += calculator.share_of(expense, name);
        }
    }
    spend
}

fn percentage(part: Money, total: Money) -> Decimal {
    if total.as_decimal() <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.as_decimal()
        .checked_div(total.as_decimal())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{CurrencyCode, ExpenseId, ParticipantList, Split},
        services::BalanceAggregator,
    };
    use rust_decimal_macros::dec;

    fn expense(total: i64, currency: &str, category: &str, paid_by: &str) -> Expense {
        Expense {
            id: ExpenseId::new(format!("{paid_by}-{total}")),
            timestamp: None,
            date: String::new(),
            time: String::new(),
            description: String::new(),
            category: Category::new(category),
            notes: String::new(),
            total_amount: Money::from_i64(total),
            currency: CurrencyCode::parse(currency),
            paid_by: paid_by.to_owned(),
            split_among: ParticipantList::parse("A,B"),
            split: Split::Equal,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(300, "THB", "Food", "A"),
            expense(100, "THB", "Transport", "B"),
            expense(100, "THB", "Food", "B"),
            expense(60, "HKD", "Food", "A"),
            expense(999, "USD", "Food", "A"),
        ]
    }

    #[test]
    fn totals_skip_unsupported_currencies() {
        let totals = totals(&sample());
        assert_eq!(totals.thb, Money::from_i64(500));
        assert_eq!(totals.hkd, Money::from_i64(60));
    }

    #[test]
    fn category_percentages_are_per_currency() {
        let stats = category_stats(&sample());

        let food = stats.thb.get(&Category::new("Food")).expect("food");
        assert_eq!(food.total, Money::from_i64(400));
        assert_eq!(food.count, 2);
        assert_eq!(food.percentage, dec!(80));

        let hkd_food = stats.hkd.get(&Category::new("Food")).expect("hkd food");
        assert_eq!(hkd_food.percentage, dec!(100));
        assert_eq!(stats.hkd.len(), 1);
    }

    #[test]
    fn person_stats_follow_balances() {
        let expenses = sample();
        let aggregation = BalanceAggregator::lenient().aggregate(&["A", "B"], &expenses);
        let stats = person_stats(aggregation.people(), &totals(&expenses));

        assert_eq!(stats.averages.thb, Money::from_i64(250));
        let a = stats.people.get("A").expect("A");
        assert_eq!(a.thb.totals.paid, Money::from_i64(300));
        assert_eq!(a.thb.paid_percentage, dec!(60));
        assert_eq!(a.thb.owed_percentage, dec!(50));
        assert_eq!(a.hkd.paid_percentage, dec!(100));
    }

    #[test]
    fn person_spend_sums_shares_only_where_split_in() {
        let mut expenses = sample();
        expenses.push(Expense {
            split_among: ParticipantList::parse("B"),
            ..expense(70, "THB", "Food", "A")
        });

        let spend = person_spend(&expenses, "B");

        assert_eq!(spend.thb, Money::from_i64(320));
        assert_eq!(spend.hkd, Money::from_i64(30));
        assert_eq!(person_spend(&expenses, "Z"), PerCurrency::default());
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let stats = person_stats(std::iter::empty(), &PerCurrency::default());
        assert_eq!(stats.averages.thb, Money::ZERO);
        assert!(stats.people.is_empty());
        assert_eq!(percentage(Money::from_i64(5), Money::ZERO), Decimal::ZERO);
    }
}
