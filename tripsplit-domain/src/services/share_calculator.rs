use crate::model::{Expense, Money, Split};

/// Computes one participant's owed portion of one expense.
pub struct ShareCalculator;

impl ShareCalculator {
    /// Zero for non-participants. Equal splits divide exactly with no
    /// rounding; custom splits return the recorded share or zero, without
    /// re-normalizing against the total.
    pub fn share_of(&self, expense: &Expense, name: &str) -> Money {
        if !expense.split_among.contains(name) {
            return Money::ZERO;
        }

        match &expense.split {
            Split::Equal => expense.total_amount.split_evenly(expense.split_among.len()),
            Split::Custom(shares) => shares.get(name).copied().unwrap_or(Money::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Currency, CustomSplits, ExpenseId, ParticipantList};
    use proptest::prelude::*;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    fn expense(total: Money, split_among: &str, split: Split) -> Expense {
        Expense {
            id: ExpenseId::new("EXP-1"),
            timestamp: None,
            date: "2025-03-14".to_owned(),
            time: String::new(),
            description: "Dinner".to_owned(),
            category: Category::new("Food"),
            notes: String::new(),
            total_amount: total,
            currency: Currency::Thb.into(),
            paid_by: "A".to_owned(),
            split_among: ParticipantList::parse(split_among),
            split,
        }
    }

    fn custom(shares: &[(&str, i64)]) -> Split {
        Split::Custom(
            shares
                .iter()
                .map(|(name, amount)| ((*name).to_owned(), Money::from_i64(*amount)))
                .collect::<CustomSplits>(),
        )
    }

    #[fixture]
    fn calculator() -> ShareCalculator {
        ShareCalculator
    }

    #[rstest]
    #[case::equal_member(Split::Equal, "B", 100)]
    #[case::equal_non_member(Split::Equal, "D", 0)]
    #[case::custom_member(custom(&[("A", 50), ("B", 200), ("C", 50)]), "B", 200)]
    #[case::custom_missing_entry(custom(&[("A", 50)]), "C", 0)]
    #[case::custom_entry_for_non_member(custom(&[("D", 300)]), "D", 0)]
    fn share_of_cases(
        calculator: ShareCalculator,
        #[case] split: Split,
        #[case] name: &str,
        #[case] expected: i64,
    ) {
        let expense = expense(Money::from_i64(300), "A,B,C", split);
        assert_eq!(calculator.share_of(&expense, name), Money::from_i64(expected));
    }

    #[rstest]
    fn custom_share_ignores_total(calculator: ShareCalculator) {
        let expense = expense(Money::from_i64(100), "A,B", custom(&[("A", 10), ("B", 20)]));
        let covered =
            calculator.share_of(&expense, "A") + calculator.share_of(&expense, "B");
        assert_eq!(covered, Money::from_i64(30));
    }

    proptest! {
        #[test]
        fn equal_shares_sum_to_total(
            cents in 0i64..=100_000_000,
            member_count in 1usize..=12,
        ) {
            let names: Vec<String> = (0..member_count).map(|idx| format!("P{idx}")).collect();
            let total = Money::new(cents, 2);
            let expense = expense(total, &names.join(","), Split::Equal);

            let sum: Money = names
                .iter()
                .map(|name| ShareCalculator.share_of(&expense, name))
                .sum();

            prop_assert!((sum - total).abs().as_decimal() < Decimal::new(1, 2));
        }
    }
}
