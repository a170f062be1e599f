use crate::{
    model::{Currency, Expense, ExpenseId, Money, PersonBalance},
    services::{LenientSplits, ShareCalculator, SplitValidator, SplitViolation},
};
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedExpense {
    pub id: ExpenseId,
    pub violation: SplitViolation,
}

/// Result of folding an expense list into per-person ledgers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Configured participants first, then first appearance across expenses.
    pub balances: IndexMap<String, PersonBalance>,
    /// Expenses recorded in a currency without a ledger.
    pub unsupported: Vec<ExpenseId>,
    /// Expenses the split validator refused.
    pub rejected: Vec<RejectedExpense>,
}

impl Aggregation {
    pub fn people(&self) -> impl Iterator<Item = &PersonBalance> + Clone {
        self.balances.values()
    }

    pub fn get(&self, name: &str) -> Option<&PersonBalance> {
        self.balances.get(name)
    }

    pub fn balance_sum(&self, currency: Currency) -> Money {
        self.people().map(|person| person.balance(currency)).sum()
    }
}

/// Folds expenses into paid/owed/balance totals per person and currency.
pub struct BalanceAggregator<'a> {
    validator: &'a dyn SplitValidator,
    calculator: ShareCalculator,
}

impl BalanceAggregator<'static> {
    pub fn lenient() -> Self {
        Self::new(&LenientSplits)
    }
}

impl<'a> BalanceAggregator<'a> {
    pub fn new(validator: &'a dyn SplitValidator) -> Self {
        Self {
            validator,
            calculator: ShareCalculator,
        }
    }

    pub fn aggregate<S: AsRef<str>>(&self, participants: &[S], expenses: &[Expense]) -> Aggregation {
        let mut aggregation = Aggregation {
            balances: Self::seed_people(participants, expenses),
            ..Aggregation::default()
        };

        for expense in expenses {
            let Some(currency) = expense.currency.supported() else {
                tracing::debug!(
                    expense_id = %expense.id,
                    currency = expense.currency.as_str(),
                    "Expense excluded from ledgers: unsupported currency"
                );
                aggregation.unsupported.push(expense.id.clone());
                continue;
            };

            if let Err(violation) = self.validator.validate(expense) {
                tracing::warn!(
                    expense_id = %expense.id,
                    %violation,
                    "Expense excluded from ledgers: split rejected"
                );
                aggregation.rejected.push(RejectedExpense {
                    id: expense.id.clone(),
                    violation,
                });
                continue;
            }

            if let Some(payer) = aggregation.balances.get_mut(expense.paid_by.as_str()) {
                payer.ledgers.get_mut(currency).paid += expense.total_amount;
            }

            for name in expense.split_among.iter() {
                let share = self.calculator.share_of(expense, name);
                if let Some(person) = aggregation.balances.get_mut(name) {
                    person.ledgers.get_mut(currency).owed += share;
                }
            }
        }

        for person in aggregation.balances.values_mut() {
            for currency in Currency::ALL {
                let ledger = person.ledgers.get_mut(currency);
                ledger.balance = ledger.paid - ledger.owed;
            }
        }

        aggregation
    }

    fn seed_people<S: AsRef<str>>(
        participants: &[S],
        expenses: &[Expense],
    ) -> IndexMap<String, PersonBalance> {
        let mut balances = IndexMap::new();
        let mut seed = |name: &str| {
            if !name.trim().is_empty() && !balances.contains_key(name) {
                balances.insert(name.to_owned(), PersonBalance::new(name));
            }
        };

        for name in participants {
            seed(name.as_ref().trim());
        }
        for expense in expenses {
            if expense.paid_by.trim().is_empty() {
                tracing::warn!(expense_id = %expense.id, "Expense has no payer");
            }
            seed(&expense.paid_by);
            for name in expense.split_among.iter() {
                seed(name);
            }
        }

        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Category, CurrencyCode, CustomSplits, ParticipantList, Split},
        services::CoveringSplits,
    };
    use rstest::{fixture, rstest};

    fn expense(id: &str, total: i64, currency: &str, paid_by: &str, split_among: &str) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            timestamp: None,
            date: "2025-03-14".to_owned(),
            time: String::new(),
            description: String::new(),
            category: Category::default(),
            notes: String::new(),
            total_amount: Money::from_i64(total),
            currency: CurrencyCode::parse(currency),
            paid_by: paid_by.to_owned(),
            split_among: ParticipantList::parse(split_among),
            split: Split::Equal,
        }
    }

    fn custom(mut expense: Expense, shares: &[(&str, i64)]) -> Expense {
        expense.split = Split::Custom(
            shares
                .iter()
                .map(|(name, amount)| ((*name).to_owned(), Money::from_i64(*amount)))
                .collect::<CustomSplits>(),
        );
        expense
    }

    #[fixture]
    fn aggregator() -> BalanceAggregator<'static> {
        BalanceAggregator::lenient()
    }

    const NO_PARTICIPANTS: [&str; 0] = [];

    #[rstest]
    fn single_payer_three_way_split(aggregator: BalanceAggregator<'static>) {
        let expenses = [expense("e1", 300, "THB", "A", "A,B,C")];

        let aggregation = aggregator.aggregate(&NO_PARTICIPANTS, &expenses);

        let a = aggregation.get("A").expect("A");
        assert_eq!(a.ledger(Currency::Thb).paid, Money::from_i64(300));
        assert_eq!(a.ledger(Currency::Thb).owed, Money::from_i64(100));
        assert_eq!(a.balance(Currency::Thb), Money::from_i64(200));
        assert_eq!(aggregation.get("B").expect("B").balance(Currency::Thb), Money::from_i64(-100));
        assert_eq!(aggregation.get("C").expect("C").balance(Currency::Thb), Money::from_i64(-100));
        assert_eq!(a.balance(Currency::Hkd), Money::ZERO);
    }

    #[rstest]
    fn currencies_are_independent(aggregator: BalanceAggregator<'static>) {
        let expenses = [
            expense("e1", 300, "THB", "A", "A,B"),
            expense("e2", 80, "HKD", "B", "A,B"),
        ];

        let aggregation = aggregator.aggregate(&NO_PARTICIPANTS, &expenses);

        let a = aggregation.get("A").expect("A");
        assert_eq!(a.balance(Currency::Thb), Money::from_i64(150));
        assert_eq!(a.balance(Currency::Hkd), Money::from_i64(-40));
        assert_eq!(aggregation.balance_sum(Currency::Thb), Money::ZERO);
        assert_eq!(aggregation.balance_sum(Currency::Hkd), Money::ZERO);
    }

    #[rstest]
    fn uncovered_custom_split_leaves_visible_imbalance(aggregator: BalanceAggregator<'static>) {
        let expenses = [custom(expense("e1", 300, "THB", "A", "A,B"), &[("A", 100), ("B", 100)])];

        let aggregation = aggregator.aggregate(&NO_PARTICIPANTS, &expenses);

        assert_eq!(aggregation.get("A").expect("A").balance(Currency::Thb), Money::from_i64(200));
        assert_eq!(aggregation.get("B").expect("B").balance(Currency::Thb), Money::from_i64(-100));
        assert_eq!(aggregation.balance_sum(Currency::Thb), Money::from_i64(100));
        assert!(aggregation.rejected.is_empty());
    }

    #[rstest]
    fn unsupported_currency_is_reported_not_counted(aggregator: BalanceAggregator<'static>) {
        let expenses = [
            expense("e1", 90, "USD", "A", "A,B,C"),
            expense("e2", 10, "THB", "B", "B"),
        ];

        let aggregation = aggregator.aggregate(&NO_PARTICIPANTS, &expenses);

        assert_eq!(aggregation.unsupported, vec![ExpenseId::new("e1")]);
        assert_eq!(
            aggregation.balances.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        for person in aggregation.people() {
            for currency in Currency::ALL {
                assert_eq!(person.balance(currency), Money::ZERO);
            }
        }
        assert_eq!(aggregation.get("B").expect("B").ledger(Currency::Thb).paid, Money::from_i64(10));
    }

    #[test]
    fn configured_participants_are_seeded_first() {
        let expenses = [expense("e1", 50, "HKD", "B", "B,C")];

        let aggregation = BalanceAggregator::lenient().aggregate(&["Z", "B"], &expenses);

        assert_eq!(
            aggregation.balances.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Z", "B", "C"]
        );
        assert_eq!(aggregation.get("Z").expect("Z").balance(Currency::Hkd), Money::ZERO);
    }

    #[test]
    fn covering_validator_rejects_through_the_hook() {
        let validator = CoveringSplits::default();
        let aggregator = BalanceAggregator::new(&validator);
        let expenses = [
            custom(expense("e1", 300, "THB", "A", "A,B"), &[("A", 100)]),
            expense("e2", 40, "THB", "B", "A,B"),
        ];

        let aggregation = aggregator.aggregate(&NO_PARTICIPANTS, &expenses);

        assert_eq!(aggregation.rejected.len(), 1);
        assert_eq!(aggregation.rejected[0].id, ExpenseId::new("e1"));
        assert_eq!(aggregation.get("A").expect("A").balance(Currency::Thb), Money::from_i64(-20));
        assert_eq!(aggregation.get("B").expect("B").balance(Currency::Thb), Money::from_i64(20));
    }

    #[test]
    fn payer_matches_split_names_exactly() {
        let expenses = [expense("e1", 100, "THB", "Ann ", "Ann,Ben")];

        let aggregation = BalanceAggregator::lenient().aggregate(&NO_PARTICIPANTS, &expenses);

        assert_eq!(aggregation.get("Ann ").expect("payer").balance(Currency::Thb), Money::from_i64(100));
        assert_eq!(aggregation.get("Ann").expect("Ann").balance(Currency::Thb), Money::from_i64(-50));
    }

    #[test]
    fn padded_currency_code_stays_out_of_ledgers() {
        let expenses = [expense("e1", 100, " THB", "Ann", "Ann,Ben")];

        let aggregation = BalanceAggregator::lenient().aggregate(&NO_PARTICIPANTS, &expenses);

        assert_eq!(aggregation.unsupported, vec![ExpenseId::new("e1")]);
        assert_eq!(aggregation.balance_sum(Currency::Thb), Money::ZERO);
    }

    #[test]
    fn missing_payer_credits_nobody() {
        let expenses = [expense("e1", 100, "THB", "", "A,B")];

        let aggregation = BalanceAggregator::lenient().aggregate(&NO_PARTICIPANTS, &expenses);

        assert!(aggregation.get("").is_none());
        assert_eq!(aggregation.get("A").expect("A").balance(Currency::Thb), Money::from_i64(-50));
    }
}
