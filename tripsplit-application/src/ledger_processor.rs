use tripsplit_domain::{
    Aggregation, BalanceAggregator, Currency, Expense, LenientSplits, Money, PerCurrency,
    PersonBalance, Settlement, SettlementPlanner, SplitValidator,
    services::{CategoryTable, PersonStats, category_stats, person_stats, totals},
};

/// Everything derived from one expense list: balances, suggested transfers
/// and summary statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerReport {
    pub aggregation: Aggregation,
    pub settlements: PerCurrency<Vec<Settlement>>,
    pub totals: PerCurrency<Money>,
    pub categories: PerCurrency<CategoryTable>,
    pub people: PersonStats,
}

impl LedgerReport {
    /// Balances shown in the overview. A participant filter narrows it to
    /// one person.
    pub fn balances_for<'r>(&'r self, participant: Option<&'r str>) -> Vec<&'r PersonBalance> {
        self.aggregation
            .people()
            .filter(|person| participant.is_none_or(|name| person.name == name))
            .collect()
    }

    /// Transfers for one ledger, optionally only those involving `participant`.
    pub fn settlements_for(
        &self,
        currency: Currency,
        participant: Option<&str>,
    ) -> Vec<&Settlement> {
        self.settlements
            .get(currency)
            .iter()
            .filter(|settlement| {
                participant.is_none_or(|name| settlement.from == name || settlement.to == name)
            })
            .collect()
    }

    pub fn is_fully_settled(&self) -> bool {
        self.settlements.iter().all(|(_, settlements)| settlements.is_empty())
    }
}

#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    validator: &'a dyn SplitValidator,
    epsilon: Money,
}

impl LedgerProcessor<'static> {
    pub fn lenient() -> Self {
        Self::new(&LenientSplits)
    }
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(validator: &'a dyn SplitValidator) -> Self {
        Self {
            validator,
            epsilon: SettlementPlanner::default().epsilon(),
        }
    }

    pub fn with_epsilon(mut self, epsilon: Money) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Full recomputation; the result depends only on the inputs.
    pub fn build_report<S: AsRef<str>>(&self, participants: &[S], expenses: &[Expense]) -> LedgerReport {
        let aggregation = BalanceAggregator::new(self.validator).aggregate(participants, expenses);
        let settlements = SettlementPlanner::new(self.epsilon).plan_all(aggregation.people());
        let totals = totals(expenses);
        let people = person_stats(aggregation.people(), &totals);

        tracing::debug!(
            expense_count = expenses.len(),
            people = aggregation.balances.len(),
            unsupported = aggregation.unsupported.len(),
            rejected = aggregation.rejected.len(),
            "Ledger report built"
        );

        LedgerReport {
            aggregation,
            settlements,
            totals,
            categories: category_stats(expenses),
            people,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tripsplit_domain::{
        Category, CoveringSplits, CurrencyCode, CustomSplits, ExpenseId, ParticipantList, Split,
    };

    fn expense(id: &str, total: i64, currency: &str, paid_by: &str, split_among: &str) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            timestamp: None,
            date: "2025-03-14".to_owned(),
            time: String::new(),
            description: String::new(),
            category: Category::new("Food"),
            notes: String::new(),
            total_amount: Money::from_i64(total),
            currency: CurrencyCode::parse(currency),
            paid_by: paid_by.to_owned(),
            split_among: ParticipantList::parse(split_among),
            split: Split::Equal,
        }
    }

    #[fixture]
    fn trip() -> Vec<Expense> {
        vec![
            expense("e1", 300, "THB", "Ann", "Ann,Ben,Cat"),
            expense("e2", 60, "HKD", "Ben", "Ann,Ben"),
        ]
    }

    #[rstest]
    fn report_combines_balances_settlements_and_stats(trip: Vec<Expense>) {
        let report = LedgerProcessor::lenient().build_report(&["Ann", "Ben", "Cat", "Dee"], &trip);

        assert_eq!(report.aggregation.balances.len(), 4);
        assert_eq!(report.settlements.thb.len(), 2);
        assert_eq!(report.settlements.hkd.len(), 1);
        assert_eq!(report.totals.thb, Money::from_i64(300));
        assert_eq!(report.totals.hkd, Money::from_i64(60));
        assert_eq!(report.categories.thb.len(), 1);
        assert_eq!(report.people.averages.thb, Money::from_i64(75));
        assert!(!report.is_fully_settled());
    }

    #[rstest]
    #[case::everyone(None, 4)]
    #[case::one_person(Some("Ben"), 1)]
    #[case::stranger(Some("Zed"), 0)]
    fn balance_overview_respects_participant_filter(
        trip: Vec<Expense>,
        #[case] participant: Option<&str>,
        #[case] expected: usize,
    ) {
        let report = LedgerProcessor::lenient().build_report(&["Ann", "Ben", "Cat", "Dee"], &trip);
        assert_eq!(report.balances_for(participant).len(), expected);
    }

    #[rstest]
    fn settlements_for_keeps_transfers_touching_the_participant(trip: Vec<Expense>) {
        let report = LedgerProcessor::lenient().build_report(&["Ann", "Ben", "Cat"], &trip);

        let cat = report.settlements_for(Currency::Thb, Some("Cat"));
        assert_eq!(cat.len(), 1);
        assert_eq!((cat[0].from.as_str(), cat[0].to.as_str()), ("Cat", "Ann"));
        assert!(report.settlements_for(Currency::Hkd, Some("Cat")).is_empty());
    }

    #[test]
    fn strict_validator_excludes_uncovered_custom_split() {
        let mut dinner = expense("e1", 300, "THB", "Ann", "Ann,Ben");
        dinner.split = Split::Custom(CustomSplits::from_iter([(
            "Ben".to_owned(),
            Money::from_i64(100),
        )]));
        let validator = CoveringSplits::default();

        let report = LedgerProcessor::new(&validator).build_report(&["Ann", "Ben"], &[dinner]);

        assert_eq!(report.aggregation.rejected.len(), 1);
        assert!(report.is_fully_settled());
    }

    #[test]
    fn empty_trip_is_settled() {
        let report = LedgerProcessor::lenient().build_report::<&str>(&[], &[]);
        assert!(report.is_fully_settled());
        assert_eq!(report.totals, PerCurrency::default());
    }
}
