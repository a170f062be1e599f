use crate::model::{Currency, Money, PerCurrency, PersonBalance, Settlement};
use tripsplit_calc::{PersonBalance as CalcBalance, SETTLED_EPSILON, greedy_settle};

/// Turns per-person balances into suggested transfers, one ledger at a time.
pub struct SettlementPlanner {
    epsilon: Money,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self {
            epsilon: Money::from_decimal(SETTLED_EPSILON),
        }
    }
}

impl SettlementPlanner {
    pub fn new(epsilon: Money) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> Money {
        self.epsilon
    }

    pub fn plan<'p, I>(&self, people: I, currency: Currency) -> Vec<Settlement>
    where
        I: IntoIterator<Item = &'p PersonBalance>,
    {
        let balances = people.into_iter().map(|person| CalcBalance {
            name: person.name.as_str(),
            balance: person.balance(currency).as_decimal(),
        });

        let settlements: Vec<Settlement> = greedy_settle(balances, self.epsilon.as_decimal())
            .into_iter()
            .map(|payment| Settlement {
                from: payment.from.to_owned(),
                to: payment.to.to_owned(),
                amount: Money::from_decimal(payment.amount),
                currency,
            })
            .collect();

        tracing::debug!(
            currency = %currency,
            settlement_count = settlements.len(),
            "Settlement plan computed"
        );
        settlements
    }

    pub fn plan_all<'p, I>(&self, people: I) -> PerCurrency<Vec<Settlement>>
    where
        I: IntoIterator<Item = &'p PersonBalance> + Clone,
    {
        PerCurrency::from_fn(|currency| self.plan(people.clone(), currency))
    }
}
