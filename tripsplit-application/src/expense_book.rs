use crate::{
    error::ExpenseBookError,
    ledger_processor::{LedgerProcessor, LedgerReport},
    model::{NewExpense, TripConfig},
    ports::Clock,
};
use tripsplit_domain::{
    Category, Currency, CurrencyCode, Expense, ExpenseFilter, ExpenseId, ParticipantList, SortKey,
    SortOrder, Split,
    services::{parse_amount, sort_expenses},
};

/// The trip's expense list plus its configuration. Derived views are always
/// recomputed from the list.
#[derive(Clone, Debug, Default)]
pub struct ExpenseBook {
    config: TripConfig,
    expenses: Vec<Expense>,
}

impl ExpenseBook {
    pub fn new(config: TripConfig, expenses: Vec<Expense>) -> Self {
        Self { config, expenses }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Records a new equal-split expense and returns it.
    pub fn add(&mut self, input: NewExpense, clock: &dyn Clock) -> Result<&Expense, ExpenseBookError> {
        let paid_by = input.paid_by.trim();
        if paid_by.is_empty() {
            return Err(ExpenseBookError::MissingPayer);
        }
        let split_among = ParticipantList::from_names(&input.split_among);
        if split_among.is_empty() {
            return Err(ExpenseBookError::EmptySplit);
        }

        let currency = if input.currency.trim().is_empty() {
            CurrencyCode::Supported(Currency::Thb)
        } else {
            CurrencyCode::parse(input.currency.trim())
        };

        let expense = Expense {
            id: self.next_id(clock),
            timestamp: Some(clock.resolve(&input.date, &input.time)),
            date: input.date.trim().to_owned(),
            time: input.time.trim().to_owned(),
            description: input.description.trim().to_owned(),
            category: Category::new(&input.category),
            notes: input.notes.trim().to_owned(),
            total_amount: parse_amount(&input.amount),
            currency,
            paid_by: paid_by.to_owned(),
            split_among,
            split: Split::Equal,
        };

        tracing::info!(
            expense_id = %expense.id,
            amount = %expense.total_amount,
            currency = %expense.currency,
            "Expense added"
        );
        let position = self.expenses.len();
        self.expenses.push(expense);
        Ok(&self.expenses[position])
    }

    pub fn delete(&mut self, id: &ExpenseId) -> Result<Expense, ExpenseBookError> {
        let position = self.position(id)?;
        tracing::info!(expense_id = %id, "Expense deleted");
        Ok(self.expenses.remove(position))
    }

    /// Replaces the record with the same id in place, keeping list order.
    pub fn replace(&mut self, expense: Expense) -> Result<Expense, ExpenseBookError> {
        let position = self.position(&expense.id)?;
        tracing::info!(expense_id = %expense.id, "Expense replaced");
        Ok(std::mem::replace(&mut self.expenses[position], expense))
    }

    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    pub fn report(&self, processor: &LedgerProcessor<'_>) -> LedgerReport {
        processor.build_report(&self.config.participants, &self.expenses)
    }

    pub fn query(&self, filter: &ExpenseFilter, key: SortKey, order: SortOrder) -> Vec<&Expense> {
        let mut view = filter.apply(&self.expenses);
        sort_expenses(&mut view, key, order);
        view
    }

    fn position(&self, id: &ExpenseId) -> Result<usize, ExpenseBookError> {
        self.expenses
            .iter()
            .position(|expense| &expense.id == id)
            .ok_or_else(|| ExpenseBookError::UnknownExpense(id.clone()))
    }

    fn next_id(&self, clock: &dyn Clock) -> ExpenseId {
        let base = format!("EXP-{}", clock.now().timestamp_millis());
        let taken = |candidate: &str| self.expenses.iter().any(|e| e.id.as_str() == candidate);
        if !taken(&base) {
            return ExpenseId::new(base);
        }
        let suffix = (1..)
            .find(|n| !taken(&format!("{base}-{n}")))
            .unwrap_or(usize::MAX);
        ExpenseId::new(format!("{base}-{suffix}"))
    }
}
