use crate::{
    format::{format_currency, format_split_among},
    text_table::{Alignment, TextTableBuilder},
};
use std::{borrow::Cow, fmt::Write};
use tripsplit_domain::Expense;
use tripsplit_i18n as i18n;

pub struct ExpensePresenter;

impl ExpensePresenter {
    pub fn render(expenses: &[&Expense]) -> String {
        if expenses.is_empty() {
            return format!("{}\n", i18n::NO_EXPENSES);
        }

        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
            ])
            .headers(&[
                Cow::Borrowed("ID"),
                Cow::Borrowed(i18n::DATE),
                Cow::Borrowed(i18n::TIME),
                Cow::Borrowed(i18n::DESCRIPTION),
                Cow::Borrowed(i18n::CATEGORY),
                Cow::Borrowed(i18n::AMOUNT),
                Cow::Borrowed(i18n::PAID_BY),
                Cow::Borrowed(i18n::SPLIT_AMONG),
                Cow::Borrowed(i18n::SPLIT_TYPE),
            ]);

        for expense in expenses {
            builder = builder.row([
                Cow::Borrowed(expense.id.as_str()),
                Cow::Borrowed(expense.date.as_str()),
                Cow::Borrowed(expense.time.as_str()),
                Cow::Owned(Self::describe(expense)),
                Cow::Borrowed(expense.category.as_str()),
                Cow::Owned(format_currency(expense.total_amount, &expense.currency)),
                Cow::Borrowed(expense.paid_by.as_str()),
                Cow::Owned(format_split_among(&expense.split_among)),
                Cow::Owned(Self::split_label(expense)),
            ]);
        }

        builder.build()
    }

    fn describe(expense: &Expense) -> String {
        if expense.notes.is_empty() {
            expense.description.clone()
        } else {
            format!("{}\n({})", expense.description, expense.notes)
        }
    }

    /// `Equal`, or `Custom` followed by one `name: amount` line per share.
    fn split_label(expense: &Expense) -> String {
        let mut label = expense.split.kind().as_str().to_owned();
        if let Some(shares) = expense.split.custom_splits() {
            for (name, amount) in shares {
                let _ = write!(
                    &mut label,
                    "\n{name}: {}",
                    format_currency(*amount, &expense.currency)
                );
            }
        }
        label
    }
}
