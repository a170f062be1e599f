use crate::{
    format::{format_balance, format_currency},
    text_table::{Alignment, TextTableBuilder},
};
use std::{borrow::Cow, fmt::Write};
use tripsplit_application::LedgerReport;
use tripsplit_domain::{Currency, Expense, PersonBalance, Settlement, services::person_spend};
use tripsplit_i18n as i18n;

pub struct LedgerPresenter;

impl LedgerPresenter {
    /// Balance overview per currency. With a participant selected only that
    /// person's row and consumption total are shown; settlements are listed
    /// for the whole group only.
    pub fn render(report: &LedgerReport, expenses: &[Expense], participant: Option<&str>) -> String {
        let mut out = String::new();
        let balances = report.balances_for(participant);
        let spend = participant.map(|name| person_spend(expenses, name));

        for currency in Currency::ALL {
            let _ = writeln!(&mut out, "== {} ==", i18n::ledger_heading(currency));
            if let Some(spend) = &spend {
                let _ = writeln!(
                    &mut out,
                    "{}: {}",
                    i18n::TOTAL,
                    format_currency(*spend.get(currency), currency)
                );
            }
            out.push_str(&Self::build_balance_table(&balances, currency));

            if participant.is_none() {
                out.push('\n');
                let settlements = report.settlements_for(currency, None);
                if settlements.is_empty() {
                    let _ = writeln!(&mut out, "{}", i18n::ALL_SETTLED);
                } else {
                    out.push_str(&Self::build_settlement_table(&settlements));
                }
            }
            out.push('\n');
        }

        for id in &report.aggregation.unsupported {
            let _ = writeln!(&mut out, "! {id}: {}", i18n::UNSUPPORTED_CURRENCY);
        }
        for rejected in &report.aggregation.rejected {
            let _ = writeln!(
                &mut out,
                "! {}: {} ({})",
                rejected.id,
                i18n::REJECTED_SPLIT,
                rejected.violation
            );
        }
        out
    }

    pub fn build_balance_table(people: &[&PersonBalance], currency: Currency) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::PERSON),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::OWED),
                Cow::Borrowed(i18n::BALANCE),
            ]);

        for person in people {
            let ledger = person.ledger(currency);
            builder = builder.row([
                Cow::Borrowed(person.name.as_str()),
                Cow::Owned(format_currency(ledger.paid, currency)),
                Cow::Owned(format_currency(ledger.owed, currency)),
                Cow::Owned(format_balance(ledger.balance, currency)),
            ]);
        }

        builder.build()
    }

    pub fn build_settlement_table(settlements: &[&Settlement]) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for settlement in settlements {
            builder = builder.row([
                Cow::Borrowed(settlement.from.as_str()),
                Cow::Borrowed(settlement.to.as_str()),
                Cow::Owned(format_currency(settlement.amount, settlement.currency)),
            ]);
        }

        builder.build()
    }
}
