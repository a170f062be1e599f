use crate::{
    format::{format_balance, format_currency, format_percentage},
    text_table::{Alignment, TextTableBuilder},
};
use std::{borrow::Cow, fmt::Write};
use tripsplit_application::LedgerReport;
use tripsplit_domain::{Currency, services::CategoryTable};
use tripsplit_i18n as i18n;

pub struct SummaryPresenter;

impl SummaryPresenter {
    pub fn render(report: &LedgerReport) -> String {
        let mut out = String::new();

        for currency in Currency::ALL {
            let _ = writeln!(&mut out, "== {} ==", i18n::ledger_heading(currency));
            let _ = writeln!(
                &mut out,
                "{}: {}",
                i18n::TOTAL,
                format_currency(*report.totals.get(currency), currency)
            );
            let _ = writeln!(
                &mut out,
                "{}: {}",
                i18n::AVERAGE,
                format_currency(*report.people.averages.get(currency), currency)
            );
            let _ = writeln!(
                &mut out,
                "{}: {}",
                i18n::BALANCE,
                format_balance(report.aggregation.balance_sum(currency), currency)
            );

            let categories = report.categories.get(currency);
            if !categories.is_empty() {
                out.push('\n');
                out.push_str(&Self::build_category_table(categories, currency));
            }
            if !report.people.people.is_empty() {
                out.push('\n');
                out.push_str(&Self::build_person_table(report, currency));
            }
            out.push('\n');
        }
        out
    }

    pub fn build_category_table(categories: &CategoryTable, currency: Currency) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::CATEGORY),
                Cow::Borrowed(i18n::TOTAL),
                Cow::Borrowed(i18n::COUNT),
                Cow::Borrowed(i18n::SHARE),
            ]);

        for (category, stat) in categories {
            builder = builder.row([
                Cow::Borrowed(category.as_str()),
                Cow::Owned(format_currency(stat.total, currency)),
                Cow::Owned(stat.count.to_string()),
                Cow::Owned(format_percentage(stat.percentage)),
            ]);
        }

        builder.build()
    }

    pub fn build_person_table(report: &LedgerReport, currency: Currency) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::PERSON),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::PAID_SHARE),
                Cow::Borrowed(i18n::OWED),
                Cow::Borrowed(i18n::OWED_SHARE),
            ]);

        for (name, shares) in &report.people.people {
            let share = shares.get(currency);
            builder = builder.row([
                Cow::Borrowed(name.as_str()),
                Cow::Owned(format_currency(share.totals.paid, currency)),
                Cow::Owned(format_percentage(share.paid_percentage)),
                Cow::Owned(format_currency(share.totals.owed, currency)),
                Cow::Owned(format_percentage(share.owed_percentage)),
            ]);
        }

        builder.build()
    }
}
