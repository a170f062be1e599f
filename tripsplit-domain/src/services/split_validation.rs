use crate::{
    model::{Expense, Money, Split},
    services::ShareCalculator,
};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SplitViolation {
    #[error("custom shares cover {covered} of a {total} total")]
    UncoveredTotal { total: Money, covered: Money },
}

/// Single place where stricter split rules can be plugged into aggregation.
pub trait SplitValidator: Send + Sync {
    fn validate(&self, expense: &Expense) -> Result<(), SplitViolation>;
}

/// Accepts every expense, including custom splits that do not cover the total.
#[derive(Clone, Copy, Debug, Default)]
pub struct LenientSplits;

impl SplitValidator for LenientSplits {
    fn validate(&self, _expense: &Expense) -> Result<(), SplitViolation> {
        Ok(())
    }
}

/// Rejects custom splits whose participant shares differ from the total by
/// more than `tolerance`.
#[derive(Clone, Copy, Debug)]
pub struct CoveringSplits {
    pub tolerance: Money,
}

impl Default for CoveringSplits {
    fn default() -> Self {
        Self {
            tolerance: Money::new(1, 2),
        }
    }
}

impl SplitValidator for CoveringSplits {
    fn validate(&self, expense: &Expense) -> Result<(), SplitViolation> {
        if let Split::Equal = expense.split {
            return Ok(());
        }

        let covered: Money = expense
            .split_among
            .iter()
            .map(|name| ShareCalculator.share_of(expense, name))
            .sum();
        if (covered - expense.total_amount).abs() > self.tolerance {
            return Err(SplitViolation::UncoveredTotal {
                total: expense.total_amount,
                covered,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Currency, CustomSplits, ExpenseId, ParticipantList};

    fn custom_expense(total: i64, shares: &[(&str, i64)]) -> Expense {
        Expense {
            id: ExpenseId::new("EXP-7"),
            timestamp: None,
            date: String::new(),
            time: String::new(),
            description: String::new(),
            category: Category::default(),
            notes: String::new(),
            total_amount: Money::from_i64(total),
            currency: Currency::Hkd.into(),
            paid_by: "A".to_owned(),
            split_among: ParticipantList::from_names(shares.iter().map(|(name, _)| *name)),
            split: Split::Custom(
                shares
                    .iter()
                    .map(|(name, amount)| ((*name).to_owned(), Money::from_i64(*amount)))
                    .collect::<CustomSplits>(),
            ),
        }
    }

    #[test]
    fn lenient_accepts_uncovered_custom_split() {
        let expense = custom_expense(100, &[("A", 10), ("B", 10)]);
        assert_eq!(LenientSplits.validate(&expense), Ok(()));
    }

    #[test]
    fn covering_rejects_uncovered_custom_split() {
        let expense = custom_expense(100, &[("A", 10), ("B", 10)]);
        assert_eq!(
            CoveringSplits::default().validate(&expense),
            Err(SplitViolation::UncoveredTotal {
                total: Money::from_i64(100),
                covered: Money::from_i64(20),
            })
        );
    }

    #[test]
    fn covering_accepts_exact_custom_split() {
        let expense = custom_expense(100, &[("A", 60), ("B", 40)]);
        assert_eq!(CoveringSplits::default().validate(&expense), Ok(()));
    }
}
