#![warn(clippy::uninlined_format_args)]

mod model;

use rust_decimal::Decimal;

pub use model::{Payment, PersonBalance};

/// Balances whose magnitude does not exceed this are treated as settled (0.01 units).
pub const SETTLED_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

struct Party<'a> {
    name: &'a str,
    remaining: Decimal,
}

/// Greedy largest-pair settlement.
///
/// Creditors (balance above `epsilon`) are queued largest first, debtors
/// (balance below `-epsilon`) largest debt first. Each step pays
/// `min(creditor, |debtor|)` from the head debtor to the head creditor and
/// drops whichever side fell below `epsilon`. At most `N - 1` payments are
/// emitted for `N` unsettled parties. Residue smaller than `epsilon` is
/// discarded, and an imbalanced input simply leaves the longer queue
/// partially unpaid.
pub fn greedy_settle<'a>(
    people: impl IntoIterator<Item = PersonBalance<'a>>,
    epsilon: Decimal,
) -> Vec<Payment<'a>> {
    let mut creditors = Vec::new();
    let mut debtors = Vec::new();
    for person in people {
        if person.balance > epsilon {
            creditors.push(Party {
                name: person.name,
                remaining: person.balance,
            });
        } else if person.balance < -epsilon {
            debtors.push(Party {
                name: person.name,
                remaining: -person.balance,
            });
        }
    }

    if creditors.is_empty() || debtors.is_empty() {
        return Vec::new();
    }

    // Stable sorts: ties keep input order.
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut payments = Vec::with_capacity(creditors.len() + debtors.len() - 1);
    let (mut c, mut d) = (0, 0);
    while c < creditors.len() && d < debtors.len() {
        let creditor = &mut creditors[c];
        let debtor = &mut debtors[d];

        let amount = creditor.remaining.min(debtor.remaining);
        payments.push(Payment {
            from: debtor.name,
            to: creditor.name,
            amount,
        });

        creditor.remaining -= amount;
        debtor.remaining -= amount;

        if creditor.remaining < epsilon {
            c += 1;
        }
        if debtor.remaining < epsilon {
            d += 1;
        }
    }

    payments
}
