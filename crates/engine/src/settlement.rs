//! Greedy debt netting.
//!
//! The sweep pairs the first remaining debtor with the first remaining
//! creditor until one side runs out. It is deterministic and linear in the
//! number of non-zero balances, but it does not always find the smallest
//! possible number of payments.

use std::collections::VecDeque;

use crate::{Balances, EngineError, Money, ResultEngine};

/// A suggested payment from one participant to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

struct Position<'a> {
    person: &'a str,
    /// Always positive while queued.
    remaining: Money,
}

/// Reduces `balances` to an ordered list of payments.
///
/// Drift from zero that the split slack of the folded expenses explains is
/// left unsettled on the last creditor or debtor. Anything beyond that slack
/// plus half a cent of rounding per entry returns
/// [`EngineError::InvariantViolation`].
pub fn simplify(balances: &Balances) -> ResultEngine<Vec<Settlement>> {
    let drift = balances.total();
    let allowed = balances.len() as u64 + 2 * balances.slack().cents().unsigned_abs();
    if drift.cents().unsigned_abs() * 2 > allowed {
        return Err(EngineError::InvariantViolation(format!(
            "balances sum to {drift} across {} participants, slack {}",
            balances.len(),
            balances.slack()
        )));
    }

    let mut debtors = VecDeque::new();
    let mut creditors = VecDeque::new();
    for balance in balances.iter() {
        let position = Position {
            person: balance.participant.as_str(),
            remaining: balance.amount.abs(),
        };
        if balance.amount.is_negative() {
            debtors.push_back(position);
        } else if balance.amount.is_positive() {
            creditors.push_back(position);
        }
    }

    let mut settlements = Vec::with_capacity(debtors.len() + creditors.len());
    loop {
        let (Some(debtor), Some(creditor)) = (debtors.front_mut(), creditors.front_mut()) else {
            break;
        };
        let amount = debtor.remaining.min(creditor.remaining);
        settlements.push(Settlement {
            from: debtor.person.to_string(),
            to: creditor.person.to_string(),
            amount,
        });

        debtor.remaining -= amount;
        creditor.remaining -= amount;
        let (debtor_done, creditor_done) =
            (debtor.remaining.is_zero(), creditor.remaining.is_zero());

        if debtor_done {
            debtors.pop_front();
        }
        if creditor_done {
            creditors.pop_front();
        }
    }

    Ok(settlements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balance;

    fn balances(entries: &[(&str, i64)]) -> Balances {
        entries
            .iter()
            .map(|(name, cents)| Balance {
                participant: name.to_string(),
                amount: Money::new(*cents),
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn triples(settlements: &[Settlement]) -> Vec<(&str, &str, i64)> {
        settlements
            .iter()
            .map(|s| (s.from.as_str(), s.to.as_str(), s.amount.cents()))
            .collect()
    }

    #[test]
    fn empty_or_settled_balances_need_no_payments() {
        assert!(simplify(&Balances::default()).unwrap().is_empty());
        assert!(simplify(&balances(&[("A", 0), ("B", 0)])).unwrap().is_empty());
    }

    #[test]
    fn follows_first_seen_order() {
        let result = simplify(&balances(&[
            ("A", -3000),
            ("B", 1000),
            ("C", -1000),
            ("D", 3000),
        ]))
        .unwrap();
        assert_eq!(
            triples(&result),
            vec![("A", "B", 1000), ("A", "D", 2000), ("C", "D", 1000)]
        );
    }

    #[test]
    fn tolerates_rounding_residue() {
        // 100 split three ways: 66.67 / -33.33 / -33.33.
        let result = simplify(&balances(&[("A", 6667), ("B", -3333), ("C", -3333)])).unwrap();
        assert_eq!(triples(&result), vec![("B", "A", 3333), ("C", "A", 3333)]);
    }

    #[test]
    fn rejects_balances_that_do_not_net_to_zero() {
        let err = simplify(&balances(&[("A", 5000), ("B", -1000)])).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }
}
