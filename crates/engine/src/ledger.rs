//! Net balances per participant.

use std::collections::{HashMap, HashSet};

use crate::{Expense, Money, Split};

/// Net position of one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub participant: String,
    /// Positive = is owed money, negative = owes money.
    pub amount: Money,
}

/// Balances in the order participants were first seen while folding.
///
/// The order is part of the contract: the settlement sweep walks it to pick
/// who pays whom first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Balances {
    entries: Vec<Balance>,
    slack: Money,
}

impl Balances {
    pub fn iter(&self) -> impl Iterator<Item = &Balance> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Balance of `participant`, if it appears in any expense.
    pub fn get(&self, participant: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|b| b.participant == participant)
            .map(|b| b.amount)
    }

    /// Sum over all entries. Zero up to per-entry rounding and [`slack`].
    ///
    /// [`slack`]: Balances::slack
    pub fn total(&self) -> Money {
        self.entries.iter().map(|b| b.amount).sum()
    }

    /// How far the folded expenses may leave the ledger from zero.
    ///
    /// Validation lets a percentage split total anything that rounds to 100
    /// and an exact split miss the amount by under half a cent, so each such
    /// expense credits its payer slightly more or less than it debits. This is
    /// the sum of those gaps, rounded up to the cent.
    pub fn slack(&self) -> Money {
        self.slack
    }
}

impl From<Vec<Balance>> for Balances {
    fn from(entries: Vec<Balance>) -> Self {
        Self {
            entries,
            slack: Money::ZERO,
        }
    }
}

impl IntoIterator for Balances {
    type Item = Balance;
    type IntoIter = std::vec::IntoIter<Balance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Unrounded running totals, stored by first-seen position.
#[derive(Default)]
struct Accumulator {
    index: HashMap<String, usize>,
    totals: Vec<(String, f64)>,
    slack: f64,
}

impl Accumulator {
    fn add(&mut self, participant: &str, delta: f64) {
        let slot = match self.index.get(participant) {
            Some(&slot) => slot,
            None => {
                let slot = self.totals.len();
                self.totals.push((participant.to_string(), 0.0));
                self.index.insert(participant.to_string(), slot);
                slot
            }
        };
        self.totals[slot].1 += delta;
    }

    fn finish(self) -> Balances {
        let entries = self
            .totals
            .into_iter()
            .map(|(participant, total)| Balance {
                participant,
                amount: Money::from_major(total),
            })
            .collect();
        // Ignore float noise well below a cent before rounding up.
        let slack_cents = (self.slack * 100.0 - 1e-6).ceil().max(0.0) as i64;

        Balances {
            entries,
            slack: Money::new(slack_cents),
        }
    }
}

/// Folds expenses, in the order given, into per-participant net balances.
///
/// The payer is credited the full amount, then each participant is debited
/// its share. Equal splits debit the payer too when listed among the
/// participants. Entries are rounded to cents only once every expense has
/// been folded.
pub fn compute_balances<'a, I>(expenses: I) -> Balances
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut acc = Accumulator::default();

    for expense in expenses {
        acc.add(&expense.payer, expense.amount);

        let mut debited = 0.0;
        match &expense.split {
            Split::Equal => {
                if !expense.participants.is_empty() {
                    let share = expense.amount / expense.participants.len() as f64;
                    for person in &expense.participants {
                        acc.add(person, -share);
                    }
                    debited = expense.amount;
                }
            }
            Split::Percentage(values) => {
                for (person, percent) in expense.participants.iter().zip(values) {
                    let share = (percent / 100.0) * expense.amount;
                    acc.add(person, -share);
                    debited += share;
                }
            }
            Split::Exact(values) => {
                for (person, value) in expense.participants.iter().zip(values) {
                    acc.add(person, -value);
                    debited += value;
                }
            }
        }
        acc.slack += (expense.amount - debited).abs();
    }

    acc.finish()
}

/// Distinct participant names in first-seen order: each expense contributes
/// its payer, then its participants.
pub fn people<'a, I>(expenses: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut seen = HashSet::new();
    let mut people = Vec::new();
    for expense in expenses {
        for name in std::iter::once(&expense.payer).chain(&expense.participants) {
            if seen.insert(name.as_str()) {
                people.push(name.clone());
            }
        }
    }
    people
}
