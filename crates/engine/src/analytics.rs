//! Time and category summaries over a snapshot of expenses.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::{Category, Expense, Money};

/// How many categories and transactions the "top" projections keep.
pub const TOP_N: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: Money,
}

impl MonthlyTotal {
    /// `YYYY-MM` label of the bucket.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
}

/// The four projections, all computed from the same snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Analytics {
    /// Newest month first.
    pub monthly: Vec<MonthlyTotal>,
    /// Every category present, highest total first.
    pub category_summary: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    /// Largest amounts first; ties keep input order.
    pub top_transactions: Vec<Expense>,
}

/// Builds monthly, category and top-N summaries.
///
/// Months are calendar months of `created_at` in UTC. Category ties are
/// broken by category declaration order so the output is stable.
pub fn aggregate<'a, I>(expenses: I) -> Analytics
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut expenses: Vec<&Expense> = expenses.into_iter().collect();

    let mut by_month: BTreeMap<(i32, u32), Money> = BTreeMap::new();
    let mut by_category: HashMap<Category, Money> = HashMap::new();
    for expense in &expenses {
        let key = (expense.created_at.year(), expense.created_at.month());
        *by_month.entry(key).or_default() += expense.amount_money();
        *by_category.entry(expense.category).or_default() += expense.amount_money();
    }

    let monthly = by_month
        .into_iter()
        .rev()
        .map(|((year, month), total)| MonthlyTotal { year, month, total })
        .collect();

    let mut category_summary: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    category_summary.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

    let top_categories = category_summary.iter().take(TOP_N).cloned().collect();

    // Stable sort: equal amounts keep their input order.
    expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    let top_transactions = expenses.into_iter().take(TOP_N).cloned().collect();

    Analytics {
        monthly,
        category_summary,
        top_categories,
        top_transactions,
    }
}
