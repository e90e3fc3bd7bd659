//! Expense primitives.
//!
//! An [`ExpenseInput`] is what arrives from outside: loosely typed and not yet
//! checked. [`crate::validate`] turns it into an [`ExpenseDraft`], and the
//! storage layer stamps a draft with an id and timestamps to obtain an
//! [`Expense`].

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{EngineError, Money};

/// How the cost of an expense is divided among its participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitType {
    #[default]
    Equal,
    Percentage,
    Exact,
}

impl SplitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Percentage => "percentage",
            Self::Exact => "exact",
        }
    }
}

impl TryFrom<&str> for SplitType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "equal" => Ok(Self::Equal),
            "percentage" => Ok(Self::Percentage),
            "exact" => Ok(Self::Exact),
            other => Err(EngineError::InvalidExpense(format!(
                "invalid split type: {other}"
            ))),
        }
    }
}

/// Fixed set of expense categories.
///
/// Declaration order is also the tie-break order used by analytics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Travel,
    Utilities,
    Entertainment,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Food,
        Self::Travel,
        Self::Utilities,
        Self::Entertainment,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| EngineError::InvalidExpense(format!("invalid category: {value}")))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecurringType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    #[default]
    None,
}

impl RecurringType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::None => "none",
        }
    }
}

impl TryFrom<&str> for RecurringType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "none" => Ok(Self::None),
            other => Err(EngineError::InvalidExpense(format!(
                "invalid recurring type: {other}"
            ))),
        }
    }
}

/// Recurrence metadata. Only validated and carried along; the engine never
/// generates instances from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Recurrence {
    pub kind: RecurringType,
    pub interval: u32,
    pub end_date: Option<NaiveDate>,
}

/// Split rule together with its per-participant values.
///
/// Values are positionally aligned with the expense participants.
#[derive(Clone, Debug, PartialEq)]
pub enum Split {
    Equal,
    Percentage(Vec<f64>),
    Exact(Vec<f64>),
}

impl Split {
    pub fn split_type(&self) -> SplitType {
        match self {
            Self::Equal => SplitType::Equal,
            Self::Percentage(_) => SplitType::Percentage,
            Self::Exact(_) => SplitType::Exact,
        }
    }

    /// Split values as supplied; empty for equal splits.
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Equal => &[],
            Self::Percentage(values) | Self::Exact(values) => values,
        }
    }
}

/// Unvalidated expense data as received from a caller.
///
/// Optional fields fall back to the defaults documented on each field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseInput {
    pub amount: f64,
    pub description: String,
    pub paid_by: String,
    pub shared_with: Vec<String>,
    /// Defaults to `equal`.
    pub split_type: Option<String>,
    pub split_values: Vec<f64>,
    /// Defaults to `Other`.
    pub category: Option<String>,
    pub is_recurring: bool,
    /// Defaults to `none`.
    pub recurring_type: Option<String>,
    /// Defaults to 1.
    pub recurring_interval: Option<i64>,
    pub recurring_end_date: Option<String>,
}

/// Validated expense content, not yet stored.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub description: String,
    pub payer: String,
    pub participants: Vec<String>,
    pub split: Split,
    pub category: Category,
    pub recurrence: Option<Recurrence>,
}

impl ExpenseDraft {
    /// Stamps the draft with its storage identity.
    pub fn into_expense(self, id: Uuid, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            amount: self.amount,
            description: self.description,
            payer: self.payer,
            participants: self.participants,
            split: self.split,
            category: self.category,
            recurrence: self.recurrence,
            created_at,
            updated_at: created_at,
        }
    }
}

/// A stored expense. The payer is credited the full amount, every participant
/// is debited its share according to `split`.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub description: String,
    pub payer: String,
    pub participants: Vec<String>,
    pub split: Split,
    pub category: Category,
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Replaces the content with `draft`, keeping id and creation time.
    pub fn apply(&mut self, draft: ExpenseDraft, updated_at: DateTime<Utc>) {
        let id = self.id;
        let created_at = self.created_at;
        *self = draft.into_expense(id, created_at);
        self.updated_at = updated_at;
    }

    /// Amount rounded to cents.
    pub fn amount_money(&self) -> Money {
        Money::from_major(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_round_trip_through_wire_strings() {
        for category in Category::ALL {
            assert_eq!(Category::try_from(category.as_str()), Ok(category));
        }
        for split in [SplitType::Equal, SplitType::Percentage, SplitType::Exact] {
            assert_eq!(SplitType::try_from(split.as_str()), Ok(split));
        }
    }

    #[test]
    fn category_names_are_case_sensitive() {
        assert_eq!(
            Category::try_from("food"),
            Err(EngineError::InvalidExpense("invalid category: food".to_string()))
        );
    }

    #[test]
    fn apply_keeps_identity() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let draft = ExpenseDraft {
            amount: 10.0,
            description: "Lunch".to_string(),
            payer: "A".to_string(),
            participants: vec!["A".to_string()],
            split: Split::Equal,
            category: Category::Food,
            recurrence: None,
        };
        let mut expense = draft.clone().into_expense(Uuid::new_v4(), created);
        let id = expense.id;

        let later = DateTime::from_timestamp(1_700_000_100, 0).unwrap();
        expense.apply(
            ExpenseDraft {
                amount: 20.0,
                ..draft
            },
            later,
        );

        assert_eq!(expense.id, id);
        assert_eq!(expense.created_at, created);
        assert_eq!(expense.updated_at, later);
        assert_eq!(expense.amount, 20.0);
    }
}
