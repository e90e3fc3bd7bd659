//! In-memory expense storage.
//!
//! Expenses live only as long as the process. Every write goes through
//! [`engine::validate`] first, so the store never holds an invalid record.

use chrono::Utc;
use engine::{EngineError, Expense, ExpenseInput, ResultEngine};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ExpenseStore {
    /// Insertion order.
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `input` and stores it under a fresh id.
    pub fn create(&mut self, input: &ExpenseInput) -> ResultEngine<Expense> {
        let draft = engine::validate(input)?;
        let expense = draft.into_expense(Uuid::new_v4(), Utc::now());
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Validates `input` and replaces the content of expense `id`.
    pub fn update(&mut self, id: Uuid, input: &ExpenseInput) -> ResultEngine<Expense> {
        let draft = engine::validate(input)?;
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        expense.apply(draft, Utc::now());
        Ok(expense.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> ResultEngine<Expense> {
        let position = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        Ok(self.expenses.remove(position))
    }

    /// Copy of all expenses in insertion order.
    pub fn snapshot(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// All expenses, newest first.
    pub fn newest_first(&self) -> Vec<Expense> {
        let mut expenses = self.snapshot();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch(amount: f64) -> ExpenseInput {
        ExpenseInput {
            amount,
            description: "Lunch".to_string(),
            paid_by: "A".to_string(),
            shared_with: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn invalid_input_is_not_stored() {
        let mut store = ExpenseStore::new();
        assert!(store.create(&lunch(0.0)).is_err());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn update_keeps_id_and_rejects_unknown() {
        let mut store = ExpenseStore::new();
        let created = store.create(&lunch(10.0)).unwrap();

        let updated = store.update(created.id, &lunch(12.0)).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.snapshot()[0].amount, 12.0);

        let missing = Uuid::new_v4();
        assert_eq!(
            store.update(missing, &lunch(1.0)),
            Err(EngineError::KeyNotFound(missing.to_string()))
        );
    }

    #[test]
    fn failed_update_leaves_record_untouched() {
        let mut store = ExpenseStore::new();
        let created = store.create(&lunch(10.0)).unwrap();
        assert!(store.update(created.id, &lunch(-1.0)).is_err());
        assert_eq!(store.snapshot(), vec![created]);
    }

    #[test]
    fn delete_removes_once() {
        let mut store = ExpenseStore::new();
        let created = store.create(&lunch(10.0)).unwrap();
        assert!(store.delete(created.id).is_ok());
        assert!(matches!(
            store.delete(created.id),
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
