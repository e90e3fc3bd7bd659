//! Settlement engine for shared expenses.
//!
//! Everything here is a pure function over a snapshot of expenses:
//!
//! - [`validate`] checks one expense before it is stored.
//! - [`compute_balances`] folds expenses into net balances per participant.
//! - [`simplify`] turns balances into a short list of payments.
//! - [`aggregate`] builds monthly and per-category summaries.
//!
//! Storage, transport and identity of participants are left to the caller.

pub use analytics::{Analytics, CategoryTotal, MonthlyTotal, TOP_N, aggregate};
pub use error::EngineError;
pub use expense::{
    Category, Expense, ExpenseDraft, ExpenseInput, Recurrence, RecurringType, Split, SplitType,
};
pub use ledger::{Balance, Balances, compute_balances, people};
pub use money::Money;
pub use settlement::{Settlement, simplify};
pub use validate::validate;

mod analytics;
mod error;
mod expense;
mod ledger;
mod money;
mod settlement;
mod validate;

pub type ResultEngine<T> = Result<T, EngineError>;
