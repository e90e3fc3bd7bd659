//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidExpense`] returned when an expense breaks one of its split rules.
//! - [`InvariantViolation`] returned when balances do not net to zero.
//! - [`KeyNotFound`] returned when an item is not found.
//!
//!  [`InvalidExpense`]: EngineError::InvalidExpense
//!  [`InvariantViolation`]: EngineError::InvariantViolation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
}
