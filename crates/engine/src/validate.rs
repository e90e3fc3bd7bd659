//! Split validation.
//!
//! Every check returns the first violated rule as
//! [`EngineError::InvalidExpense`]; nothing is partially applied.

use chrono::{DateTime, NaiveDate};

use crate::{
    Category, EngineError, ExpenseDraft, ExpenseInput, Recurrence, RecurringType, ResultEngine,
    Split, SplitType,
};

fn reject<T>(message: impl Into<String>) -> ResultEngine<T> {
    Err(EngineError::InvalidExpense(message.into()))
}

/// Validates raw expense data and returns its typed form.
///
/// Checks run in this order and stop at the first failure: amount,
/// description, payer, participants, category, split rule, recurrence.
pub fn validate(input: &ExpenseInput) -> ResultEngine<ExpenseDraft> {
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return reject("amount must be greater than zero");
    }

    let description = input.description.trim();
    if description.is_empty() {
        return reject("description must not be empty");
    }

    if input.paid_by.trim().is_empty() {
        return reject("paid_by must not be empty");
    }

    if input.shared_with.is_empty() {
        return reject("shared_with must not be empty");
    }
    if input.shared_with.iter().any(|name| name.trim().is_empty()) {
        return reject("shared_with must not contain empty names");
    }

    let category = match input.category.as_deref() {
        Some(value) => Category::try_from(value)?,
        None => Category::default(),
    };

    let split_type = match input.split_type.as_deref() {
        Some(value) => SplitType::try_from(value)?,
        None => SplitType::default(),
    };
    let split = validate_split(split_type, input)?;

    let recurrence = if input.is_recurring {
        Some(validate_recurrence(input)?)
    } else {
        None
    };

    Ok(ExpenseDraft {
        amount: input.amount,
        description: description.to_string(),
        payer: input.paid_by.clone(),
        participants: input.shared_with.clone(),
        split,
        category,
        recurrence,
    })
}

fn validate_split(split_type: SplitType, input: &ExpenseInput) -> ResultEngine<Split> {
    if split_type == SplitType::Equal {
        return Ok(Split::Equal);
    }

    let values = &input.split_values;
    if values.len() != input.shared_with.len() {
        return reject("split_values must match length of shared_with");
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return reject("split_values must not be negative");
    }

    let sum: f64 = values.iter().sum();
    match split_type {
        SplitType::Percentage => {
            if sum.round() != 100.0 {
                return reject("percentage split must total 100%");
            }
            Ok(Split::Percentage(values.clone()))
        }
        SplitType::Exact => {
            if (sum * 100.0).round() != (input.amount * 100.0).round() {
                return reject("exact split must total the full amount");
            }
            Ok(Split::Exact(values.clone()))
        }
        SplitType::Equal => Ok(Split::Equal),
    }
}

fn validate_recurrence(input: &ExpenseInput) -> ResultEngine<Recurrence> {
    let kind = match input.recurring_type.as_deref() {
        Some(value) => RecurringType::try_from(value)?,
        None => RecurringType::default(),
    };

    let interval = match u32::try_from(input.recurring_interval.unwrap_or(1)) {
        Ok(interval) if interval >= 1 => interval,
        _ => return reject("recurring interval must be at least 1"),
    };

    let end_date = match input.recurring_end_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(parse_date(value).ok_or_else(|| {
            EngineError::InvalidExpense(format!("invalid recurring end date: {value}"))
        })?),
    };

    Ok(Recurrence {
        kind,
        interval,
        end_date,
    })
}

/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
