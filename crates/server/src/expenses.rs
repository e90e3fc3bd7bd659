//! Expense API endpoints

use api_types::expense::{ExpenseNew, ExpenseView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{Expense, ExpenseInput, RecurringType};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_input(payload: ExpenseNew) -> ExpenseInput {
    ExpenseInput {
        amount: payload.amount,
        description: payload.description,
        paid_by: payload.paid_by,
        shared_with: payload.shared_with,
        split_type: payload.split_type,
        split_values: payload.split_values,
        category: payload.category,
        is_recurring: payload.is_recurring,
        recurring_type: payload.recurring_type,
        recurring_interval: payload.recurring_interval,
        recurring_end_date: payload.recurring_end_date,
    }
}

pub(crate) fn map_expense(expense: Expense) -> ExpenseView {
    let (recurring_type, recurring_interval, recurring_end_date) = match &expense.recurrence {
        Some(recurrence) => (
            recurrence.kind,
            recurrence.interval,
            recurrence.end_date.map(|date| date.format("%Y-%m-%d").to_string()),
        ),
        None => (RecurringType::None, 1, None),
    };

    ExpenseView {
        id: expense.id,
        amount: expense.amount,
        split_type: expense.split.split_type().as_str().to_string(),
        split_values: expense.split.values().to_vec(),
        category: expense.category.as_str().to_string(),
        is_recurring: expense.recurrence.is_some(),
        recurring_type: recurring_type.as_str().to_string(),
        recurring_interval,
        recurring_end_date,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        description: expense.description,
        paid_by: expense.payer,
        shared_with: expense.participants,
    }
}

/// Malformed bodies get the same `{error}` shape as validation failures.
fn parse_body(
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<ExpenseNew, ServerError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

fn parse_id(id: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(id).map_err(|_| ServerError::Generic(format!("invalid expense id: {id}")))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let payload = parse_body(payload)?;
    let expense = state.store.write().await.create(&map_input(payload))?;
    tracing::info!(id = %expense.id, amount = expense.amount, "expense added");

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

/// Handle requests for listing expenses, newest first
pub async fn list(State(state): State<ServerState>) -> Json<Vec<ExpenseView>> {
    let expenses = state.store.read().await.newest_first();
    Json(expenses.into_iter().map(map_expense).collect())
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let id = parse_id(&id)?;
    let payload = parse_body(payload)?;
    let expense = state.store.write().await.update(id, &map_input(payload))?;
    tracing::info!(%id, "expense updated");

    Ok(Json(map_expense(expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = parse_id(&id)?;
    state.store.write().await.delete(id)?;
    tracing::info!(%id, "expense deleted");

    Ok(StatusCode::NO_CONTENT)
}
