//! Balance and settlement API endpoints
//!
//! Everything is recomputed from a fresh snapshot on each request.

use api_types::settlement::{BalancesView, SettlementView};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_balances(balances: engine::Balances) -> BalancesView {
    BalancesView(
        balances
            .into_iter()
            .map(|b| (b.participant, b.amount.to_major()))
            .collect(),
    )
}

/// Handle requests for the net balance of every person
pub async fn balances(State(state): State<ServerState>) -> Json<BalancesView> {
    let expenses = state.snapshot().await;
    Json(map_balances(engine::compute_balances(&expenses)))
}

/// Handle requests for the suggested payments
pub async fn settlements(
    State(state): State<ServerState>,
) -> Result<Json<Vec<SettlementView>>, ServerError> {
    let expenses = state.snapshot().await;
    let balances = engine::compute_balances(&expenses);
    let settlements = engine::simplify(&balances)?;

    Ok(Json(
        settlements
            .into_iter()
            .map(|s| SettlementView {
                from: s.from,
                to: s.to,
                amount: s.amount.to_major(),
            })
            .collect(),
    ))
}

/// Handle requests for everyone involved in any expense
pub async fn people(State(state): State<ServerState>) -> Json<Vec<String>> {
    let expenses = state.snapshot().await;
    Json(engine::people(&expenses))
}
