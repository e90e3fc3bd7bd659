use axum::{
    Router,
    routing::{get, put},
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use std::sync::Arc;

use crate::{ExpenseStore, analytics, expenses, settlements};

#[derive(Clone, Default)]
pub struct ServerState {
    pub store: Arc<RwLock<ExpenseStore>>,
}

impl ServerState {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Copy of the stored expenses; computations run after the lock is released.
    pub(crate) async fn snapshot(&self) -> Vec<engine::Expense> {
        self.store.read().await.snapshot()
    }
}

async fn health() -> &'static str {
    "server is running"
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/{id}",
            put(expenses::update).delete(expenses::delete),
        )
        .route("/api/settlements", get(settlements::settlements))
        .route("/api/settlements/balances", get(settlements::balances))
        .route("/api/settlements/people", get(settlements::people))
        .route("/api/analytics", get(analytics::get_analytics))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
