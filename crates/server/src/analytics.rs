//! Analytics API endpoints

use api_types::analytics::{Analytics, CategoryTotal, MonthlyTotal};
use axum::{Json, extract::State};

use crate::{expenses::map_expense, server::ServerState};

fn map_category(total: engine::CategoryTotal) -> CategoryTotal {
    CategoryTotal {
        category: total.category.as_str().to_string(),
        total: total.total.to_major(),
    }
}

/// Handle requests for monthly and category summaries
pub async fn get_analytics(State(state): State<ServerState>) -> Json<Analytics> {
    let expenses = state.snapshot().await;
    let analytics = engine::aggregate(&expenses);

    Json(Analytics {
        monthly: analytics
            .monthly
            .iter()
            .map(|m| MonthlyTotal {
                month: m.label(),
                total: m.total.to_major(),
            })
            .collect(),
        category_summary: analytics
            .category_summary
            .into_iter()
            .map(map_category)
            .collect(),
        top_categories: analytics
            .top_categories
            .into_iter()
            .map(map_category)
            .collect(),
        top_transactions: analytics
            .top_transactions
            .into_iter()
            .map(map_expense)
            .collect(),
    })
}
