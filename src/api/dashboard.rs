//! Landing page

use axum::{extract::State, response::Html};
use serde_json::json;

use crate::{error::AppResult, AppState};

/// Render the catalog counts. A failed count shows an error indicator
/// instead of the numbers; the page itself still renders.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = match state.services.dashboard.counts().await {
        Ok(counts) => json!({ "title": "Local Library Home", "error": false, "data": counts }),
        Err(e) => {
            tracing::error!("Failed to load catalog counts: {}", e);
            json!({ "title": "Local Library Home", "error": true })
        }
    };
    state.views.render("index", &page)
}
