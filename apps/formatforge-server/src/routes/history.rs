//! Conversion history API

use axum::{extract::State, routing::get, Json, Router};

use crate::db::{ConversionEvent, HistoryRepository};
use crate::error::Result;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/history", get(list_history))
}

/// GET /history
///
/// Every record, newest first. Unpaginated.
async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<ConversionEvent>>> {
    let events = HistoryRepository::new(state.db()).list().await?;
    Ok(Json(events))
}
