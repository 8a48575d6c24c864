use axum::extract::State;
use axum::Json;
use serde_json::Value;
use wellbeing_db::convert::document_to_json;

use crate::error::ApiError;
use crate::AppState;

pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let store = state.store.get()?;
    let rows = store.alerts.list_alerts().await?;
    Ok(Json(rows.into_iter().map(document_to_json).collect()))
}
