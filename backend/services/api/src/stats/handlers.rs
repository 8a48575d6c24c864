use axum::extract::State;
use axum::Json;
use serde_json::Value;
use wellbeing_common::error::WellbeingError;
use wellbeing_db::convert::document_to_json;

use crate::error::ApiError;
use crate::AppState;

/// The `live_counts` snapshot exactly as the pipeline stored it.
pub async fn get_live_counts(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let store = state.store.get()?;
    let doc = store
        .stats
        .get_live_counts()
        .await?
        .ok_or_else(|| WellbeingError::NotFound("No stats found".to_string()))?;

    Ok(Json(document_to_json(doc)))
}
