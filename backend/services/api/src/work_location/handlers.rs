use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use wellbeing_common::error::WellbeingError;

use crate::error::ApiError;
use crate::work_location::requests::AccessImpactQuery;
use crate::work_location::shaping::{render_impact, shape_impacts};
use crate::AppState;

pub async fn list_impacts(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let store = state.store.get()?;
    let options = state.work_location;
    let rows = store.work_locations.list_impacts(options.sorted).await?;
    Ok(Json(shape_impacts(rows, options.coerce_numeric)))
}

pub async fn get_access_impact(
    State(state): State<AppState>,
    Query(query): Query<AccessImpactQuery>,
) -> Result<Json<Value>, ApiError> {
    let location = query.location()?;
    let store = state.store.get()?;
    let row = store
        .work_locations
        .get_by_location(location)
        .await?
        .ok_or_else(|| {
            WellbeingError::NotFound(format!("No work-location impact found for {location}"))
        })?;

    Ok(Json(render_impact(row, true)))
}
