pub mod handlers;
pub mod requests;
pub mod shaping;

use axum::routing::get;
use axum::Router;

use crate::AppState;

/// `/api/work-mode` is the older name for the same listing.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/work-location-impact", get(handlers::list_impacts))
        .route("/api/work-mode", get(handlers::list_impacts))
        .route("/api/access-impact", get(handlers::get_access_impact))
}
