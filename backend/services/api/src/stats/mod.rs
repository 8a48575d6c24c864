pub mod handlers;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(handlers::get_live_counts))
}
