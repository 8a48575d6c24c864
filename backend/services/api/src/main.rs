mod alerts;
mod error;
mod state;
mod stats;
mod work_location;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use wellbeing_common::types::ServiceInfo;
use wellbeing_config::{init_tracing, AppConfig, CollectionNames, MongoConfig, WorkLocationOptions};
use wellbeing_db::Store;

use crate::state::StoreSlot;

const SERVICE_NAME: &str = "wellbeing-api";

#[derive(Clone)]
pub struct AppState {
    pub store: StoreSlot,
    pub work_location: WorkLocationOptions,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(store: StoreSlot, work_location: WorkLocationOptions) -> Self {
        Self {
            store,
            work_location,
            info: Arc::new(ServiceInfo::new(SERVICE_NAME)),
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let store = if state.store.is_ready() {
        "ready"
    } else {
        "starting"
    };
    Json(serde_json::json!({ "status": "ok", "store": store }))
}

async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "# HELP wellbeing_up Service up indicator\n\
# TYPE wellbeing_up gauge\n\
wellbeing_up 1\n\
# HELP wellbeing_info Service info\n\
# TYPE wellbeing_info gauge\n\
wellbeing_info{{service=\"{SERVICE_NAME}\",version=\"{}\"}} 1\n\
# HELP wellbeing_store_ready Whether the analytics store connection is published\n\
# TYPE wellbeing_store_ready gauge\n\
wellbeing_store_ready {}\n",
        state.info.version,
        u8::from(state.store.is_ready()),
    );

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .merge(stats::router())
        .merge(alerts::router())
        .merge(work_location::router())
        .layer(cors)
        .with_state(state)
}

/// Connects in the background and publishes the store once; data routes
/// answer "DB not initialized" until then, or for good if this gives up.
async fn connect_store(mongo: MongoConfig, collections: CollectionNames, slot: StoreSlot) {
    match wellbeing_db::connect(&mongo).await {
        Ok(db) => {
            if slot.publish(Store::mongo(&db, &collections)) {
                tracing::info!(
                    stats = %collections.stats,
                    alerts = %collections.alerts,
                    work_location = %collections.work_location,
                    "store ready"
                );
            } else {
                tracing::warn!("store already published; ignoring new connection");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "database unavailable; data routes will return 500");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);
    tracing::info!(service = SERVICE_NAME, "starting");

    let slot = StoreSlot::empty();
    let state = AppState::new(slot.clone(), config.work_location);
    let app = build_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    tokio::spawn(connect_store(
        config.mongo.clone(),
        config.collections.clone(),
        slot,
    ));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("stopped");
    Ok(())
}
