use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppResult};

pub mod client_routes;
pub mod sale_routes;
pub mod vehicle_routes;

/// Construir el router completo de la API
pub fn create_router(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .merge(vehicle_routes::create_vehicle_router())
        .merge(client_routes::create_client_router())
        .merge(sale_routes::create_sale_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// Los extractores de axum responden 422/400 en texto plano; aquí se
// convierten en AppError para que todo error salga en JSON con 400.
pub(crate) fn parse_id(
    id: Result<Path<i64>, PathRejection>,
    resource: &str,
) -> AppResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|_| bad_request_error(&format!("Could not parse {} id.", resource)))
}

pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            tracing::debug!("JSON binding error: {}", rejection.body_text());
            bad_request_error("Could not parse request data.")
        })
}
