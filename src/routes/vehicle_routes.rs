use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::{parse_body, parse_id};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{VehicleMessageResponse, VehicleRequest};
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleMessageResponse>), AppError> {
    let request = parse_body(payload)?;
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    Ok(Json(controller.list().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let id = parse_id(id, "vehicle")?;
    let controller = VehicleController::new(state.vehicles.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<Json<VehicleMessageResponse>, AppError> {
    let id = parse_id(id, "vehicle")?;
    let request = parse_body(payload)?;
    let controller = VehicleController::new(state.vehicles.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(id, "vehicle")?;
    let controller = VehicleController::new(state.vehicles.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Vehicle deleted successfully!"
    })))
}
