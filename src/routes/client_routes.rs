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
use crate::controllers::client_controller::ClientController;
use crate::dto::client_dto::{ClientMessageResponse, ClientRequest};
use crate::models::Client;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClientMessageResponse>), AppError> {
    let request = parse_body(payload)?;
    let controller = ClientController::new(state.clients.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, AppError> {
    let controller = ClientController::new(state.clients.clone());
    Ok(Json(controller.list().await?))
}

async fn get_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Client>, AppError> {
    let id = parse_id(id, "client")?;
    let controller = ClientController::new(state.clients.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Result<Json<ClientMessageResponse>, AppError> {
    let id = parse_id(id, "client")?;
    let request = parse_body(payload)?;
    let controller = ClientController::new(state.clients.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(id, "client")?;
    let controller = ClientController::new(state.clients.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Client deleted successfully!"
    })))
}
