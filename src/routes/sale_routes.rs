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
use crate::controllers::sale_controller::SaleController;
use crate::dto::sale_dto::{CreateSaleRequest, SaleCreatedResponse};
use crate::models::SaleWithDetails;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Las ventas no se actualizan ni se borran: solo alta y consulta
pub fn create_sale_router() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales).post(create_sale))
        .route("/sales/:id", get(get_sale))
}

async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaleCreatedResponse>), AppError> {
    let request = parse_body(payload)?;
    let controller = SaleController::new(state.sales.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_sales(
    State(state): State<AppState>,
) -> Result<Json<Vec<SaleWithDetails>>, AppError> {
    let controller = SaleController::new(state.sales.clone());
    Ok(Json(controller.list().await?))
}

async fn get_sale(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SaleWithDetails>, AppError> {
    let id = parse_id(id, "sale")?;
    let controller = SaleController::new(state.sales.clone());
    Ok(Json(controller.get_by_id(id).await?))
}
