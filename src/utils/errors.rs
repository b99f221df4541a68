//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Código SQLSTATE de PostgreSQL para violación de UNIQUE
const PG_UNIQUE_VIOLATION: &str = "23505";
/// Código SQLSTATE de PostgreSQL para violación de FOREIGN KEY
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Vehicle {vehicle_id} not found")]
    VehicleNotFound { vehicle_id: i64 },

    #[error("Client {client_id} not found")]
    ClientNotFound { client_id: i64 },

    #[error("Vehicle {vehicle_id} is already sold")]
    VehicleAlreadySold { vehicle_id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Indica si el error viene de una restricción UNIQUE de la base de datos
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(PG_UNIQUE_VIOLATION)
    }

    /// Indica si el error viene de una restricción FOREIGN KEY de la base de datos
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION)
    }

    fn sqlstate(&self) -> Option<String> {
        match self {
            AppError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|code| code.into_owned())
            }
            _ => None,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_id: Option<i64>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
            vehicle_id: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("💥 Database error: {}", e);
                let mut body = ErrorResponse::new(
                    "Database Error",
                    "An error occurred while accessing the database".to_string(),
                    "DB_ERROR",
                );
                body.details = Some(json!({ "sql_error": e.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                let mut body = ErrorResponse::new(
                    "Validation Error",
                    "The provided data is invalid".to_string(),
                    "VALIDATION_ERROR",
                );
                body.details = Some(json!(e));
                (StatusCode::BAD_REQUEST, body)
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
                )
            }

            AppError::VehicleNotFound { vehicle_id } => {
                warn!("🔍 Vehicle {} not found", vehicle_id);
                let mut body = ErrorResponse::new(
                    "Not Found",
                    format!("Vehicle with id '{}' not found", vehicle_id),
                    "VEHICLE_NOT_FOUND",
                );
                body.vehicle_id = Some(vehicle_id);
                (StatusCode::NOT_FOUND, body)
            }

            AppError::ClientNotFound { client_id } => {
                warn!("🔍 Client {} not found", client_id);
                let mut body = ErrorResponse::new(
                    "Not Found",
                    format!("Client with id '{}' not found", client_id),
                    "CLIENT_NOT_FOUND",
                );
                body.details = Some(json!({ "client_id": client_id }));
                (StatusCode::NOT_FOUND, body)
            }

            AppError::VehicleAlreadySold { vehicle_id } => {
                warn!("🚫 Vehicle {} is already sold", vehicle_id);
                let mut body = ErrorResponse::new(
                    "Conflict",
                    "Vehicle is already sold".to_string(),
                    "VEHICLE_ALREADY_SOLD",
                );
                body.vehicle_id = Some(vehicle_id);
                (StatusCode::CONFLICT, body)
            }

            AppError::Conflict(msg) => {
                warn!("🚫 Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Conflict", msg, "CONFLICT"),
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
