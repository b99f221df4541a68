use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NewVehicle, Vehicle, VehicleStatus};
use crate::utils::validation::validate_not_blank;

// Request para crear o reemplazar un vehículo (todos los campos requeridos)
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    #[serde(rename = "type")]
    #[validate(custom = "validate_not_blank")]
    pub vehicle_type: String,

    #[validate(custom = "validate_not_blank")]
    pub brand: String,

    #[validate(custom = "validate_not_blank")]
    pub model: String,

    #[validate(range(min = 1))]
    pub year: i32,

    #[validate(custom = "validate_not_blank")]
    pub motor: String,

    pub status: VehicleStatus,
}

impl From<VehicleRequest> for NewVehicle {
    fn from(request: VehicleRequest) -> Self {
        Self {
            vehicle_type: request.vehicle_type,
            brand: request.brand,
            model: request.model,
            year: request.year,
            motor: request.motor,
            status: request.status,
        }
    }
}

// Response tras crear o actualizar
#[derive(Debug, Serialize)]
pub struct VehicleMessageResponse {
    pub message: String,
    pub vehicle: Vehicle,
}
