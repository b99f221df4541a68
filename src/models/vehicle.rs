//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su estado de disponibilidad.
//! Mapea exactamente a la tabla `vehicles`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Estado del vehículo - columna `status` (TEXT con CHECK)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Sold => "sold",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown vehicle status '{0}'")]
pub struct UnknownVehicleStatus(pub String);

impl TryFrom<String> for VehicleStatus {
    type Error = UnknownVehicleStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "available" => Ok(VehicleStatus::Available),
            "sold" => Ok(VehicleStatus::Sold),
            _ => Err(UnknownVehicleStatus(value)),
        }
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub motor: String,
    #[sqlx(try_from = "String")]
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn is_sold(&self) -> bool {
        self.status == VehicleStatus::Sold
    }
}

/// Datos de un vehículo sin identificador (insert y reemplazo completo)
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub motor: String,
    pub status: VehicleStatus,
}

impl NewVehicle {
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            vehicle_type: self.vehicle_type,
            brand: self.brand,
            model: self.model,
            year: self.year,
            motor: self.motor,
            status: self.status,
        }
    }
}
