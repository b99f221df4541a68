//! Modelo de Sale
//!
//! Una venta enlaza un cliente con un vehículo. Es inmutable una vez creada
//! y como máximo existe una venta por vehículo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::{Client, Vehicle};

/// Sale - mapea a la tabla sales
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Sale {
    pub id: i64,
    pub client_id: i64,
    pub vehicle_id: i64,
    pub price: Decimal,
    pub sale_date: DateTime<Utc>,
}

/// Venta pendiente de insertar; `sale_date` lo asigna el servidor
#[derive(Debug, Clone)]
pub struct NewSale {
    pub client_id: i64,
    pub vehicle_id: i64,
    pub price: Decimal,
    pub sale_date: DateTime<Utc>,
}

impl NewSale {
    pub fn into_sale(self, id: i64) -> Sale {
        Sale {
            id,
            client_id: self.client_id,
            vehicle_id: self.vehicle_id,
            price: self.price,
            sale_date: self.sale_date,
        }
    }
}

/// Proyección de solo lectura: venta con su cliente y vehículo embebidos
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaleWithDetails {
    pub id: i64,
    pub price: Decimal,
    pub sale_date: DateTime<Utc>,
    pub client: Client,
    pub vehicle: Vehicle,
}
