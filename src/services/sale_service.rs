//! Servicio de ventas
//!
//! Registra una venta solo si sus invariantes se cumplen y marca el vehículo
//! como vendido en la misma transacción. Pasos, en orden:
//!
//! 1. ¿Existe ya una venta para el vehículo? -> `VehicleAlreadySold`
//! 2. El vehículo existe (bloqueado hasta el commit) y no está "sold"
//! 3. El cliente existe
//! 4. Insertar la venta con `sale_date` = ahora
//! 5. Compare-and-swap del estado del vehículo a "sold"
//!
//! Cualquier fallo descarta la unidad de trabajo y deshace la inserción.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::{NewSale, Sale, SaleWithDetails};
use crate::repositories::{SaleRepository, SaleUnitOfWork};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct SaleService {
    repository: Arc<dyn SaleRepository>,
}

impl SaleService {
    pub fn new(repository: Arc<dyn SaleRepository>) -> Self {
        Self { repository }
    }

    /// Registra una venta. Sin reintentos: una llamada, un intento.
    pub async fn create_sale(
        &self,
        client_id: i64,
        vehicle_id: i64,
        price: Decimal,
    ) -> AppResult<Sale> {
        debug!(
            "🧾 Iniciando venta: client_id={}, vehicle_id={}, price={}",
            client_id, vehicle_id, price
        );

        let mut uow = self.repository.begin().await?;

        let outcome = Self::run_sale(&mut *uow, client_id, vehicle_id, price).await;
        match outcome {
            Ok(sale) => {
                uow.commit().await?;
                info!(
                    "✅ Venta {} registrada: vehicle {} vendido a client {}",
                    sale.id, vehicle_id, client_id
                );
                Ok(sale)
            }
            Err(e) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!("⚠️ Error en rollback de la venta: {}", rollback_err);
                }
                warn!("❌ Venta rechazada para vehicle {}: {}", vehicle_id, e);
                Err(e)
            }
        }
    }

    async fn run_sale(
        uow: &mut dyn SaleUnitOfWork,
        client_id: i64,
        vehicle_id: i64,
        price: Decimal,
    ) -> AppResult<Sale> {
        if uow.sale_exists_for_vehicle(vehicle_id).await? {
            debug!("Vehicle {} ya tiene una venta", vehicle_id);
            return Err(AppError::VehicleAlreadySold { vehicle_id });
        }

        let vehicle = uow
            .find_vehicle_for_update(vehicle_id)
            .await?
            .ok_or(AppError::VehicleNotFound { vehicle_id })?;

        // Segunda comprobación sobre el mismo hecho: el estado del vehículo
        if vehicle.is_sold() {
            debug!("Vehicle {} ya tiene status 'sold'", vehicle_id);
            return Err(AppError::VehicleAlreadySold { vehicle_id });
        }

        uow.find_client(client_id)
            .await?
            .ok_or(AppError::ClientNotFound { client_id })?;

        let sale = uow
            .insert_sale(NewSale {
                client_id,
                vehicle_id,
                price,
                sale_date: Utc::now(),
            })
            .await?;
        debug!("Sale {} insertada, actualizando estado del vehículo", sale.id);

        if !uow.mark_vehicle_sold(vehicle_id).await? {
            return Err(AppError::VehicleAlreadySold { vehicle_id });
        }

        Ok(sale)
    }

    pub async fn list_sales_with_details(&self) -> AppResult<Vec<SaleWithDetails>> {
        self.repository.find_all_with_details().await
    }

    pub async fn get_sale_with_details(&self, id: i64) -> AppResult<SaleWithDetails> {
        self.repository
            .find_with_details_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Sale", id))
    }
}
