use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::VehicleRepository;
use crate::models::{NewVehicle, Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

pub(crate) const VEHICLE_COLUMNS: &str = "id, type, brand, model, year, motor, status";

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (type, brand, model, year, motor, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vehicle.vehicle_type)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.motor)
        .bind(vehicle.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        debug!("Vehicle {} insertado", vehicle.id);
        Ok(vehicle)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn update(&self, id: i64, vehicle: NewVehicle) -> AppResult<Option<Vehicle>> {
        let mut tx = self.pool.begin().await?;

        // Bloquear la fila para serializar con una venta concurrente
        let current: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if current.is_none() {
            return Ok(None);
        }

        if vehicle.status == VehicleStatus::Available {
            let (has_sale,): (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE vehicle_id = $1)")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
            if has_sale {
                return Err(AppError::Conflict(format!(
                    "Vehicle {} has a sale and cannot be marked as available",
                    id
                )));
            }
        }

        let updated = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET type = $2, brand = $3, model = $4, year = $5, motor = $6, status = $7
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.motor)
        .bind(vehicle.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    AppError::Conflict(format!("Vehicle {} has a sale and cannot be deleted", id))
                } else {
                    e
                }
            })?;

        Ok(result.rows_affected() > 0)
    }
}
