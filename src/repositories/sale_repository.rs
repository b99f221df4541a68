//! Repositorio de ventas sobre PostgreSQL
//!
//! La unidad de trabajo envuelve una `sqlx::Transaction`: si se descarta
//! sin `commit`, sqlx emite el ROLLBACK al devolver la conexión al pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::debug;

use super::vehicle_repository::VEHICLE_COLUMNS;
use super::{SaleRepository, SaleUnitOfWork};
use crate::models::{Client, NewSale, Sale, SaleWithDetails, Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

const SALE_DETAILS_SELECT: &str = r#"
    SELECT
        s.id AS sale_id, s.price, s.sale_date,
        c.id AS client_id, c.name AS client_name, c.email AS client_email, c.phone AS client_phone,
        v.id AS vehicle_id, v.type AS vehicle_type, v.brand AS vehicle_brand,
        v.model AS vehicle_model, v.year AS vehicle_year, v.motor AS vehicle_motor,
        v.status AS vehicle_status
    FROM sales s
    JOIN clients c ON s.client_id = c.id
    JOIN vehicles v ON s.vehicle_id = v.id
"#;

// Fila plana del JOIN sales + clients + vehicles
#[derive(Debug, FromRow)]
struct SaleDetailsRow {
    sale_id: i64,
    price: Decimal,
    sale_date: DateTime<Utc>,
    client_id: i64,
    client_name: String,
    client_email: String,
    client_phone: i64,
    vehicle_id: i64,
    vehicle_type: String,
    vehicle_brand: String,
    vehicle_model: String,
    vehicle_year: i32,
    vehicle_motor: String,
    #[sqlx(try_from = "String")]
    vehicle_status: VehicleStatus,
}

impl From<SaleDetailsRow> for SaleWithDetails {
    fn from(row: SaleDetailsRow) -> Self {
        Self {
            id: row.sale_id,
            price: row.price,
            sale_date: row.sale_date,
            client: Client {
                id: row.client_id,
                name: row.client_name,
                email: row.client_email,
                phone: row.client_phone,
            },
            vehicle: Vehicle {
                id: row.vehicle_id,
                vehicle_type: row.vehicle_type,
                brand: row.vehicle_brand,
                model: row.vehicle_model,
                year: row.vehicle_year,
                motor: row.vehicle_motor,
                status: row.vehicle_status,
            },
        }
    }
}

pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn begin(&self) -> AppResult<Box<dyn SaleUnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSaleUnitOfWork { tx }))
    }

    async fn find_all_with_details(&self) -> AppResult<Vec<SaleWithDetails>> {
        let rows = sqlx::query_as::<_, SaleDetailsRow>(&format!(
            "{SALE_DETAILS_SELECT} ORDER BY s.sale_date DESC, s.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SaleWithDetails::from).collect())
    }

    async fn find_with_details_by_id(&self, id: i64) -> AppResult<Option<SaleWithDetails>> {
        let row = sqlx::query_as::<_, SaleDetailsRow>(&format!(
            "{SALE_DETAILS_SELECT} WHERE s.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SaleWithDetails::from))
    }
}

pub struct PgSaleUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SaleUnitOfWork for PgSaleUnitOfWork {
    async fn sale_exists_for_vehicle(&mut self, vehicle_id: i64) -> AppResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE vehicle_id = $1)")
                .bind(vehicle_id)
                .fetch_one(&mut *self.tx)
                .await?;

        Ok(exists)
    }

    async fn find_vehicle_for_update(&mut self, vehicle_id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1 FOR UPDATE"
        ))
        .bind(vehicle_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(vehicle)
    }

    async fn find_client(&mut self, client_id: i64) -> AppResult<Option<Client>> {
        // FOR KEY SHARE impide borrar el cliente antes del commit
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone FROM clients WHERE id = $1 FOR KEY SHARE",
        )
        .bind(client_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(client)
    }

    async fn insert_sale(&mut self, sale: NewSale) -> AppResult<Sale> {
        let vehicle_id = sale.vehicle_id;
        let client_id = sale.client_id;

        let result = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (client_id, vehicle_id, price, sale_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, client_id, vehicle_id, price, sale_date
            "#,
        )
        .bind(sale.client_id)
        .bind(sale.vehicle_id)
        .bind(sale.price)
        .bind(sale.sale_date)
        .fetch_one(&mut *self.tx)
        .await;

        match result {
            Ok(sale) => {
                debug!("Sale {} insertada para vehicle {}", sale.id, vehicle_id);
                Ok(sale)
            }
            Err(e) => {
                let e = AppError::from(e);
                if e.is_unique_violation() {
                    Err(AppError::VehicleAlreadySold { vehicle_id })
                } else if e.is_foreign_key_violation() {
                    Err(AppError::ClientNotFound { client_id })
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn mark_vehicle_sold(&mut self, vehicle_id: i64) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE vehicles SET status = 'sold' WHERE id = $1 AND status <> 'sold'")
                .bind(vehicle_id)
                .execute(&mut *self.tx)
                .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
