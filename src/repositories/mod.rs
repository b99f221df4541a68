//! Repositorios (gateway de almacenamiento)
//!
//! Los traits de este módulo son el contrato que la capa de servicios
//! consume. Existen dos implementaciones: PostgreSQL (`Pg*Repository`) y
//! una en memoria (`MemoryStore`) para desarrollo y tests.

use async_trait::async_trait;

use crate::models::{Client, NewClient, NewSale, NewVehicle, Sale, SaleWithDetails, Vehicle};
use crate::utils::errors::AppResult;

pub mod client_repository;
pub mod memory_repository;
pub mod sale_repository;
pub mod vehicle_repository;

pub use client_repository::PgClientRepository;
pub use memory_repository::MemoryStore;
pub use sale_repository::PgSaleRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    /// Reemplaza todos los campos. `Ok(None)` si el vehículo no existe.
    /// Falla con `Conflict` si se intenta marcar como disponible un
    /// vehículo que ya tiene una venta.
    async fn update(&self, id: i64, vehicle: NewVehicle) -> AppResult<Option<Vehicle>>;

    /// `Ok(false)` si no existía. Falla con `Conflict` si tiene una venta.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: NewClient) -> AppResult<Client>;

    async fn find_all(&self) -> AppResult<Vec<Client>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Client>>;

    async fn update(&self, id: i64, client: NewClient) -> AppResult<Option<Client>>;

    /// `Ok(false)` si no existía. Falla con `Conflict` si tiene ventas.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Abre una unidad de trabajo atómica para registrar una venta
    async fn begin(&self) -> AppResult<Box<dyn SaleUnitOfWork>>;

    /// Todas las ventas con detalles, de la más reciente a la más antigua
    async fn find_all_with_details(&self) -> AppResult<Vec<SaleWithDetails>>;

    async fn find_with_details_by_id(&self, id: i64) -> AppResult<Option<SaleWithDetails>>;
}

/// Operaciones de una venta dentro de una transacción.
///
/// Nada de lo escrito es visible para otros hasta `commit`. Si la unidad se
/// descarta sin `commit` (por ejemplo al propagar un error con `?`), todos
/// los cambios se deshacen.
#[async_trait]
pub trait SaleUnitOfWork: Send {
    async fn sale_exists_for_vehicle(&mut self, vehicle_id: i64) -> AppResult<bool>;

    /// Lee el vehículo bloqueándolo hasta el fin de la transacción
    async fn find_vehicle_for_update(&mut self, vehicle_id: i64) -> AppResult<Option<Vehicle>>;

    async fn find_client(&mut self, client_id: i64) -> AppResult<Option<Client>>;

    async fn insert_sale(&mut self, sale: NewSale) -> AppResult<Sale>;

    /// Compare-and-swap de `status` a "sold"; `Ok(false)` si ya lo estaba
    /// o si el vehículo desapareció.
    async fn mark_vehicle_sold(&mut self, vehicle_id: i64) -> AppResult<bool>;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
