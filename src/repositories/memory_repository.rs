//! Almacenamiento en memoria
//!
//! Implementa los mismos contratos que los repositorios PostgreSQL, con las
//! mismas restricciones (UNIQUE sobre `sales.vehicle_id`, claves foráneas sin
//! cascada). Una unidad de trabajo toma el lock exclusivo de las tablas y
//! trabaja sobre una copia; `commit` la publica y descartarla la olvida.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{ClientRepository, SaleRepository, SaleUnitOfWork, VehicleRepository};
use crate::models::{
    Client, NewClient, NewSale, NewVehicle, Sale, SaleWithDetails, Vehicle, VehicleStatus,
};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
struct Tables {
    vehicles: BTreeMap<i64, Vehicle>,
    clients: BTreeMap<i64, Client>,
    sales: BTreeMap<i64, Sale>,
    last_vehicle_id: i64,
    last_client_id: i64,
    last_sale_id: i64,
}

impl Tables {
    fn vehicle_has_sale(&self, vehicle_id: i64) -> bool {
        self.sales.values().any(|s| s.vehicle_id == vehicle_id)
    }

    fn client_has_sales(&self, client_id: i64) -> bool {
        self.sales.values().any(|s| s.client_id == client_id)
    }

    fn details(&self, sale: &Sale) -> Option<SaleWithDetails> {
        let client = self.clients.get(&sale.client_id)?;
        let vehicle = self.vehicles.get(&sale.vehicle_id)?;
        Some(SaleWithDetails {
            id: sale.id,
            price: sale.price,
            sale_date: sale.sale_date,
            client: client.clone(),
            vehicle: vehicle.clone(),
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.lock().await;
        tables.last_vehicle_id += 1;
        let vehicle = vehicle.into_vehicle(tables.last_vehicle_id);
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.lock().await;
        Ok(tables.vehicles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.lock().await;
        Ok(tables.vehicles.get(&id).cloned())
    }

    async fn update(&self, id: i64, vehicle: NewVehicle) -> AppResult<Option<Vehicle>> {
        let mut tables = self.tables.lock().await;
        if !tables.vehicles.contains_key(&id) {
            return Ok(None);
        }
        if vehicle.status == VehicleStatus::Available && tables.vehicle_has_sale(id) {
            return Err(AppError::Conflict(format!(
                "Vehicle {} has a sale and cannot be marked as available",
                id
            )));
        }

        let vehicle = vehicle.into_vehicle(id);
        tables.vehicles.insert(id, vehicle.clone());
        Ok(Some(vehicle))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.vehicle_has_sale(id) {
            return Err(AppError::Conflict(format!(
                "Vehicle {} has a sale and cannot be deleted",
                id
            )));
        }
        Ok(tables.vehicles.remove(&id).is_some())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create(&self, client: NewClient) -> AppResult<Client> {
        let mut tables = self.tables.lock().await;
        tables.last_client_id += 1;
        let client = client.into_client(tables.last_client_id);
        tables.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn find_all(&self) -> AppResult<Vec<Client>> {
        let tables = self.tables.lock().await;
        Ok(tables.clients.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Client>> {
        let tables = self.tables.lock().await;
        Ok(tables.clients.get(&id).cloned())
    }

    async fn update(&self, id: i64, client: NewClient) -> AppResult<Option<Client>> {
        let mut tables = self.tables.lock().await;
        match tables.clients.get_mut(&id) {
            Some(existing) => {
                *existing = client.into_client(id);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.client_has_sales(id) {
            return Err(AppError::Conflict(format!(
                "Client {} has sales and cannot be deleted",
                id
            )));
        }
        Ok(tables.clients.remove(&id).is_some())
    }
}

#[async_trait]
impl SaleRepository for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn SaleUnitOfWork>> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = (*guard).clone();
        Ok(Box::new(MemorySaleUnitOfWork { guard, staged }))
    }

    async fn find_all_with_details(&self) -> AppResult<Vec<SaleWithDetails>> {
        let tables = self.tables.lock().await;
        let mut sales: Vec<SaleWithDetails> =
            tables.sales.values().filter_map(|s| tables.details(s)).collect();
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date).then(b.id.cmp(&a.id)));
        Ok(sales)
    }

    async fn find_with_details_by_id(&self, id: i64) -> AppResult<Option<SaleWithDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables.sales.get(&id).and_then(|s| tables.details(s)))
    }
}

pub struct MemorySaleUnitOfWork {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

#[async_trait]
impl SaleUnitOfWork for MemorySaleUnitOfWork {
    async fn sale_exists_for_vehicle(&mut self, vehicle_id: i64) -> AppResult<bool> {
        Ok(self.staged.vehicle_has_sale(vehicle_id))
    }

    async fn find_vehicle_for_update(&mut self, vehicle_id: i64) -> AppResult<Option<Vehicle>> {
        Ok(self.staged.vehicles.get(&vehicle_id).cloned())
    }

    async fn find_client(&mut self, client_id: i64) -> AppResult<Option<Client>> {
        Ok(self.staged.clients.get(&client_id).cloned())
    }

    async fn insert_sale(&mut self, sale: NewSale) -> AppResult<Sale> {
        if self.staged.vehicle_has_sale(sale.vehicle_id) {
            return Err(AppError::VehicleAlreadySold {
                vehicle_id: sale.vehicle_id,
            });
        }
        if !self.staged.clients.contains_key(&sale.client_id) {
            return Err(AppError::ClientNotFound {
                client_id: sale.client_id,
            });
        }
        if !self.staged.vehicles.contains_key(&sale.vehicle_id) {
            return Err(AppError::VehicleNotFound {
                vehicle_id: sale.vehicle_id,
            });
        }

        self.staged.last_sale_id += 1;
        let sale = sale.into_sale(self.staged.last_sale_id);
        self.staged.sales.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn mark_vehicle_sold(&mut self, vehicle_id: i64) -> AppResult<bool> {
        match self.staged.vehicles.get_mut(&vehicle_id) {
            Some(vehicle) if vehicle.status != VehicleStatus::Sold => {
                vehicle.status = VehicleStatus::Sold;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemorySaleUnitOfWork { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}
