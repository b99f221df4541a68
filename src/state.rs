//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado mutable en proceso: todo vive
//! en el almacenamiento detrás de los repositorios.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    ClientRepository, MemoryStore, PgClientRepository, PgSaleRepository, PgVehicleRepository,
    SaleRepository, VehicleRepository,
};
use crate::services::SaleService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub sales: SaleService,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config,
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            sales: SaleService::new(Arc::new(PgSaleRepository::new(pool))),
        }
    }

    pub fn in_memory(store: MemoryStore, config: EnvironmentConfig) -> Self {
        let sales: Arc<dyn SaleRepository> = Arc::new(store.clone());
        Self {
            config,
            vehicles: Arc::new(store.clone()),
            clients: Arc::new(store),
            sales: SaleService::new(sales),
        }
    }
}
