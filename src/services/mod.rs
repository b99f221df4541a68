//! Servicios de negocio
//!
//! Solo las ventas tienen reglas propias; vehículos y clientes son CRUD
//! directo sobre sus repositorios.

pub mod sale_service;

pub use sale_service::SaleService;
