//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! a las tablas `vehicles`, `clients` y `sales`.

pub mod client;
pub mod sale;
pub mod vehicle;

pub use client::{Client, NewClient};
pub use sale::{NewSale, Sale, SaleWithDetails};
pub use vehicle::{NewVehicle, Vehicle, VehicleStatus};
