//! Stand Automóvel - backend REST del concesionario
//!
//! Gestiona vehículos, clientes y ventas. La única pieza con reglas propias
//! es el registro de ventas (`services::sale_service`).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
