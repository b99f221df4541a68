//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y los validadores comunes.

pub mod errors;
pub mod validation;
