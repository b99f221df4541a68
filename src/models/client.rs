//! Modelo de Client - mapea a la tabla `clients`

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: i64,
}

/// Datos de un cliente sin identificador
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: i64,
}

impl NewClient {
    pub fn into_client(self, id: i64) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}
