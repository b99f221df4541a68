use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Sale;
use crate::utils::validation::validate_positive_price;

// Request para registrar una venta. La fecha nunca viene del cliente:
// cualquier `sale_date` en el body se ignora.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleRequest {
    #[validate(range(min = 1))]
    pub client_id: i64,

    #[validate(range(min = 1))]
    pub vehicle_id: i64,

    #[validate(custom = "validate_positive_price")]
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SaleCreatedResponse {
    pub message: String,
    pub sale: Sale,
}
