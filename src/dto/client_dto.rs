use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Client, NewClient};
use crate::utils::validation::validate_not_blank;

// Request para crear o reemplazar un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct ClientRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(range(min = 1))]
    pub phone: i64,
}

impl From<ClientRequest> for NewClient {
    fn from(request: ClientRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientMessageResponse {
    pub message: String,
    pub client: Client,
}
