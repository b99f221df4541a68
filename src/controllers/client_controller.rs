use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::client_dto::{ClientMessageResponse, ClientRequest};
use crate::models::Client;
use crate::repositories::ClientRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ClientController {
    repository: Arc<dyn ClientRepository>,
}

impl ClientController {
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: ClientRequest) -> AppResult<ClientMessageResponse> {
        request.validate()?;

        let client = self.repository.create(request.into()).await?;
        info!("👤 Cliente {} creado", client.id);

        Ok(ClientMessageResponse {
            message: "Client created!".to_string(),
            client,
        })
    }

    pub async fn list(&self) -> AppResult<Vec<Client>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Client> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Client", id))
    }

    pub async fn update(&self, id: i64, request: ClientRequest) -> AppResult<ClientMessageResponse> {
        request.validate()?;

        let client = self
            .repository
            .update(id, request.into())
            .await?
            .ok_or_else(|| not_found_error("Client", id))?;
        info!("👤 Cliente {} actualizado", id);

        Ok(ClientMessageResponse {
            message: "Client updated successfully!".to_string(),
            client,
        })
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Client", id));
        }
        info!("🗑️ Cliente {} eliminado", id);
        Ok(())
    }
}
