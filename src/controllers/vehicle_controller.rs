use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::vehicle_dto::{VehicleMessageResponse, VehicleRequest};
use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: VehicleRequest) -> AppResult<VehicleMessageResponse> {
        request.validate()?;

        let vehicle = self.repository.create(request.into()).await?;
        info!("🚗 Vehículo {} creado ({} {})", vehicle.id, vehicle.brand, vehicle.model);

        Ok(VehicleMessageResponse {
            message: "Vehicle created!".to_string(),
            vehicle,
        })
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn update(&self, id: i64, request: VehicleRequest) -> AppResult<VehicleMessageResponse> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(id, request.into())
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        info!("🚗 Vehículo {} actualizado", id);

        Ok(VehicleMessageResponse {
            message: "Vehicle updated successfully!".to_string(),
            vehicle,
        })
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}
