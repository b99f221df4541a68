use validator::Validate;

use crate::dto::sale_dto::{CreateSaleRequest, SaleCreatedResponse};
use crate::models::SaleWithDetails;
use crate::services::SaleService;
use crate::utils::errors::AppResult;

pub struct SaleController {
    service: SaleService,
}

impl SaleController {
    pub fn new(service: SaleService) -> Self {
        Self { service }
    }

    pub async fn create(&self, request: CreateSaleRequest) -> AppResult<SaleCreatedResponse> {
        request.validate()?;

        let sale = self
            .service
            .create_sale(request.client_id, request.vehicle_id, request.price)
            .await?;

        Ok(SaleCreatedResponse {
            message: "Sale created successfully!".to_string(),
            sale,
        })
    }

    pub async fn list(&self) -> AppResult<Vec<SaleWithDetails>> {
        self.service.list_sales_with_details().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<SaleWithDetails> {
        self.service.get_sale_with_details(id).await
    }
}
