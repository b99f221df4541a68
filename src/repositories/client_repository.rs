use async_trait::async_trait;
use sqlx::PgPool;

use super::ClientRepository;
use crate::models::{Client, NewClient};
use crate::utils::errors::{AppError, AppResult};

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create(&self, client: NewClient) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, phone
            "#,
        )
        .bind(client.name)
        .bind(client.email)
        .bind(client.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    async fn find_all(&self) -> AppResult<Vec<Client>> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT id, name, email, phone FROM clients ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Client>> {
        let client =
            sqlx::query_as::<_, Client>("SELECT id, name, email, phone FROM clients WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(client)
    }

    async fn update(&self, id: i64, client: NewClient) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $2, email = $3, phone = $4
            WHERE id = $1
            RETURNING id, name, email, phone
            "#,
        )
        .bind(id)
        .bind(client.name)
        .bind(client.email)
        .bind(client.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    AppError::Conflict(format!("Client {} has sales and cannot be deleted", id))
                } else {
                    e
                }
            })?;

        Ok(result.rows_affected() > 0)
    }
}
