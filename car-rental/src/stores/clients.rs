//! Client persistence

use sqlx::SqlitePool;

use super::store_error;
use crate::models::{Client, ClientInput};
use crate::repository::{Repository, RepositoryOperation, RepositoryResult};

const ENTITY: &str = "Client";

#[derive(Debug, Clone)]
pub struct ClientStore {
    pool: SqlitePool,
}

impl ClientStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, Client, ClientInput> for ClientStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Client>> {
        sqlx::query_as::<_, Client>(
            "SELECT id, full_name, license_number, phone_number FROM clients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Exists, id))
    }

    async fn create(&self, data: ClientInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO clients (full_name, license_number, phone_number) VALUES (?, ?, ?)",
        )
        .bind(&data.full_name)
        .bind(&data.license_number)
        .bind(&data.phone_number)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, "new"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, data: ClientInput) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE clients SET full_name = ?, license_number = ?, phone_number = ? WHERE id = ?",
        )
        .bind(&data.full_name)
        .bind(&data.license_number)
        .bind(&data.phone_number)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }
}
