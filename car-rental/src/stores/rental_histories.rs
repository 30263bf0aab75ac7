//! Rental history persistence

use sqlx::SqlitePool;

use super::store_error;
use crate::models::{RentalHistory, RentalHistoryInput};
use crate::repository::{Repository, RepositoryOperation, RepositoryResult};

const ENTITY: &str = "RentalHistory";

#[derive(Debug, Clone)]
pub struct RentalHistoryStore {
    pool: SqlitePool,
}

impl RentalHistoryStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, RentalHistory, RentalHistoryInput> for RentalHistoryStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<RentalHistory>> {
        sqlx::query_as::<_, RentalHistory>(
            "SELECT rh.id, rh.client_id, cl.full_name AS client_name, rh.start_date, \
             rh.actual_end_date, rh.total_amount \
             FROM rental_histories rh JOIN clients cl ON cl.id = rh.client_id WHERE rh.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rental_histories WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Exists, id))
    }

    async fn create(&self, data: RentalHistoryInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO rental_histories (client_id, start_date, actual_end_date, total_amount) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(data.client_id)
        .bind(data.start_date)
        .bind(data.actual_end_date)
        .bind(data.total_amount)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, "new"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, data: RentalHistoryInput) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE rental_histories SET client_id = ?, start_date = ?, actual_end_date = ?, \
             total_amount = ? WHERE id = ?",
        )
        .bind(data.client_id)
        .bind(data.start_date)
        .bind(data.actual_end_date)
        .bind(data.total_amount)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM rental_histories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }
}
