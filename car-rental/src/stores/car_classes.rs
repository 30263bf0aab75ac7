//! Car class persistence

use sqlx::SqlitePool;

use super::store_error;
use crate::models::{CarClass, CarClassInput};
use crate::repository::{Repository, RepositoryOperation, RepositoryResult};

const ENTITY: &str = "CarClass";

#[derive(Debug, Clone)]
pub struct CarClassStore {
    pool: SqlitePool,
}

impl CarClassStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, CarClass, CarClassInput> for CarClassStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<CarClass>> {
        sqlx::query_as::<_, CarClass>("SELECT id, name, description FROM car_classes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM car_classes WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Exists, id))
    }

    async fn create(&self, data: CarClassInput) -> RepositoryResult<i64> {
        let result = sqlx::query("INSERT INTO car_classes (name, description) VALUES (?, ?)")
            .bind(&data.name)
            .bind(&data.description)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, "new"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, data: CarClassInput) -> RepositoryResult<bool> {
        let result = sqlx::query("UPDATE car_classes SET name = ?, description = ? WHERE id = ?")
            .bind(&data.name)
            .bind(&data.description)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM car_classes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }
}
