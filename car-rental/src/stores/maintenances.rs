//! Maintenance record persistence

use sqlx::SqlitePool;

use super::store_error;
use crate::models::{Maintenance, MaintenanceInput};
use crate::repository::{Repository, RepositoryOperation, RepositoryResult};

const ENTITY: &str = "Maintenance";

#[derive(Debug, Clone)]
pub struct MaintenanceStore {
    pool: SqlitePool,
}

impl MaintenanceStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, Maintenance, MaintenanceInput> for MaintenanceStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Maintenance>> {
        sqlx::query_as::<_, Maintenance>(
            "SELECT m.id, m.car_id, c.brand || ' ' || c.model AS car_label, \
             m.maintenance_date, m.description, m.cost \
             FROM maintenances m JOIN cars c ON c.id = m.car_id WHERE m.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM maintenances WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Exists, id))
    }

    async fn create(&self, data: MaintenanceInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO maintenances (car_id, maintenance_date, description, cost) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(data.car_id)
        .bind(data.maintenance_date)
        .bind(&data.description)
        .bind(data.cost)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, "new"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, data: MaintenanceInput) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE maintenances SET car_id = ?, maintenance_date = ?, description = ?, cost = ? \
             WHERE id = ?",
        )
        .bind(data.car_id)
        .bind(data.maintenance_date)
        .bind(&data.description)
        .bind(data.cost)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM maintenances WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }
}
