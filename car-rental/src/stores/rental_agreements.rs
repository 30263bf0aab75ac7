//! Rental agreement persistence

use sqlx::SqlitePool;

use super::store_error;
use crate::models::{RentalAgreement, RentalAgreementInput};
use crate::repository::{Repository, RepositoryOperation, RepositoryResult};

const ENTITY: &str = "RentalAgreement";

#[derive(Debug, Clone)]
pub struct RentalAgreementStore {
    pool: SqlitePool,
}

impl RentalAgreementStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, RentalAgreement, RentalAgreementInput> for RentalAgreementStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<RentalAgreement>> {
        sqlx::query_as::<_, RentalAgreement>(
            "SELECT ra.id, ra.client_id, cl.full_name AS client_name, ra.car_id, \
             c.brand || ' ' || c.model AS car_label, ra.start_date, ra.planned_end_date, \
             ra.actual_end_date, ra.total_amount \
             FROM rental_agreements ra \
             JOIN clients cl ON cl.id = ra.client_id \
             JOIN cars c ON c.id = ra.car_id \
             WHERE ra.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rental_agreements WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Exists, id))
    }

    async fn create(&self, data: RentalAgreementInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO rental_agreements (client_id, car_id, start_date, planned_end_date, \
             actual_end_date, total_amount) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(data.client_id)
        .bind(data.car_id)
        .bind(data.start_date)
        .bind(data.planned_end_date)
        .bind(data.actual_end_date)
        .bind(data.total_amount)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, "new"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, data: RentalAgreementInput) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE rental_agreements SET client_id = ?, car_id = ?, start_date = ?, \
             planned_end_date = ?, actual_end_date = ?, total_amount = ? WHERE id = ?",
        )
        .bind(data.client_id)
        .bind(data.car_id)
        .bind(data.start_date)
        .bind(data.planned_end_date)
        .bind(data.actual_end_date)
        .bind(data.total_amount)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM rental_agreements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }
}
