//! Car persistence

use sqlx::SqlitePool;

use super::store_error;
use crate::models::{Car, CarInput};
use crate::repository::{Repository, RepositoryOperation, RepositoryResult};

const ENTITY: &str = "Car";

#[derive(Debug, Clone)]
pub struct CarStore {
    pool: SqlitePool,
}

impl CarStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, Car, CarInput> for CarStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Car>> {
        sqlx::query_as::<_, Car>(
            "SELECT c.id, c.car_class_id, cc.name AS class_name, c.brand, c.model, \
             c.license_plate, c.year, c.rental_cost_per_day, c.status \
             FROM cars c JOIN car_classes cc ON cc.id = c.car_class_id WHERE c.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cars WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Exists, id))
    }

    async fn create(&self, data: CarInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO cars (car_class_id, brand, model, license_plate, year, \
             rental_cost_per_day, status) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.car_class_id)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.license_plate)
        .bind(data.year)
        .bind(data.rental_cost_per_day)
        .bind(&data.status)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, "new"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, data: CarInput) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE cars SET car_class_id = ?, brand = ?, model = ?, license_plate = ?, \
             year = ?, rental_cost_per_day = ?, status = ? WHERE id = ?",
        )
        .bind(data.car_class_id)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.license_plate)
        .bind(data.year)
        .bind(data.rental_cost_per_day)
        .bind(&data.status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::repository::RepositoryErrorKind;

    fn input(class_id: i64) -> CarInput {
        CarInput {
            car_class_id: class_id,
            brand: "Skoda".to_string(),
            model: "Octavia".to_string(),
            license_plate: "AA 0001".to_string(),
            year: 2022,
            rental_cost_per_day: 55.0,
            status: "Available".to_string(),
        }
    }

    async fn with_class(pool: &SqlitePool) -> i64 {
        sqlx::query("INSERT INTO car_classes (name, description) VALUES ('Mid', 'Mid-size')")
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let pool = test_pool().await;
        let class_id = with_class(&pool).await;
        let store = CarStore::new(pool);

        let id = store.create(input(class_id)).await.unwrap();
        let car = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(car.class_name, "Mid");
        assert_eq!(car.rental_cost_per_day, 55.0);

        let updated = CarInput {
            status: "Rented".to_string(),
            ..input(class_id)
        };
        assert!(store.update(id, updated).await.unwrap());
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().status, "Rented");

        assert!(store.delete(id).await.unwrap());
        assert!(!store.exists(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(!store.update(id, input(class_id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_class_is_constraint_violation() {
        let pool = test_pool().await;
        let store = CarStore::new(pool);

        let err = store.create(input(99)).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ConstraintViolation);
        assert_eq!(err.operation, RepositoryOperation::Create);
    }
}
