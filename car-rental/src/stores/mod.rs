//! SQLite-backed stores, one per table
//!
//! Every entity store implements [`Repository`](crate::repository::Repository)
//! over a shared [`SqlitePool`]. The option loaders feed the select lists of
//! the entity forms.

mod car_classes;
mod cars;
mod clients;
mod maintenances;
mod rental_agreements;
mod rental_histories;
mod users;

pub use car_classes::CarClassStore;
pub use cars::CarStore;
pub use clients::ClientStore;
pub use maintenances::MaintenanceStore;
pub use rental_agreements::RentalAgreementStore;
pub use rental_histories::RentalHistoryStore;
pub use users::UserStore;

use sqlx::SqlitePool;

use crate::models::Choice;
use crate::repository::{RepositoryError, RepositoryOperation, RepositoryResult};

/// Classify a driver error and attach the entity it concerned.
pub(crate) fn store_error(
    entity: &str,
    err: sqlx::Error,
    operation: RepositoryOperation,
    id: impl ToString,
) -> RepositoryError {
    RepositoryError::from(err)
        .with_operation(operation)
        .with_entity(entity, id.to_string())
}

async fn choices(pool: &SqlitePool, entity: &str, sql: &str) -> RepositoryResult<Vec<Choice>> {
    sqlx::query_as::<_, Choice>(sql)
        .fetch_all(pool)
        .await
        .map_err(|e| store_error(entity, e, RepositoryOperation::FindAll, "*"))
}

/// Car classes as `(id, name)` choices.
pub async fn car_class_choices(pool: &SqlitePool) -> RepositoryResult<Vec<Choice>> {
    choices(
        pool,
        "CarClass",
        "SELECT id, name AS label FROM car_classes ORDER BY name",
    )
    .await
}

/// Cars labelled "brand model (plate)".
pub async fn car_choices(pool: &SqlitePool) -> RepositoryResult<Vec<Choice>> {
    choices(
        pool,
        "Car",
        "SELECT id, brand || ' ' || model || ' (' || license_plate || ')' AS label \
         FROM cars ORDER BY brand, model, id",
    )
    .await
}

pub async fn client_choices(pool: &SqlitePool) -> RepositoryResult<Vec<Choice>> {
    choices(
        pool,
        "Client",
        "SELECT id, full_name AS label FROM clients ORDER BY full_name, id",
    )
    .await
}

/// All role names, alphabetically.
pub async fn role_names(pool: &SqlitePool) -> RepositoryResult<Vec<String>> {
    sqlx::query_scalar::<_, String>("SELECT name FROM roles ORDER BY name")
        .fetch_all(pool)
        .await
        .map_err(|e| store_error("Role", e, RepositoryOperation::FindAll, "*"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_choice_labels() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO car_classes (id, name, description) VALUES (1, 'Economy', '')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO cars (car_class_id, brand, model, license_plate, year, \
             rental_cost_per_day, status) VALUES (1, 'Fiat', 'Panda', 'F 100', 2020, 30, 'Available')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let classes = car_class_choices(&pool).await.unwrap();
        assert_eq!(classes, vec![Choice { id: 1, label: "Economy".to_string() }]);

        let cars = car_choices(&pool).await.unwrap();
        assert_eq!(cars[0].label, "Fiat Panda (F 100)");

        assert!(client_choices(&pool).await.unwrap().is_empty());
    }
}
