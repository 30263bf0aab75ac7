//! User accounts and roles

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::store_error;
use crate::models::{User, UserInput, UserRow};
use crate::repository::{RepositoryOperation, RepositoryResult};

const ENTITY: &str = "User";

const USER_COLUMNS: &str = "id, user_name, email, password_hash, registration_date, role";

/// Account store; ids are random UUID strings.
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> RepositoryResult<Vec<UserRow>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, user_name, email, registration_date, role FROM users ORDER BY user_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindAll, "*"))
    }

    pub async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, id))
    }

    pub async fn find_by_user_name(&self, user_name: &str) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_name = ?"
        ))
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, user_name))
    }

    pub async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::FindById, email))
    }

    /// Insert an account with an already hashed password and return its id.
    pub async fn create(
        &self,
        user_name: &str,
        email: &str,
        password_hash: &str,
        registration_date: NaiveDate,
        role: &str,
    ) -> RepositoryResult<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO users (id, user_name, email, password_hash, registration_date, role) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_name)
        .bind(email)
        .bind(password_hash)
        .bind(registration_date)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Create, user_name))?;

        Ok(id)
    }

    /// Update profile fields and replace the role; the password is untouched.
    pub async fn update(&self, id: &str, input: &UserInput) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET user_name = ?, email = ?, registration_date = ?, role = ? \
             WHERE id = ?",
        )
        .bind(&input.user_name)
        .bind(&input.email)
        .bind(input.registration_date)
        .bind(&input.role)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Update, id))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(ENTITY, e, RepositoryOperation::Delete, id))?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a role unless it is already present.
    pub async fn ensure_role(&self, name: &str) -> RepositoryResult<()> {
        sqlx::query("INSERT OR IGNORE INTO roles (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Role", e, RepositoryOperation::Create, name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::repository::RepositoryErrorKind;

    async fn store() -> UserStore {
        let store = UserStore::new(test_pool().await);
        store.ensure_role("Admin").await.unwrap();
        store.ensure_role("User").await.unwrap();
        store
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = store().await;
        let id = store
            .create("desk", "desk@rental.example", "$hash", day(), "User")
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let by_name = store.find_by_user_name("desk").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);
        let by_email = store.find_by_email("desk@rental.example").await.unwrap().unwrap();
        assert_eq!(by_email.role, "User");
        assert!(store.find_by_user_name("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_name_and_unknown_role() {
        let store = store().await;
        store
            .create("desk", "a@rental.example", "$hash", day(), "User")
            .await
            .unwrap();

        let duplicate = store
            .create("desk", "b@rental.example", "$hash", day(), "User")
            .await
            .unwrap_err();
        assert_eq!(duplicate.kind, RepositoryErrorKind::AlreadyExists);

        let unknown = store
            .create("other", "c@rental.example", "$hash", day(), "Owner")
            .await
            .unwrap_err();
        assert!(unknown.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_update_replaces_role() {
        let store = store().await;
        let id = store
            .create("desk", "desk@rental.example", "$hash", day(), "User")
            .await
            .unwrap();

        let input = UserInput {
            user_name: "desk".to_string(),
            email: "desk@rental.example".to_string(),
            password: None,
            registration_date: day(),
            role: "Admin".to_string(),
        };
        assert!(store.update(&id, &input).await.unwrap());
        let user = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(user.role, "Admin");
        assert_eq!(user.password_hash, "$hash");

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.update(&id, &input).await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 0);
    }
}
