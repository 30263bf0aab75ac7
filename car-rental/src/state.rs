//! Application state shared across handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::PasswordHasher;
use crate::config::Config;
use crate::error::Result;

/// Cloned into every handler; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    config: Arc<Config>,
    hasher: PasswordHasher,
}

impl AppState {
    /// Build the state; fails when the password hashing parameters are invalid.
    pub fn new(pool: SqlitePool, config: Config) -> Result<Self> {
        let hasher = PasswordHasher::new(&config.password)?;
        Ok(Self::with_hasher(pool, config, hasher))
    }

    #[must_use]
    pub fn with_hasher(pool: SqlitePool, config: Config, hasher: PasswordHasher) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            hasher,
        }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Rows per list page.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.config.page_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_page_size_falls_back() {
        let mut config = Config::default();
        config.parameters.page_size = -5;
        let state = AppState::new(test_pool().await, config).unwrap();
        assert_eq!(state.page_size(), 20);
    }

    #[tokio::test]
    async fn test_invalid_argon2_parameters_are_rejected() {
        let mut config = Config::default();
        config.password.parallelism = 0;
        assert!(AppState::new(test_pool().await, config).is_err());
    }
}
