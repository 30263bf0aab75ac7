//! # car-rental
//!
//! Server-rendered administration for a car rental business: car classes,
//! cars, clients, maintenance records, rental agreements and rental history,
//! plus the user accounts that sign in to manage them.
//!
//! ## Features
//!
//! - **List pages**: filter, sort and paginate each entity; the last filter
//!   and sort are remembered in cookies for 30 days
//! - **Forms**: create, edit and delete with field validation and
//!   post-redirect-get flash messages
//! - **Accounts**: session sign-in with Argon2id password hashes, an
//!   Admin-only `/Users` area, anti-forgery tokens on every form
//! - **Storage**: SQLite through sqlx with embedded migrations and startup seeding
//! - **Operations**: JSON logs, request ids, health and readiness probes,
//!   graceful shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use car_rental::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!
//!     let state = AppState::new(pool, config.clone())?;
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod query;
pub mod repository;
pub mod server;
pub mod session;
pub mod state;
pub mod stores;
pub mod templates;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auth::{PasswordConfig, PasswordHasher};
    pub use crate::config::Config;
    pub use crate::database::{create_pool, run_migrations, seed};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{entity_routes, router, PageController};
    pub use crate::health::{health, readiness};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{Repository, RepositoryError, RepositoryResult};
    pub use crate::server::Server;
    pub use crate::session::{AuthContext, CsrfToken, FlashMessage, FlashMessages};
    pub use crate::state::AppState;
    pub use crate::templates::{HtmlTemplate, Template, TemplateContext};
}
