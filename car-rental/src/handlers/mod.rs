//! HTTP handlers and the application router
//!
//! Every business entity is served by the generic actions in [`crud`],
//! parameterized by a [`PageController`] from [`pages`]. Account pages,
//! the landing page and the `/Users` admin area have their own handlers.

pub mod account;
pub mod crud;
pub mod home;
pub mod pages;
pub mod users;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};

pub use crud::{PageController, CONSTRAINT_MESSAGE};
pub use pages::{CarClasses, Cars, Clients, Maintenances, RentalAgreements, RentalHistories};

use crate::error::Result;
use crate::health;
use crate::repository::RepositoryError;
use crate::session::{create_memory_session_layer, CsrfLayer};
use crate::state::AppState;

/// Public landing page; anonymous list requests end up here.
pub const LANDING_PATH: &str = "/Home/Index";

/// Sign-in page; anonymous form requests end up here.
pub const LOGIN_PATH: &str = "/Account/Login";

pub(crate) fn login_redirect() -> Response {
    Redirect::to(LOGIN_PATH).into_response()
}

/// Numeric id from a path segment; anything else addresses no row.
pub(crate) fn parse_path_id(entity: &str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| {
        tracing::debug!(entity, id = raw, "Non-numeric id in path");
        RepositoryError::not_found(entity, raw).into()
    })
}

/// List, Create, Edit and Delete routes for one controller.
pub fn entity_routes<C: PageController>() -> Router<AppState> {
    let route = C::list().route;

    Router::new()
        .route(&format!("/{route}"), get(crud::index::<C>))
        .route(&format!("/{route}/Index"), get(crud::index::<C>))
        .route(
            &format!("/{route}/Create"),
            get(crud::create_get::<C>).post(crud::create_post::<C>),
        )
        .route(
            &format!("/{route}/Edit/{{id}}"),
            get(crud::edit_get::<C>).post(crud::edit_post::<C>),
        )
        .route(
            &format!("/{route}/Delete/{{id}}"),
            get(crud::delete_get::<C>).post(crud::delete_post::<C>),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/Users", get(users::index))
        .route("/Users/Index", get(users::index))
        .route(
            "/Users/Create",
            get(users::create_get).post(users::create_post),
        )
        .route("/Users/Edit/{id}", get(users::edit_get).post(users::edit_post))
        .route("/Users/Delete/{id}", post(users::delete_post))
}

/// The complete application with its session and anti-forgery layers.
///
/// The CSRF layer reads the session, so the session layer wraps it.
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let body_limit = config.middleware.body_limit_mb * 1024 * 1024;
    let csrf = CsrfLayer::new(config.session.csrf.clone()).with_form_limit(body_limit);
    let sessions = create_memory_session_layer(&config.session);

    Router::new()
        .route("/", get(home::root))
        .route(LANDING_PATH, get(home::index))
        .route(LOGIN_PATH, get(account::login_get).post(account::login_post))
        .route("/Account/Logout", post(account::logout))
        .merge(entity_routes::<Cars>())
        .merge(entity_routes::<CarClasses>())
        .merge(entity_routes::<Clients>())
        .merge(entity_routes::<Maintenances>())
        .merge(entity_routes::<RentalAgreements>())
        .merge(entity_routes::<RentalHistories>())
        .merge(user_routes())
        .route("/health", get(health::health))
        .route("/ready", get(health::readiness))
        .layer(csrf)
        .layer(sessions)
        .with_state(state)
}
