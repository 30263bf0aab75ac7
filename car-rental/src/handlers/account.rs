//! Sign-in and sign-out

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::LANDING_PATH;
use crate::error::Result;
use crate::session::{AuthContext, AuthSession, CsrfToken};
use crate::state::AppState;
use crate::stores::UserStore;
use crate::templates::{HtmlTemplate, LoginTemplate, TemplateContext};

const INVALID_LOGIN: &str = "Invalid user name or password.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoginForm {
    pub user_name: String,
    pub password: String,
}

/// `GET /Account/Login`
pub async fn login_get(auth: AuthContext, ctx: TemplateContext) -> Response {
    if auth.is_authenticated {
        return Redirect::to(LANDING_PATH).into_response();
    }

    HtmlTemplate::page(LoginTemplate {
        ctx,
        user_name: String::new(),
        error: None,
    })
    .into_response()
}

/// `POST /Account/Login`
///
/// On success the session id is cycled and the anti-forgery token replaced
/// before the principal is stored.
pub async fn login_post(
    State(state): State<AppState>,
    session: Session,
    ctx: TemplateContext,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = UserStore::new(state.pool().clone())
        .find_by_user_name(form.user_name.trim())
        .await?;

    let verified = match &user {
        Some(user) => state.hasher().verify(&form.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!(user_name = %form.user_name, "Failed sign-in");
        return Ok(HtmlTemplate::page(LoginTemplate {
            ctx,
            user_name: form.user_name,
            error: Some(INVALID_LOGIN.to_string()),
        })
        .into_response());
    };

    session.cycle_id().await?;
    CsrfToken::regenerate(&session, state.config().session.csrf.token_length).await?;

    let mut auth = AuthSession::default();
    auth.login(user.id.clone(), user.user_name.clone(), vec![user.role.clone()]);
    auth.save(&session).await?;

    tracing::info!(user_id = %user.id, user_name = %user.user_name, "Signed in");
    Ok(Redirect::to(LANDING_PATH).into_response())
}

/// `POST /Account/Logout`
pub async fn logout(session: Session, auth: AuthContext) -> Result<Redirect> {
    session.flush().await?;
    if let Some(user_id) = auth.user_id {
        tracing::info!(user_id = %user_id, "Signed out");
    }
    Ok(Redirect::to(LANDING_PATH))
}
