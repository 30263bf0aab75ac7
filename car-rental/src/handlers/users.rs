//! Account administration under `/Users`, restricted to the Admin role

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use super::login_redirect;
use crate::error::{Error, Result};
use crate::models::{FieldErrors, FormOptions, User, UserForm, UserInput};
use crate::repository::RepositoryError;
use crate::session::{AuthContext, FlashMessage, FlashMessages};
use crate::state::AppState;
use crate::stores::{role_names, UserStore};
use crate::templates::{
    short_date, FormTemplate, HtmlTemplate, TemplateContext, UserListItem, UsersTemplate,
};

const USERS_PATH: &str = "/Users";
const NAME_TAKEN: &str = "User name is already taken.";

/// Anonymous callers go to the login page; signed-in non-admins get 403.
fn admin_gate(auth: &AuthContext) -> Option<Response> {
    if !auth.is_authenticated {
        return Some(login_redirect());
    }
    if !auth.is_admin() {
        tracing::warn!(user_id = ?auth.user_id, "Non-admin access to user administration");
        return Some(
            Error::Forbidden("User administration requires the Admin role.".to_string())
                .into_response(),
        );
    }
    None
}

async fn options(state: &AppState) -> Result<FormOptions> {
    Ok(FormOptions {
        roles: role_names(state.pool()).await?,
        ..FormOptions::default()
    })
}

fn render(
    ctx: TemplateContext,
    form: &UserForm,
    editing: bool,
    options: &FormOptions,
    errors: &FieldErrors,
) -> Response {
    let (title, action, submit_label) = if editing {
        (
            "Edit user".to_string(),
            format!("{USERS_PATH}/Edit/{}", form.id),
            "Save",
        )
    } else {
        ("Create user".to_string(), format!("{USERS_PATH}/Create"), "Create")
    };

    HtmlTemplate::page(FormTemplate {
        ctx,
        title,
        action,
        submit_label,
        id: form.id.clone(),
        fields: form.fields(!editing, options, errors),
        form_errors: errors.form_errors().to_vec(),
        back_url: USERS_PATH.to_string(),
    })
    .into_response()
}

/// Whether `user_name` belongs to an account other than `except_id`.
async fn name_taken(store: &UserStore, user_name: &str, except_id: Option<&str>) -> Result<bool> {
    Ok(store
        .find_by_user_name(user_name)
        .await?
        .is_some_and(|existing| Some(existing.id.as_str()) != except_id))
}

fn taken() -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add("UserName", NAME_TAKEN);
    errors
}

async fn find(store: &UserStore, id: &str) -> Result<User> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("User", id).into())
}

/// `GET /Users`
pub async fn index(
    State(state): State<AppState>,
    auth: AuthContext,
    ctx: TemplateContext,
) -> Result<Response> {
    if let Some(response) = admin_gate(&auth) {
        return Ok(response);
    }

    let users = UserStore::new(state.pool().clone())
        .list()
        .await?
        .into_iter()
        .map(|row| UserListItem {
            id: row.id,
            user_name: row.user_name,
            email: row.email,
            registration_date: short_date(row.registration_date),
            role: row.role,
        })
        .collect();

    Ok(HtmlTemplate::page(UsersTemplate { ctx, users }).into_response())
}

/// `GET /Users/Create`
pub async fn create_get(
    State(state): State<AppState>,
    auth: AuthContext,
    ctx: TemplateContext,
) -> Result<Response> {
    if let Some(response) = admin_gate(&auth) {
        return Ok(response);
    }

    let options = options(&state).await?;
    Ok(render(ctx, &UserForm::default(), false, &options, &FieldErrors::new()))
}

/// `POST /Users/Create`
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthContext,
    session: Session,
    ctx: TemplateContext,
    Form(form): Form<UserForm>,
) -> Result<Response> {
    if let Some(response) = admin_gate(&auth) {
        return Ok(response);
    }

    let store = UserStore::new(state.pool().clone());
    let errors = match form.validate(Some(state.hasher().min_password_length())) {
        Ok(input) => {
            if !name_taken(&store, &input.user_name, None).await? {
                return create_user(&state, &store, &session, input).await;
            }
            taken()
        }
        Err(errors) => errors,
    };

    let options = options(&state).await?;
    Ok(render(ctx, &form, false, &options, &errors))
}

async fn create_user(
    state: &AppState,
    store: &UserStore,
    session: &Session,
    input: UserInput,
) -> Result<Response> {
    let password = input.password.as_deref().unwrap_or_default();
    let hash = state.hasher().hash(password)?;
    let id = store
        .create(
            &input.user_name,
            &input.email,
            &hash,
            input.registration_date,
            &input.role,
        )
        .await?;

    tracing::info!(user_id = %id, user_name = %input.user_name, role = %input.role, "User created");
    FlashMessages::push(
        session,
        FlashMessage::success(format!("User {} created.", input.user_name)),
    )
    .await?;
    Ok(Redirect::to(USERS_PATH).into_response())
}

/// `GET /Users/Edit/{id}`
pub async fn edit_get(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ctx: TemplateContext,
) -> Result<Response> {
    if let Some(response) = admin_gate(&auth) {
        return Ok(response);
    }

    let user = find(&UserStore::new(state.pool().clone()), &id).await?;
    let options = options(&state).await?;
    Ok(render(
        ctx,
        &UserForm::from_user(&user),
        true,
        &options,
        &FieldErrors::new(),
    ))
}

/// `POST /Users/Edit/{id}`: profile fields and the role; the password stays.
pub async fn edit_post(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    session: Session,
    ctx: TemplateContext,
    Form(form): Form<UserForm>,
) -> Result<Response> {
    if let Some(response) = admin_gate(&auth) {
        return Ok(response);
    }

    if form.id != id {
        tracing::debug!(user_id = %id, body_id = %form.id, "Edit id mismatch");
        return Err(RepositoryError::not_found("User", id).into());
    }

    let store = UserStore::new(state.pool().clone());
    let errors = match form.validate(None) {
        Ok(input) => {
            if name_taken(&store, &input.user_name, Some(&id)).await? {
                taken()
            } else {
                if !store.update(&id, &input).await? {
                    return Err(RepositoryError::not_found("User", id).into());
                }
                tracing::info!(user_id = %id, role = %input.role, "User updated");
                FlashMessages::push(
                    &session,
                    FlashMessage::success(format!("User {} saved.", input.user_name)),
                )
                .await?;
                return Ok(Redirect::to(USERS_PATH).into_response());
            }
        }
        Err(errors) => errors,
    };

    let options = options(&state).await?;
    Ok(render(ctx, &form, true, &options, &errors))
}

/// `POST /Users/Delete/{id}`: deletes when present, then back to the list.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    session: Session,
) -> Result<Response> {
    if let Some(response) = admin_gate(&auth) {
        return Ok(response);
    }

    if UserStore::new(state.pool().clone()).delete(&id).await? {
        tracing::info!(user_id = %id, "User deleted");
        FlashMessages::push(&session, FlashMessage::success("User deleted.")).await?;
    } else {
        tracing::debug!(user_id = %id, "Delete of a missing user");
    }
    Ok(Redirect::to(USERS_PATH).into_response())
}
