//! The list, create, edit and delete actions shared by every entity page
//!
//! A [`PageController`] binds one entity to its list definition, store and
//! form; the generic handlers below are mounted once per controller by
//! [`entity_routes`](super::entity_routes).

use std::future::Future;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};
use tower_sessions::Session;

use super::{login_redirect, parse_path_id, LANDING_PATH};
use crate::error::{Error, Result};
use crate::filters::FilterResolver;
use crate::models::{EntityForm, FieldErrors, FormOptions};
use crate::query::{paginate, ListDefinition};
use crate::repository::{Repository, RepositoryError, RepositoryResult};
use crate::session::{AuthContext, FlashMessage, FlashMessages};
use crate::state::AppState;
use crate::templates::{
    DeleteTemplate, Detail, FormTemplate, HtmlTemplate, ListRow, ListTemplate, ListView,
    TemplateContext,
};

/// Message shown when the store refuses a write because of a reference or
/// uniqueness constraint.
pub const CONSTRAINT_MESSAGE: &str =
    "The record could not be saved: a referenced record does not exist or a value is already in use.";

/// One entity page: its list, its store and its form.
pub trait PageController: Send + Sync + 'static {
    type Entity: Send + Sync;
    type Row: ListRow + for<'r> FromRow<'r, SqliteRow> + Send + Unpin;
    type Form: EntityForm<Entity = Self::Entity>;
    type Store: Repository<i64, Self::Entity, <Self::Form as EntityForm>::Input>;

    /// Display name, e.g. "Car class"
    const NAME: &'static str;

    fn list() -> &'static ListDefinition;

    fn store(pool: SqlitePool) -> Self::Store;

    /// Select-list contents for the form; empty for forms without references.
    fn options(_pool: &SqlitePool) -> impl Future<Output = RepositoryResult<FormOptions>> + Send {
        async { Ok(FormOptions::default()) }
    }

    /// Fields shown on the delete confirmation.
    fn details(entity: &Self::Entity) -> Vec<Detail>;
}

fn list_url<C: PageController>() -> String {
    format!("/{}", C::list().route)
}

enum FormMode<'a> {
    Create,
    Edit(&'a str),
}

fn render_form<C: PageController>(
    ctx: TemplateContext,
    mode: FormMode<'_>,
    form: &C::Form,
    options: &FormOptions,
    errors: &FieldErrors,
) -> Response {
    let route = C::list().route;
    let name = C::NAME.to_lowercase();
    let (title, action, submit_label, id) = match mode {
        FormMode::Create => (
            format!("Create {name}"),
            format!("/{route}/Create"),
            "Create",
            String::new(),
        ),
        FormMode::Edit(id) => (
            format!("Edit {name}"),
            format!("/{route}/Edit/{id}"),
            "Save",
            id.to_string(),
        ),
    };

    HtmlTemplate::page(FormTemplate {
        ctx,
        title,
        action,
        submit_label,
        id,
        fields: form.fields(options, errors),
        form_errors: errors.form_errors().to_vec(),
        back_url: list_url::<C>(),
    })
    .into_response()
}

async fn finish<C: PageController>(session: &Session, message: String) -> Result<Response> {
    FlashMessages::push(session, FlashMessage::success(message)).await?;
    Ok(Redirect::to(&list_url::<C>()).into_response())
}

async fn load<C: PageController>(store: &C::Store, id: i64) -> Result<C::Entity> {
    store.find_by_id(id).await?.ok_or_else(|| {
        tracing::debug!(entity = C::list().entity, id, "Record not found");
        Error::from(RepositoryError::not_found(C::list().entity, id.to_string()))
    })
}

/// `GET /{Entity}`: the filtered, sorted, paginated list.
///
/// Anonymous callers are sent to the landing page before any filter is
/// resolved, so no cookie is written for them.
pub async fn index<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    mut resolver: FilterResolver,
    ctx: TemplateContext,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(Redirect::to(LANDING_PATH).into_response());
    }

    let list = C::list();
    let criteria = list.resolve(&mut resolver);
    let page = paginate::<C::Row>(state.pool(), list, &criteria, state.page_size()).await?;

    tracing::debug!(
        entity = list.entity,
        filter = ?criteria.filter,
        sort = %criteria.sort,
        page = criteria.page,
        total_all = page.total_all,
        filtered = page.filtered_count,
        "List page"
    );

    let view = ListView::new(list, C::NAME, &criteria, page);
    Ok((
        resolver.into_state(),
        HtmlTemplate::page(ListTemplate { ctx, view }),
    )
        .into_response())
}

/// `GET /{Entity}/Create`
pub async fn create_get<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    ctx: TemplateContext,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(login_redirect());
    }

    let options = C::options(state.pool()).await?;
    Ok(render_form::<C>(
        ctx,
        FormMode::Create,
        &C::Form::default(),
        &options,
        &FieldErrors::new(),
    ))
}

/// `POST /{Entity}/Create`
pub async fn create_post<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    session: Session,
    ctx: TemplateContext,
    Form(form): Form<C::Form>,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(login_redirect());
    }

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let options = C::options(state.pool()).await?;
            return Ok(render_form::<C>(ctx, FormMode::Create, &form, &options, &errors));
        }
    };

    match C::store(state.pool().clone()).create(input).await {
        Ok(id) => {
            tracing::info!(entity = C::list().entity, id, "Record created");
            finish::<C>(&session, format!("{} created.", C::NAME)).await
        }
        Err(e) if e.is_constraint_violation() => {
            tracing::warn!(entity = C::list().entity, "Create refused by the store: {}", e);
            let options = C::options(state.pool()).await?;
            let errors = FieldErrors::form_error(CONSTRAINT_MESSAGE);
            Ok(render_form::<C>(ctx, FormMode::Create, &form, &options, &errors))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /{Entity}/Edit/{id}`
pub async fn edit_get<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(raw_id): Path<String>,
    ctx: TemplateContext,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(login_redirect());
    }

    let id = parse_path_id(C::list().entity, &raw_id)?;
    let entity = load::<C>(&C::store(state.pool().clone()), id).await?;
    let options = C::options(state.pool()).await?;

    Ok(render_form::<C>(
        ctx,
        FormMode::Edit(&raw_id),
        &C::Form::from_entity(&entity),
        &options,
        &FieldErrors::new(),
    ))
}

/// `POST /{Entity}/Edit/{id}`
///
/// The id in the path must match the submitted `Id`; otherwise the store is
/// left untouched and the result is not-found.
pub async fn edit_post<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(raw_id): Path<String>,
    session: Session,
    ctx: TemplateContext,
    Form(form): Form<C::Form>,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(login_redirect());
    }

    let entity = C::list().entity;
    let id = parse_path_id(entity, &raw_id)?;
    if form.id() != Some(id) {
        tracing::debug!(entity, id, body_id = ?form.id(), "Edit id mismatch");
        return Err(RepositoryError::not_found(entity, raw_id).into());
    }

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let options = C::options(state.pool()).await?;
            return Ok(render_form::<C>(
                ctx,
                FormMode::Edit(&raw_id),
                &form,
                &options,
                &errors,
            ));
        }
    };

    let store = C::store(state.pool().clone());
    match store.update(id, input).await {
        Ok(true) => {
            tracing::info!(entity, id, "Record updated");
            finish::<C>(&session, format!("{} saved.", C::NAME)).await
        }
        Ok(false) => {
            if store.exists(id).await? {
                tracing::warn!(entity, id, "Update did not apply to an existing row");
                Err(RepositoryError::conflict(entity, id.to_string()).into())
            } else {
                tracing::debug!(entity, id, "Record vanished before update");
                Err(RepositoryError::not_found(entity, id.to_string()).into())
            }
        }
        Err(e) if e.is_constraint_violation() => {
            tracing::warn!(entity, id, "Update refused by the store: {}", e);
            let options = C::options(state.pool()).await?;
            let errors = FieldErrors::form_error(CONSTRAINT_MESSAGE);
            Ok(render_form::<C>(
                ctx,
                FormMode::Edit(&raw_id),
                &form,
                &options,
                &errors,
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /{Entity}/Delete/{id}`: confirmation page.
pub async fn delete_get<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(raw_id): Path<String>,
    ctx: TemplateContext,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(login_redirect());
    }

    let id = parse_path_id(C::list().entity, &raw_id)?;
    let entity = load::<C>(&C::store(state.pool().clone()), id).await?;
    let route = C::list().route;

    Ok(HtmlTemplate::page(DeleteTemplate {
        ctx,
        title: format!("Delete {}", C::NAME.to_lowercase()),
        action: format!("/{route}/Delete/{raw_id}"),
        details: C::details(&entity),
        back_url: list_url::<C>(),
    })
    .into_response())
}

/// `POST /{Entity}/Delete/{id}`
///
/// A missing row is not-found; a row still referenced by others is refused
/// by the store and reported as a conflict.
pub async fn delete_post<C: PageController>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(raw_id): Path<String>,
    session: Session,
) -> Result<Response> {
    if !auth.is_authenticated {
        return Ok(login_redirect());
    }

    let entity = C::list().entity;
    let id = parse_path_id(entity, &raw_id)?;
    if C::store(state.pool().clone()).delete(id).await? {
        tracing::info!(entity, id, "Record deleted");
        finish::<C>(&session, format!("{} deleted.", C::NAME)).await
    } else {
        tracing::debug!(entity, id, "Delete of a missing record");
        Err(RepositoryError::not_found(entity, id.to_string()).into())
    }
}
