//! Public landing page

use axum::response::{IntoResponse, Redirect, Response};

use super::LANDING_PATH;
use crate::templates::{HomeTemplate, HtmlTemplate, TemplateContext};

/// `GET /`
pub async fn root() -> Redirect {
    Redirect::to(LANDING_PATH)
}

/// `GET /Home/Index`
pub async fn index(ctx: TemplateContext) -> Response {
    HtmlTemplate::page(HomeTemplate { ctx }).into_response()
}
