//! Server-rendered pages with askama
//!
//! Every page template embeds a [`TemplateContext`] as `ctx`, carrying the
//! flash messages, the anti-forgery token and the signed-in user for the
//! shared layout (`templates/base.html`). Templates are compiled into the
//! binary; [`HtmlTemplate`] renders one into a response.

mod context;
mod helpers;
mod response;
mod views;

pub use context::TemplateContext;
pub use helpers::{money, pluralize, short_date, truncate};
pub use response::HtmlTemplate;
pub use views::{
    DeleteTemplate, Detail, ErrorTemplate, FormTemplate, HeaderCell, HomeTemplate, ListRow,
    ListTemplate, ListView, LoginTemplate, RowView, UserListItem, UsersTemplate,
};

pub use askama::Template;
