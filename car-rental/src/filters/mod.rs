//! Filter resolution: query string over cookie over default, with the
//! resolved values written back as cookies.

mod resolver;
mod state;

pub use resolver::{CookieValue, FilterResolver, PAGE_PARAM};
pub use state::{FilterState, FILTER_COOKIE_LIFETIME};
