//! Template structs for every page and the list view model.

use askama::Template;

use super::context::TemplateContext;
use super::helpers::pluralize;
use crate::models::FormField;
use crate::query::{
    Comparison, ListCriteria, ListDefinition, ListPage, PageInfo, SortState, SORT_PARAM,
};
use crate::repository::OrderDirection;

/// A list row as rendered: its id and the display text of each column.
pub trait ListRow {
    fn id(&self) -> String;
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: &'static str,
    /// Link toggling the sort, on the sortable column only
    pub sort_link: Option<String>,
    /// `▲`, `▼` or empty
    pub arrow: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<String>,
}

/// Everything the list page shows.
#[derive(Debug, Clone)]
pub struct ListView {
    pub title: &'static str,
    pub route: &'static str,
    /// Entity name for the "Create new" link
    pub singular: &'static str,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    pub filter_param: &'static str,
    pub filter_label: &'static str,
    pub filter_value: String,
    /// `number` or `text`
    pub filter_input_type: &'static str,
    pub filter_description: String,
    pub sort_description: String,
    pub has_filters: bool,
    pub summary: String,
    pub page: PageInfo,
    pub previous_link: Option<String>,
    pub next_link: Option<String>,
}

impl ListView {
    pub fn new<R: ListRow>(
        list: &ListDefinition,
        singular: &'static str,
        criteria: &ListCriteria,
        page: ListPage<R>,
    ) -> Self {
        let sort_view = list.sort_view(criteria.sort);
        let headers = list
            .columns
            .iter()
            .map(|column| match sort_view.filter(|_| column.sortable) {
                Some(sort) => HeaderCell {
                    label: column.label,
                    sort_link: Some(sort_link(list.route, sort.toggle())),
                    arrow: match sort.active_direction() {
                        Some(OrderDirection::Ascending) => "▲",
                        Some(OrderDirection::Descending) => "▼",
                        None => "",
                    },
                },
                None => HeaderCell {
                    label: column.label,
                    sort_link: None,
                    arrow: "",
                },
            })
            .collect();

        let info = page.page;
        let summary = format!(
            "{} shown, {} matching, {} in total",
            pluralize(page.rows.len() as i64, "record", "records"),
            page.filtered_count,
            page.total_all
        );

        Self {
            title: list.title,
            route: list.route,
            singular,
            headers,
            rows: page
                .rows
                .iter()
                .map(|row| RowView {
                    id: row.id(),
                    cells: row.cells(),
                })
                .collect(),
            filter_param: list.filter.param,
            filter_label: list.filter.label,
            filter_value: criteria.filter.raw_value(),
            filter_input_type: match list.filter.comparison {
                Comparison::Equal => "number",
                Comparison::Contains => "text",
            },
            filter_description: criteria.filter.describe(&list.filter),
            sort_description: list.describe_sort(criteria.sort),
            has_filters: list.has_filters(criteria),
            summary,
            page: info,
            previous_link: info
                .has_previous_page()
                .then(|| page_link(list.route, info.page - 1)),
            next_link: info
                .has_next_page()
                .then(|| page_link(list.route, info.page.max(0) + 1)),
        }
    }
}

fn sort_link(route: &str, sort: SortState) -> String {
    format!("/{route}?{SORT_PARAM}={}", sort.name())
}

fn page_link(route: &str, page: i64) -> String {
    format!("/{route}?page={page}")
}

/// A label/value pair on a delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

impl Detail {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A user as shown in the /Users list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListItem {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub registration_date: String,
    pub role: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub ctx: TemplateContext,
    pub status: u16,
    pub title: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: TemplateContext,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: TemplateContext,
    pub user_name: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub ctx: TemplateContext,
    pub view: ListView,
}

/// Create and edit forms of every entity, users included.
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub ctx: TemplateContext,
    pub title: String,
    pub action: String,
    pub submit_label: &'static str,
    /// Hidden `Id` value; empty on create
    pub id: String,
    pub fields: Vec<FormField>,
    pub form_errors: Vec<String>,
    pub back_url: String,
}

#[derive(Template)]
#[template(path = "delete.html")]
pub struct DeleteTemplate {
    pub ctx: TemplateContext,
    pub title: String,
    pub action: String,
    pub details: Vec<Detail>,
    pub back_url: String,
}

#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub ctx: TemplateContext,
    pub users: Vec<UserListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{tables, ActiveFilter};

    struct Row(i64);

    impl ListRow for Row {
        fn id(&self) -> String {
            self.0.to_string()
        }

        fn cells(&self) -> Vec<String> {
            vec![format!("row {}", self.0)]
        }
    }

    fn page(rows: Vec<Row>, page: i64, filtered: i64) -> ListPage<Row> {
        ListPage {
            rows,
            total_all: 30,
            filtered_count: filtered,
            page: PageInfo::new(page, 20, filtered),
        }
    }

    #[test]
    fn test_sort_header_links_to_toggle() {
        let criteria = ListCriteria {
            filter: ActiveFilter::Amount(0.0),
            sort: SortState::RentalCostPerDayAsc,
            page: 1,
        };
        let view = ListView::new(&tables::CARS, "Car", &criteria, page(vec![Row(1)], 1, 25));

        let sortable: Vec<_> = view.headers.iter().filter(|h| h.sort_link.is_some()).collect();
        assert_eq!(sortable.len(), 1);
        assert_eq!(
            sortable[0].sort_link.as_deref(),
            Some("/Cars?sortOrder=RentalCostPerDayDesc")
        );
        assert_eq!(sortable[0].arrow, "▲");
        assert_eq!(view.next_link.as_deref(), Some("/Cars?page=2"));
        assert!(view.previous_link.is_none());
        assert!(!view.has_filters);
        assert_eq!(view.filter_input_type, "number");
    }

    #[test]
    fn test_unsortable_list_has_plain_headers() {
        let criteria = ListCriteria {
            filter: ActiveFilter::Text("SUV".to_string()),
            sort: SortState::No,
            page: 2,
        };
        let view = ListView::new(&tables::CAR_CLASSES, "Car class", &criteria, page(vec![], 2, 3));

        assert!(view.headers.iter().all(|h| h.sort_link.is_none()));
        assert!(view.has_filters);
        assert_eq!(view.filter_value, "SUV");
        assert_eq!(view.previous_link.as_deref(), Some("/CarClasses?page=1"));
        assert!(view.next_link.is_none());
        assert!(view.summary.starts_with("0 records shown"));
    }
}
