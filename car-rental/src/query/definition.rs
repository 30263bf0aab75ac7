//! Declarative description of a list page: source relation, filter field,
//! sortable field and default order.

use crate::filters::FilterResolver;
use crate::repository::{FilterCondition, OrderDirection};

use super::sort::{describe_sort, SortField, SortState, SortViewModel};

/// Query parameter carrying the sort order.
pub const SORT_PARAM: &str = "sortOrder";

/// How the filter value is compared with its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Numeric equality; active when the value is greater than zero
    Equal,
    /// Case-sensitive substring containment; active when the value is non-empty
    Contains,
}

/// The single filterable field of a list.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    /// Query parameter name, e.g. `RentalCostPerDay`
    pub param: &'static str,
    /// Cookie remembering the value, e.g. `CarRentalCostPerDay`
    pub cookie: &'static str,
    /// Column expression the predicate applies to
    pub column: &'static str,
    pub comparison: Comparison,
    /// Label for the filter input, e.g. "Cost per day"
    pub label: &'static str,
    /// Description while the filter is inactive, e.g. "All costs"
    pub all_label: &'static str,
}

/// The single sortable field of a list.
#[derive(Debug, Clone, Copy)]
pub struct SortColumn {
    /// Cookie remembering the sort order, e.g. `CarSortOrder`
    pub cookie: &'static str,
    pub field: SortField,
    /// Column expression used in ORDER BY
    pub column: &'static str,
}

/// A displayed column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    /// Header links to the sort toggle
    pub sortable: bool,
}

impl Column {
    pub const fn plain(label: &'static str) -> Self {
        Self {
            label,
            sortable: false,
        }
    }

    pub const fn sortable(label: &'static str) -> Self {
        Self {
            label,
            sortable: true,
        }
    }
}

/// Everything the query pipeline and the list view need to know about
/// one entity's list page.
#[derive(Debug, Clone, Copy)]
pub struct ListDefinition {
    /// Entity name used in logs and messages, e.g. "Car"
    pub entity: &'static str,
    /// Route segment and page title, e.g. "Cars"
    pub route: &'static str,
    pub title: &'static str,
    /// FROM clause: a table or a join
    pub source: &'static str,
    /// SELECT list; aliases match the row type's fields
    pub projection: &'static str,
    pub columns: &'static [Column],
    pub filter: FilterField,
    pub sort: Option<SortColumn>,
    pub default_sort: SortState,
}

/// Effective filter value for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveFilter {
    Amount(f64),
    Text(String),
}

impl ActiveFilter {
    /// Whether the value restricts the rows.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Amount(value) => *value > 0.0,
            Self::Text(value) => !value.is_empty(),
        }
    }

    /// The WHERE predicate, or `None` when the filter is inactive.
    #[must_use]
    pub fn condition(&self, field: &FilterField) -> Option<FilterCondition> {
        if !self.is_active() {
            return None;
        }

        match self {
            Self::Amount(value) => Some(FilterCondition::eq(field.column, *value)),
            Self::Text(value) => Some(FilterCondition::contains(field.column, value.clone())),
        }
    }

    /// Raw value for repopulating the filter input.
    #[must_use]
    pub fn raw_value(&self) -> String {
        match self {
            Self::Amount(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }

    /// Human-readable description, e.g. "Cost: 100" or "All costs".
    #[must_use]
    pub fn describe(&self, field: &FilterField) -> String {
        if !self.is_active() {
            return field.all_label.to_string();
        }

        match self {
            Self::Amount(value) => format!("{}: {}", field.label, value),
            Self::Text(value) => format!("{} contains \"{}\"", field.label, value),
        }
    }
}

/// Filter, sort and page in effect for one list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCriteria {
    pub filter: ActiveFilter,
    pub sort: SortState,
    pub page: i64,
}

impl ListDefinition {
    /// Resolve the request's filter, sort and page.
    ///
    /// Filter and sort values are recorded in the resolver's state for
    /// persistence; the page number is not.
    pub fn resolve(&self, resolver: &mut FilterResolver) -> ListCriteria {
        let filter = match self.filter.comparison {
            Comparison::Equal => ActiveFilter::Amount(resolver.resolve(
                self.filter.param,
                self.filter.cookie,
                0.0,
            )),
            Comparison::Contains => ActiveFilter::Text(resolver.resolve(
                self.filter.param,
                self.filter.cookie,
                String::new(),
            )),
        };

        let sort = match &self.sort {
            Some(column) => resolver.resolve(SORT_PARAM, column.cookie, self.default_sort),
            None => self.default_sort,
        };

        ListCriteria {
            filter,
            sort,
            page: resolver.page(),
        }
    }

    /// ORDER BY column and direction, when `sort` belongs to this list.
    #[must_use]
    pub fn order_by(&self, sort: SortState) -> Option<(&'static str, OrderDirection)> {
        let column = self.sort.as_ref()?;
        sort.direction_for(column.field)
            .map(|direction| (column.column, direction))
    }

    /// Sort metadata for the view, when the list is sortable.
    #[must_use]
    pub fn sort_view(&self, sort: SortState) -> Option<SortViewModel> {
        self.sort
            .as_ref()
            .map(|column| SortViewModel::new(sort, column.field))
    }

    #[must_use]
    pub fn describe_sort(&self, sort: SortState) -> String {
        describe_sort(sort, self.sort.as_ref().map(|column| column.field))
    }

    /// Whether any non-default filter or sort is in effect.
    #[must_use]
    pub fn has_filters(&self, criteria: &ListCriteria) -> bool {
        criteria.filter.is_active() || criteria.sort != self.default_sort
    }
}
