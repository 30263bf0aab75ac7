//! Pagination, ordering and filter-condition types for list queries
//!
//! # Example
//!
//! ```rust
//! use car_rental::repository::{FilterCondition, OrderDirection, Pagination};
//!
//! let pagination = Pagination::page(2, 20);
//! assert_eq!(pagination.offset, 20);
//!
//! let filter = FilterCondition::contains("phone_number", "555");
//! let order_by = ("rental_cost_per_day", OrderDirection::Descending);
//! # let _ = (filter, order_by);
//! ```

use std::fmt;

use sqlx::{QueryBuilder, Sqlite};

/// Direction for ordering results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    Descending,
}

impl OrderDirection {
    /// SQL keyword for the direction.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Offset/limit window over a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: i64,
    /// Maximum number of results to return
    pub limit: i64,
}

impl Pagination {
    /// Create new pagination parameters
    #[must_use]
    pub const fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Window for a 1-based page number.
    ///
    /// Page numbers below 1 produce a negative skip, which the store treats
    /// as no skip at all; the offset is clamped to zero accordingly.
    ///
    /// ```rust
    /// use car_rental::repository::Pagination;
    ///
    /// assert_eq!(Pagination::page(3, 20).offset, 40);
    /// assert_eq!(Pagination::page(0, 20).offset, 0);
    /// assert_eq!(Pagination::page(-4, 20).offset, 0);
    /// ```
    #[must_use]
    pub fn page(page_number: i64, page_size: i64) -> Self {
        let offset = page_number
            .saturating_sub(1)
            .saturating_mul(page_size)
            .max(0);
        Self {
            offset,
            limit: page_size,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

/// Comparison operators for filter conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Case-sensitive substring containment
    Contains,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Contains => write!(f, "CONTAINS"),
        }
    }
}

/// Value bound into a filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

/// A single WHERE-clause predicate over a trusted column expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// Column expression (never user input)
    pub field: String,
    /// Comparison operator
    pub operator: FilterOperator,
    /// Bound value
    pub value: FilterValue,
}

impl FilterCondition {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// `field = value`
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equal, value.into())
    }

    /// `field` contains `needle`, case-sensitively
    #[must_use]
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(
            field,
            FilterOperator::Contains,
            FilterValue::String(needle.into()),
        )
    }

    /// Append the predicate to a query, binding its value.
    ///
    /// `instr` is used for containment because SQLite's `LIKE` ignores ASCII case.
    pub fn push_to(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self.operator {
            FilterOperator::Equal => {
                builder.push(&self.field).push(" = ");
                self.push_value(builder);
            }
            FilterOperator::Contains => {
                builder.push("instr(").push(&self.field).push(", ");
                self.push_value(builder);
                builder.push(") > 0");
            }
        }
    }

    fn push_value(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match &self.value {
            FilterValue::Integer(n) => builder.push_bind(*n),
            FilterValue::Float(n) => builder.push_bind(*n),
            FilterValue::String(s) => builder.push_bind(s.clone()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction() {
        assert_eq!(OrderDirection::default(), OrderDirection::Ascending);
        assert_eq!(OrderDirection::Ascending.as_sql(), "ASC");
        assert_eq!(OrderDirection::Descending.as_sql(), "DESC");
        assert_eq!(format!("{}", OrderDirection::Descending), "desc");
    }

    #[test]
    fn test_pagination_page() {
        let page1 = Pagination::page(1, 20);
        assert_eq!(page1.offset, 0);
        assert_eq!(page1.limit, 20);

        let page2 = Pagination::page(2, 20);
        assert_eq!(page2.offset, 20);

        let page5 = Pagination::page(5, 10);
        assert_eq!(page5.offset, 40);
    }

    #[test]
    fn test_pagination_non_positive_page() {
        assert_eq!(Pagination::page(0, 20), Pagination::new(0, 20));
        assert_eq!(Pagination::page(-3, 20), Pagination::new(0, 20));
    }

    #[test]
    fn test_filter_condition_constructors() {
        let eq = FilterCondition::eq("m.cost", 100.0);
        assert_eq!(eq.operator, FilterOperator::Equal);
        assert_eq!(eq.value, FilterValue::Float(100.0));

        let contains = FilterCondition::contains("phone_number", "555");
        assert_eq!(contains.operator, FilterOperator::Contains);
        assert_eq!(contains.value, FilterValue::String("555".to_string()));
    }

    #[test]
    fn test_push_to_renders_placeholders() {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT 1 FROM clients WHERE ");
        FilterCondition::contains("phone_number", "555").push_to(&mut builder);
        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM clients WHERE instr(phone_number, ?) > 0"
        );

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT 1 FROM cars c WHERE ");
        FilterCondition::eq("c.rental_cost_per_day", 50.0).push_to(&mut builder);
        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM cars c WHERE c.rental_cost_per_day = ?"
        );
    }
}
