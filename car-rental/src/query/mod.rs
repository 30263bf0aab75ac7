//! The list query pipeline shared by every entity page
//!
//! A [`ListDefinition`] declares the source relation, the filter field and
//! the sortable field of one list. [`ListDefinition::resolve`] turns a
//! request into [`ListCriteria`] through the filter resolver, and
//! [`paginate`] runs the counts and the page query.

mod definition;
mod page;
mod pipeline;
mod sort;
pub mod tables;

pub use definition::{
    ActiveFilter, Column, Comparison, FilterField, ListCriteria, ListDefinition, SortColumn,
    SORT_PARAM,
};
pub use page::PageInfo;
pub use pipeline::{paginate, ListPage};
pub use sort::{describe_sort, ParseSortStateError, SortField, SortState, SortViewModel};
