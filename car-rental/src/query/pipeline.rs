//! Filtered, sorted, paginated projection over a list's source relation.

use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::definition::{ListCriteria, ListDefinition};
use super::page::PageInfo;
use crate::repository::{Pagination, RepositoryError, RepositoryOperation, RepositoryResult};

/// One page of a list plus its aggregate counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    pub rows: Vec<R>,
    /// Rows in the unfiltered source; informational only
    pub total_all: i64,
    /// Rows matching the filter; drives the page count
    pub filtered_count: i64,
    pub page: PageInfo,
}

/// Run the three list queries: unfiltered count, filtered count, page slice.
///
/// No clamping is applied to `criteria.page`: a page past the end yields no
/// rows, and a non-positive page skips nothing.
pub async fn paginate<R>(
    pool: &SqlitePool,
    list: &ListDefinition,
    criteria: &ListCriteria,
    page_size: i64,
) -> RepositoryResult<ListPage<R>>
where
    R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let condition = criteria.filter.condition(&list.filter);
    let map_err = |e: sqlx::Error| {
        RepositoryError::from(e)
            .with_operation(RepositoryOperation::FindAll)
            .with_entity(list.entity, list.route)
    };

    let mut total_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
    total_query.push(list.source);
    let total_all: i64 = total_query
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
        .map_err(|e| map_err(e).with_operation(RepositoryOperation::Count))?;

    let mut filtered_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
    filtered_query.push(list.source);
    if let Some(condition) = &condition {
        filtered_query.push(" WHERE ");
        condition.push_to(&mut filtered_query);
    }
    let filtered_count: i64 = filtered_query
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
        .map_err(|e| map_err(e).with_operation(RepositoryOperation::Count))?;

    let window = Pagination::page(criteria.page, page_size);

    let mut rows_query = QueryBuilder::<Sqlite>::new("SELECT ");
    rows_query.push(list.projection).push(" FROM ").push(list.source);
    if let Some(condition) = &condition {
        rows_query.push(" WHERE ");
        condition.push_to(&mut rows_query);
    }
    if let Some((column, direction)) = list.order_by(criteria.sort) {
        rows_query
            .push(" ORDER BY ")
            .push(column)
            .push(" ")
            .push(direction.as_sql());
    }
    rows_query
        .push(" LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);

    tracing::debug!(
        entity = list.entity,
        sql = rows_query.sql(),
        "Running list query"
    );

    let rows: Vec<R> = rows_query
        .build_query_as::<R>()
        .fetch_all(pool)
        .await
        .map_err(map_err)?;

    tracing::debug!(
        entity = list.entity,
        filter = %criteria.filter.describe(&list.filter),
        sort = %criteria.sort,
        page = criteria.page,
        total_all,
        filtered_count,
        returned = rows.len(),
        "List page loaded"
    );

    Ok(ListPage {
        rows,
        total_all,
        filtered_count,
        page: PageInfo::new(criteria.page, page_size, filtered_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::models::{CarRow, ClientRow, MaintenanceRow};
    use crate::query::{tables, ActiveFilter, SortState};

    async fn seed_cars(pool: &SqlitePool, count: i64) {
        sqlx::query("INSERT INTO car_classes (name, description) VALUES ('Economy', 'Small cars')")
            .execute(pool)
            .await
            .unwrap();
        for i in 0..count {
            sqlx::query(
                "INSERT INTO cars (car_class_id, brand, model, license_plate, year, \
                 rental_cost_per_day, status) VALUES (1, 'Skoda', 'Fabia', ?, 2020, ?, 'Available')",
            )
            .bind(format!("AB{i:04}"))
            .bind(30.0 + i as f64)
            .execute(pool)
            .await
            .unwrap();
        }
    }

    fn criteria(filter: ActiveFilter, sort: SortState, page: i64) -> ListCriteria {
        ListCriteria { filter, sort, page }
    }

    #[tokio::test]
    async fn test_second_page_of_twenty_five_cars() {
        let pool = test_pool().await;
        seed_cars(&pool, 25).await;

        let page: ListPage<CarRow> = paginate(
            &pool,
            &tables::CARS,
            &criteria(ActiveFilter::Amount(0.0), SortState::RentalCostPerDayAsc, 2),
            20,
        )
        .await
        .unwrap();

        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.total_all, 25);
        assert_eq!(page.filtered_count, 25);
        assert_eq!(page.page.total_pages, 2);
        assert!(page.page.has_previous_page());
        assert!(!page.page.has_next_page());
        assert_eq!(page.rows[0].rental_cost_per_day, 50.0);
        assert_eq!(page.rows[0].class_name, "Economy");
    }

    #[tokio::test]
    async fn test_descending_sort_and_page_past_the_end() {
        let pool = test_pool().await;
        seed_cars(&pool, 3).await;

        let page: ListPage<CarRow> = paginate(
            &pool,
            &tables::CARS,
            &criteria(ActiveFilter::Amount(0.0), SortState::RentalCostPerDayDesc, 1),
            20,
        )
        .await
        .unwrap();
        let costs: Vec<f64> = page.rows.iter().map(|r| r.rental_cost_per_day).collect();
        assert_eq!(costs, vec![32.0, 31.0, 30.0]);

        let beyond: ListPage<CarRow> = paginate(
            &pool,
            &tables::CARS,
            &criteria(ActiveFilter::Amount(0.0), SortState::RentalCostPerDayDesc, 4),
            20,
        )
        .await
        .unwrap();
        assert!(beyond.rows.is_empty());
        assert_eq!(beyond.page.page, 4);
        assert_eq!(beyond.filtered_count, 3);
    }

    #[tokio::test]
    async fn test_non_positive_page_returns_first_rows() {
        let pool = test_pool().await;
        seed_cars(&pool, 4).await;

        for page_number in [0, -2] {
            let page: ListPage<CarRow> = paginate(
                &pool,
                &tables::CARS,
                &criteria(ActiveFilter::Amount(0.0), SortState::RentalCostPerDayAsc, page_number),
                3,
            )
            .await
            .unwrap();
            assert_eq!(page.rows.len(), 3);
            assert_eq!(page.rows[0].rental_cost_per_day, 30.0);
            assert_eq!(page.page.page, page_number);
            assert!(!page.page.has_previous_page());
        }
    }

    #[tokio::test]
    async fn test_maintenance_cost_filter_counts() {
        let pool = test_pool().await;
        seed_cars(&pool, 1).await;
        for cost in [100.0, 200.0, 100.0, 200.0, 200.0] {
            sqlx::query(
                "INSERT INTO maintenances (car_id, maintenance_date, description, cost) \
                 VALUES (1, '2024-03-01', 'Oil change', ?)",
            )
            .bind(cost)
            .execute(&pool)
            .await
            .unwrap();
        }

        let page: ListPage<MaintenanceRow> = paginate(
            &pool,
            &tables::MAINTENANCES,
            &criteria(ActiveFilter::Amount(100.0), SortState::CostAsc, 1),
            20,
        )
        .await
        .unwrap();

        assert_eq!(page.filtered_count, 2);
        assert_eq!(page.total_all, 5);
        assert_eq!(page.page.total_pages, 1);
        assert!(page.rows.iter().all(|r| r.cost == 100.0));
        assert_eq!(page.rows[0].brand, "Skoda");
    }

    #[tokio::test]
    async fn test_phone_filter_is_case_sensitive_substring() {
        let pool = test_pool().await;
        for (name, phone) in [
            ("Ann Lee", "+1-555-0100"),
            ("Bob Ray", "+1-777-0101"),
            ("Cid Moe", "ext555x"),
            ("Dee Fox", "EXT555X"),
        ] {
            sqlx::query(
                "INSERT INTO clients (full_name, license_number, phone_number) VALUES (?, 'L-1', ?)",
            )
            .bind(name)
            .bind(phone)
            .execute(&pool)
            .await
            .unwrap();
        }

        let page: ListPage<ClientRow> = paginate(
            &pool,
            &tables::CLIENTS,
            &criteria(ActiveFilter::Text("555".to_string()), SortState::PhoneNumberAsc, 1),
            20,
        )
        .await
        .unwrap();
        assert_eq!(page.filtered_count, 3);
        assert_eq!(page.total_all, 4);

        let page: ListPage<ClientRow> = paginate(
            &pool,
            &tables::CLIENTS,
            &criteria(ActiveFilter::Text("ext".to_string()), SortState::PhoneNumberAsc, 1),
            20,
        )
        .await
        .unwrap();
        assert_eq!(page.filtered_count, 1);
        assert_eq!(page.rows[0].full_name, "Cid Moe");
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() {
        let pool = test_pool().await;
        seed_cars(&pool, 7).await;
        let request = criteria(ActiveFilter::Amount(0.0), SortState::RentalCostPerDayDesc, 2);

        let first: ListPage<CarRow> = paginate(&pool, &tables::CARS, &request, 3).await.unwrap();
        let second: ListPage<CarRow> = paginate(&pool, &tables::CARS, &request, 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_row_count_formula() {
        let pool = test_pool().await;
        seed_cars(&pool, 11).await;

        for page_size in [1_i64, 4, 5, 11, 20] {
            for page_number in 1..=4_i64 {
                let page: ListPage<CarRow> = paginate(
                    &pool,
                    &tables::CARS,
                    &criteria(ActiveFilter::Amount(0.0), SortState::No, page_number),
                    page_size,
                )
                .await
                .unwrap();
                let expected = page_size.min((11 - (page_number - 1) * page_size).max(0));
                assert_eq!(page.rows.len() as i64, expected);
                assert_eq!(page.page.total_pages, (11 + page_size - 1) / page_size);
            }
        }
    }
}
