//! Groups the filtered sale records by product category for the pie chart.

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;

use crate::{Error, filter::TransactionFilter};

/// The label reported for records without a category.
pub const UNCATEGORISED_LABEL: &str = "Uncategorised";

/// The number of records in one category.
#[derive(Debug, PartialEq, Serialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// How many matching records carry this category.
    pub count: u64,
}

/// Count the records matching `filter` per distinct category value.
///
/// Records without a category are grouped under [UNCATEGORISED_LABEL].
/// Entries are sorted by label so the output is deterministic; the output
/// cardinality equals the number of distinct values present.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn compute_category_breakdown(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    let (where_clause, parameters) = filter.where_clause();

    let query =
        format!("SELECT category, COUNT(id) FROM \"transaction\" {where_clause} GROUP BY category");

    let mut breakdown = connection
        .prepare(&query)?
        .query_map(params_from_iter(parameters.iter()), |row| {
            let category = row
                .get::<usize, Option<String>>(0)?
                .unwrap_or_else(|| UNCATEGORISED_LABEL.to_owned());
            let count = row.get::<usize, i64>(1)? as u64;

            Ok(CategoryCount { category, count })
        })?
        .collect::<Result<Vec<CategoryCount>, rusqlite::Error>>()?;

    breakdown.sort_by(|a, b| a.category.cmp(&b.category));

    Ok(breakdown)
}

#[cfg(test)]
mod categories_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        filter::TransactionFilter,
        transaction::{Transaction, insert_transactions},
    };

    use super::{CategoryCount, compute_category_breakdown};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn counts_per_distinct_category() {
        let conn = get_test_connection();
        insert_transactions(
            vec![
                Transaction::build("A", 10.0, date!(2022 - 03 - 01)).category(Some("electronics")),
                Transaction::build("B", 20.0, date!(2022 - 03 - 02)).category(Some("clothing")),
                Transaction::build("C", 30.0, date!(2022 - 03 - 03)).category(Some("electronics")),
                // Different month, must not be counted.
                Transaction::build("D", 40.0, date!(2022 - 08 - 04)).category(Some("clothing")),
            ],
            &conn,
        )
        .unwrap();

        let breakdown =
            compute_category_breakdown(&TransactionFilter::for_month(Some("March")), &conn)
                .unwrap();

        assert_eq!(
            breakdown,
            vec![
                CategoryCount {
                    category: "clothing".to_owned(),
                    count: 1,
                },
                CategoryCount {
                    category: "electronics".to_owned(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn missing_category_is_its_own_group() {
        let conn = get_test_connection();
        insert_transactions(
            vec![
                Transaction::build("A", 10.0, date!(2022 - 03 - 01)),
                Transaction::build("B", 20.0, date!(2022 - 03 - 02)).category(Some("books")),
                Transaction::build("C", 30.0, date!(2022 - 03 - 03)),
            ],
            &conn,
        )
        .unwrap();

        let breakdown =
            compute_category_breakdown(&TransactionFilter::for_month(None), &conn).unwrap();

        let uncategorised = breakdown
            .iter()
            .find(|entry| entry.category == "Uncategorised")
            .expect("records without a category should form their own group");
        assert_eq!(uncategorised.count, 2);
    }

    #[test]
    fn category_counts_sum_to_the_filtered_total() {
        let conn = get_test_connection();
        insert_transactions(
            vec![
                Transaction::build("A", 10.0, date!(2022 - 03 - 01)).category(Some("toys")),
                Transaction::build("B", 20.0, date!(2022 - 03 - 02)),
                Transaction::build("C", 30.0, date!(2022 - 03 - 03)).category(Some("toys")),
                Transaction::build("D", 40.0, date!(2022 - 03 - 04)).category(Some("garden")),
            ],
            &conn,
        )
        .unwrap();

        let breakdown =
            compute_category_breakdown(&TransactionFilter::for_month(Some("3")), &conn).unwrap();

        let total: u64 = breakdown.iter().map(|entry| entry.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn empty_month_returns_no_groups() {
        let conn = get_test_connection();

        let breakdown =
            compute_category_breakdown(&TransactionFilter::for_month(Some("April")), &conn)
                .unwrap();

        assert!(breakdown.is_empty());
    }
}
