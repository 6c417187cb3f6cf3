//! Summary statistics over the filtered sale records.

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;

use crate::{Error, filter::TransactionFilter};

/// Sale totals for one month filter.
///
/// All three numbers are computed over the same filtered set, independent of
/// pagination. An empty set yields zeros, never nulls.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of `price` across all matching records.
    pub total: f64,
    /// The count of matching records that have been sold.
    pub sold_items: u64,
    /// The count of matching records that have not been sold.
    pub not_sold_items: u64,
}

/// Compute the sale statistics for the records matching `filter`.
///
/// The three aggregates come from a single query so they always describe the
/// same snapshot of the data.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn compute_statistics(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Statistics, Error> {
    let (where_clause, parameters) = filter.where_clause();

    // TOTAL returns 0.0 for an empty set where SUM would return NULL.
    let query = format!(
        "SELECT TOTAL(price),
                COUNT(CASE WHEN is_sold = 1 THEN 1 END),
                COUNT(CASE WHEN is_sold = 0 THEN 1 END)
         FROM \"transaction\" {where_clause}"
    );

    connection
        .query_row(&query, params_from_iter(parameters.iter()), |row| {
            Ok(Statistics {
                total: row.get(0)?,
                sold_items: row.get::<usize, i64>(1)? as u64,
                not_sold_items: row.get::<usize, i64>(2)? as u64,
            })
        })
        .map_err(|error| error.into())
}
