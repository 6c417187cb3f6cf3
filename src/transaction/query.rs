//! Filtered listing and counting of sale transactions.

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::Serialize;

use crate::{Error, filter::TransactionFilter, pagination::PageWindow};

use super::models::{Transaction, map_transaction_row};

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, price, date_of_sale, is_sold, category FROM \"transaction\"";

/// One page of sale transactions plus the total count of records matching
/// the filter, independent of the page window.
#[derive(Debug, PartialEq, Serialize)]
pub struct TransactionListing {
    /// The transactions on the requested page, in insertion (ID) order.
    pub transactions: Vec<Transaction>,
    /// How many records match the filter across all pages.
    pub total: u64,
}

/// Retrieve one page of transactions matching `filter`, along with the
/// filter-wide total.
///
/// Rows are ordered by ID so that pages are disjoint and stable for a fixed
/// snapshot of the data.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn list_transactions(
    filter: &TransactionFilter,
    window: PageWindow,
    connection: &Connection,
) -> Result<TransactionListing, Error> {
    let (where_clause, mut parameters) = filter.where_clause();

    let query = format!("{SELECT_COLUMNS} {where_clause} ORDER BY id ASC LIMIT ? OFFSET ?");
    // SQLite treats a negative LIMIT as "no limit" and a negative OFFSET as
    // zero, so clamp rather than cast: a window too large for i64 must still
    // page, not dump the whole table.
    parameters.push(Value::Integer(
        i64::try_from(window.per_page).unwrap_or(i64::MAX),
    ));
    parameters.push(Value::Integer(
        i64::try_from(window.offset()).unwrap_or(i64::MAX),
    ));

    let transactions = connection
        .prepare(&query)?
        .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect::<Result<Vec<Transaction>, Error>>()?;

    let total = count_transactions(filter, connection)?;

    Ok(TransactionListing {
        transactions,
        total,
    })
}

/// Retrieve every transaction matching `filter`, unpaginated, in ID order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn get_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, parameters) = filter.where_clause();

    let query = format!("{SELECT_COLUMNS} {where_clause} ORDER BY id ASC");

    connection
        .prepare(&query)?
        .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Count the transactions matching `filter`, ignoring pagination.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn count_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let (where_clause, parameters) = filter.where_clause();

    let query = format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}");

    connection
        .query_row(&query, params_from_iter(parameters.iter()), |row| {
            row.get::<usize, i64>(0)
        })
        .map(|count| count as u64)
        .map_err(|error| error.into())
}
