//! Partitions sale prices into fixed bands for the bar chart.

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;

use crate::{Error, filter::TransactionFilter};

/// The labels of the ten price bands, in ascending order.
///
/// Band 0 covers `[0, 100]`; each following band covers the next
/// half-open-below interval `(100·i, 100·(i+1)]`, so a price exactly on a
/// boundary belongs to the lower band; the final band is unbounded above.
const BAND_LABELS: [&str; 10] = [
    "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700", "701-800",
    "801-900", "901-above",
];

/// The number of records in one price band.
#[derive(Debug, PartialEq, Serialize)]
pub struct PriceBandCount {
    /// The band label, e.g. "101-200" or "901-above".
    pub range: String,
    /// How many matching records have a price in this band.
    pub count: u64,
}

/// The index of the band that claims `price`.
///
/// Every non-negative price lands in exactly one band.
fn band_index(price: f64) -> usize {
    if price <= 100.0 {
        return 0;
    }

    let index = (price / 100.0).ceil() as usize - 1;
    index.min(BAND_LABELS.len() - 1)
}

/// Compute the price histogram for the records matching `filter`.
///
/// Always returns all ten bands in ascending order, including bands with a
/// zero count.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn compute_price_histogram(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<PriceBandCount>, Error> {
    let (where_clause, parameters) = filter.where_clause();

    let query = format!("SELECT price FROM \"transaction\" {where_clause}");

    let prices = connection
        .prepare(&query)?
        .query_map(params_from_iter(parameters.iter()), |row| {
            row.get::<usize, f64>(0)
        })?
        .collect::<Result<Vec<f64>, rusqlite::Error>>()?;

    let mut counts = [0u64; BAND_LABELS.len()];
    for price in prices {
        counts[band_index(price)] += 1;
    }

    Ok(BAND_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| PriceBandCount {
            range: (*label).to_owned(),
            count,
        })
        .collect())
}
