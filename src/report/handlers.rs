//! The GET endpoints for the monthly report aggregations.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    filter::TransactionFilter,
    transaction::{Transaction, get_transactions},
};

use super::{
    categories::{CategoryCount, compute_category_breakdown},
    histogram::{PriceBandCount, compute_price_histogram},
    statistics::{Statistics, compute_statistics},
};

/// The query parameters accepted by the report endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportParams {
    /// The calendar month to filter by, as a name or number.
    pub month: Option<String>,
}

/// Handle a GET request for the sale statistics of a month.
pub(crate) async fn get_statistics_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Statistics>, Error> {
    let filter = TransactionFilter::for_month(params.month.as_deref());
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let statistics = compute_statistics(&filter, &connection)?;

    Ok(Json(statistics))
}

/// Handle a GET request for the price histogram of a month.
pub(crate) async fn get_bar_chart_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<PriceBandCount>>, Error> {
    let filter = TransactionFilter::for_month(params.month.as_deref());
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let histogram = compute_price_histogram(&filter, &connection)?;

    Ok(Json(histogram))
}

/// Handle a GET request for the per-category counts of a month.
pub(crate) async fn get_pie_chart_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let filter = TransactionFilter::for_month(params.month.as_deref());
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let breakdown = compute_category_breakdown(&filter, &connection)?;

    Ok(Json(breakdown))
}

/// The combined report bundling the listing, statistics, histogram and
/// category breakdown for one month filter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CombinedReport {
    /// Every transaction matching the month filter, unpaginated.
    pub transactions: Vec<Transaction>,
    /// The sale statistics for the month.
    pub statistics: Statistics,
    /// The price histogram for the month.
    pub chart_data: Vec<PriceBandCount>,
    /// The per-category counts for the month.
    pub pie_data: Vec<CategoryCount>,
}

/// Handle a GET request for the combined monthly report.
///
/// The four sub-queries run under a single acquisition of the connection
/// lock, so they describe one logical snapshot of the data. If any sub-query
/// fails the whole request fails; a partial report is never served.
pub(crate) async fn get_combined_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<CombinedReport>, Error> {
    let filter = TransactionFilter::for_month(params.month.as_deref());
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let report = CombinedReport {
        transactions: get_transactions(&filter, &connection)?,
        statistics: compute_statistics(&filter, &connection)?,
        chart_data: compute_price_histogram(&filter, &connection)?,
        pie_data: compute_category_breakdown(&filter, &connection)?,
    };

    Ok(Json(report))
}
