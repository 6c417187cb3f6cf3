//! The GET endpoint for the paginated transaction listing.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, Error, filter::TransactionFilter};

use super::query::{TransactionListing, list_transactions};

/// The query parameters accepted by the transaction listing endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    /// The calendar month to filter by, as a name or number.
    pub month: Option<String>,
    /// Free-text search over title, description and price.
    pub search: Option<String>,
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The number of records per page.
    pub per_page: Option<u64>,
}

/// Handle a GET request for one page of transactions matching the month and
/// search filters.
///
/// # Errors
/// Responds with a server error if the store query fails.
pub(crate) async fn get_transactions_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionListing>, Error> {
    let filter = TransactionFilter::new(params.month.as_deref(), params.search.as_deref());
    let window = state
        .pagination_config
        .resolve(params.page, params.per_page);

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let listing = list_transactions(&filter, window, &connection)?;

    Ok(Json(listing))
}

#[cfg(test)]
mod list_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::macros::date;

    use crate::{
        AppState, build_router, endpoints,
        transaction::{Transaction, insert_transactions},
    };

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");

        let state = AppState::new(db_connection, Default::default())
            .expect("Could not create app state.");

        {
            let connection = state.db_connection.lock().unwrap();
            insert_transactions(
                vec![
                    Transaction::build("Product 1", 50.0, date!(2022 - 03 - 01))
                        .description("First sample product")
                        .sold(true)
                        .category(Some("electronics")),
                    Transaction::build("Product 2", 150.0, date!(2022 - 03 - 14))
                        .description("Second sample product")
                        .category(Some("clothing")),
                    Transaction::build("Bookshelf", 950.0, date!(2022 - 03 - 30))
                        .description("A tall bookshelf")
                        .sold(true),
                    Transaction::build("Desk Lamp", 45.5, date!(2022 - 05 - 02))
                        .description("An LED desk lamp")
                        .category(Some("electronics")),
                ],
                &connection,
            )
            .expect("Could not seed transactions");
        }

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn lists_transactions_with_filter_wide_total() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("perPage", "2")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn serializes_records_with_camel_case_keys() {
        let server = get_test_server();

        let body: Value = server.get(endpoints::TRANSACTIONS).await.json();

        let first = &body["transactions"][0];
        assert_eq!(first["title"], "Product 1");
        assert_eq!(first["dateOfSale"], "2022-03-01");
        assert_eq!(first["isSold"], true);
        assert_eq!(first["category"], "electronics");
    }

    #[tokio::test]
    async fn search_filters_by_title_or_description() {
        let server = get_test_server();

        let body: Value = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("search", "product 1")
            .await
            .json();

        assert_eq!(body["total"], 1);
        assert_eq!(body["transactions"][0]["title"], "Product 1");
    }

    #[tokio::test]
    async fn oversized_page_window_returns_empty_page() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("page", "18446744073709551615")
            .add_query_param("perPage", "1000")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["transactions"].as_array().unwrap().len(), 0);
        assert_eq!(body["total"], 4);
    }

    #[tokio::test]
    async fn empty_month_is_a_success_not_an_error() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "April")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["transactions"].as_array().unwrap().len(), 0);
        assert_eq!(body["total"], 0);
    }
}
