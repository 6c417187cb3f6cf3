//! The API endpoint URIs.

/// The route for the paginated, filterable transaction listing.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for monthly summary statistics.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price histogram used by the bar chart.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the per-category counts used by the pie chart.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the combined report bundling all of the above.
pub const COMBINED: &str = "/api/combined";

// These tests are here so that we know the routes will not panic when parsed
// by axum's router.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED);
    }
}
