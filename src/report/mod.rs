//! Monthly aggregations over the sale records: summary statistics, the price
//! histogram, the per-category breakdown, and the combined report endpoint.

mod categories;
mod handlers;
mod histogram;
mod statistics;

pub(crate) use handlers::{
    get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint, get_statistics_endpoint,
};
