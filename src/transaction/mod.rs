//! The sale transaction entity, its database queries and its listing endpoint.

mod list_endpoint;
mod models;
mod query;

pub(crate) use list_endpoint::get_transactions_endpoint;
pub use models::{Transaction, TransactionBuilder, create_transaction, insert_transactions};
pub(crate) use models::create_transaction_table;
pub(crate) use query::get_transactions;
