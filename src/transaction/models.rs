//! Defines the core data model and database functions for sale transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

// Dates go over the wire as "YYYY-MM-DD" strings, matching how they are
// stored in the date_of_sale column.
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// A record of a product that was put up for sale.
///
/// Records are inserted once at seed time and then only read; there is no
/// update or delete path. To create a new `Transaction`, use
/// [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store on creation.
    pub id: TransactionId,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The non-negative sale price.
    pub price: f64,
    /// The date the sale happened or was listed.
    #[serde(with = "iso_date")]
    pub date_of_sale: Date,
    /// Whether the product has been sold.
    pub is_sold: bool,
    /// The product category, if any.
    pub category: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: Date) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: String::new(),
            price,
            date_of_sale,
            is_sold: false,
            category: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID is assigned by the database on insert.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The name of the product.
    pub title: String,
    /// A text description of the product. Defaults to the empty string.
    pub description: String,
    /// The non-negative sale price.
    pub price: f64,
    /// The date the sale happened or was listed.
    pub date_of_sale: Date,
    /// Whether the product has been sold. Defaults to false.
    pub is_sold: bool,
    /// The product category. Defaults to none.
    pub category: Option<String>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set whether the product has been sold.
    pub fn sold(mut self, is_sold: bool) -> Self {
        self.is_sold = is_sold;
        self
    }

    /// Set the product category for the transaction.
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(str::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new sale transaction in the database from a builder.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, description, price, date_of_sale, is_sold, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, description, price, date_of_sale, is_sold, category",
        )?
        .query_row(
            (
                builder.title,
                builder.description,
                builder.price,
                builder.date_of_sale,
                builder.is_sold,
                builder.category,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Insert many sale transactions in one SQL transaction.
///
/// This is the bulk seeding path; the query API never creates records.
///
/// # Errors
/// Returns an [Error::SqlError] if any insert fails. No records are inserted
/// in that case.
pub fn insert_transactions(
    builders: Vec<TransactionBuilder>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let tx = connection.unchecked_transaction()?;
    let mut inserted = Vec::with_capacity(builders.len());

    {
        let mut statement = tx.prepare(
            "INSERT INTO \"transaction\" (title, description, price, date_of_sale, is_sold, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, description, price, date_of_sale, is_sold, category",
        )?;

        for builder in builders {
            let transaction = statement.query_row(
                (
                    builder.title,
                    builder.description,
                    builder.price,
                    builder.date_of_sale,
                    builder.is_sold,
                    builder.category,
                ),
                map_transaction_row,
            )?;

            inserted.push(transaction);
        }
    }

    tx.commit()?;
    Ok(inserted)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                date_of_sale TEXT NOT NULL,
                is_sold INTEGER NOT NULL,
                category TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        date_of_sale: row.get(4)?,
        is_sold: row.get(5)?,
        category: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::db::initialize;

    use super::{Transaction, create_transaction, insert_transactions};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("Wireless Mouse", 29.99, date!(2022 - 03 - 12))
                .description("A wireless mouse")
                .sold(true)
                .category(Some("electronics")),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.id, 1);
                assert_eq!(transaction.title, "Wireless Mouse");
                assert_eq!(transaction.price, 29.99);
                assert_eq!(transaction.date_of_sale, date!(2022 - 03 - 12));
                assert!(transaction.is_sold);
                assert_eq!(transaction.category.as_deref(), Some("electronics"));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_allows_missing_category() {
        let conn = get_test_connection();

        let transaction =
            create_transaction(Transaction::build("Mystery Box", 5.0, date!(2022 - 01 - 01)), &conn)
                .expect("Could not create transaction");

        assert_eq!(transaction.category, None);
    }

    #[test]
    fn insert_many_assigns_sequential_ids() {
        let conn = get_test_connection();
        let builders = vec![
            Transaction::build("Product 1", 10.0, date!(2022 - 01 - 15)),
            Transaction::build("Product 2", 20.0, date!(2022 - 02 - 15)),
            Transaction::build("Product 3", 30.0, date!(2022 - 03 - 15)),
        ];

        let inserted =
            insert_transactions(builders, &conn).expect("Could not insert transactions");

        let ids: Vec<i64> = inserted.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let transaction = Transaction {
            id: 1,
            title: "Laptop".to_owned(),
            description: "A laptop".to_owned(),
            price: 899.0,
            date_of_sale: date!(2022 - 06 - 21),
            is_sold: false,
            category: None,
        };

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["dateOfSale"], "2022-06-21");
        assert_eq!(json["isSold"], false);
        assert!(json["category"].is_null());
    }

    #[test]
    fn deserializes_iso_date_strings() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Laptop",
            "description": "A laptop",
            "price": 899.0,
            "dateOfSale": "2022-06-21",
            "isSold": false,
            "category": null,
        });

        let transaction: Transaction = serde_json::from_value(json).unwrap();

        assert_eq!(transaction.date_of_sale, date!(2022 - 06 - 21));
    }
}
