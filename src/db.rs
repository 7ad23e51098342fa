//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::Error;

/// Create the transaction table and its month index if they do not exist.
///
/// The sale month is stored in its own indexed column, derived from the sale
/// date when a record is inserted, so that month-of-sale (any year) can be
/// queried directly.
///
/// # Errors
/// Returns an [Error::SqlError] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product_transaction (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                external_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL
                );
            CREATE INDEX IF NOT EXISTS idx_product_transaction_sale_month
                ON product_transaction(sale_month);",
    )?;

    Ok(())
}
