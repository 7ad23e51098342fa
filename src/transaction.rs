//! The transaction record and its SQLite store.

use rusqlite::{Connection, Row, params, params_from_iter, types::Value};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, pagination::total_pages, sale_month::SaleMonth};

/// One product-sale record, sold or unsold.
///
/// `id` is the identifier carried by the upstream dataset. It is not
/// unique-enforced at the storage level, so importing the dataset twice
/// yields duplicate records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The numeric identifier from the upstream dataset.
    pub id: i64,
    /// The product title.
    pub title: String,
    /// The product description.
    pub description: String,
    /// The product price. Never negative for imported records.
    pub price: f64,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to the product image.
    pub image: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the sale (or listing) happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

const TRANSACTION_COLUMNS: &str =
    "external_id, title, description, price, category, image, sold, date_of_sale";

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

/// Bulk-insert `transactions` into the database inside one SQL transaction.
///
/// The sale month is derived from each record's sale date and stored
/// alongside it. Records that already exist are not detected: running the
/// same import twice duplicates them.
///
/// # Errors
/// Returns an [Error::SqlError] if any insert fails. No records are inserted
/// in that case.
pub fn insert_transactions(
    connection: &Connection,
    transactions: &[Transaction],
) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    {
        let mut statement = tx.prepare(&format!(
            "INSERT INTO product_transaction ({TRANSACTION_COLUMNS}, sale_month)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ))?;

        for transaction in transactions {
            statement.execute(params![
                transaction.id,
                transaction.title,
                transaction.description,
                transaction.price,
                transaction.category,
                transaction.image,
                transaction.sold,
                transaction.date_of_sale,
                SaleMonth::of(transaction.date_of_sale).as_u8(),
            ])?;
        }
    }

    tx.commit()?;

    Ok(transactions.len())
}

/// Retrieve all transactions whose sale date falls in `month`, any year, in
/// insertion order.
///
/// An empty vector is returned if no transaction falls in the month.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn select_by_month(
    connection: &Connection,
    month: SaleMonth,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM product_transaction
             WHERE sale_month = :month ORDER BY id ASC"
        ))?
        .query_map(&[(":month", &month.as_u8())], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Defines how transactions should be fetched by [search_transactions].
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    /// Include only transactions whose sale date falls in this month.
    pub month: SaleMonth,
    /// Free-text search term. Matches transactions whose title or
    /// description contains the term (case-insensitive), or whose price
    /// equals the term when it parses as a number. `None` or an empty string
    /// matches everything.
    pub search: Option<String>,
    /// The 1-based page number to fetch.
    pub page: u64,
    /// The number of transactions per page.
    pub per_page: u64,
}

/// One page of search results along with the pagination totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    /// The transactions on the requested page, in insertion order.
    pub transactions: Vec<Transaction>,
    /// The number of transactions matching the query across all pages.
    pub total: u64,
    /// The page that was fetched.
    pub page: u64,
    /// The page size that was used.
    pub per_page: u64,
    /// `ceil(total / per_page)`.
    pub total_pages: u64,
}

/// Retrieve one page of transactions matching `query`.
///
/// The month filter and the free-text search are two independent predicates
/// combined with AND: a record must fall in the requested month and, when a
/// search term is given, match it by title, description or price.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn search_transactions(
    connection: &Connection,
    query: &TransactionQuery,
) -> Result<TransactionPage, Error> {
    let mut where_clause = String::from("sale_month = ?1");
    let mut parameters = vec![Value::Integer(query.month.as_u8() as i64)];

    if let Some(term) = query.search.as_deref().filter(|term| !term.is_empty()) {
        let pattern = Value::Text(format!("%{term}%"));

        let mut search_parts = vec![format!("title LIKE ?{}", parameters.len() + 1)];
        parameters.push(pattern.clone());

        search_parts.push(format!("description LIKE ?{}", parameters.len() + 1));
        parameters.push(pattern);

        if let Ok(price) = term.parse::<f64>() {
            search_parts.push(format!("price = ?{}", parameters.len() + 1));
            parameters.push(Value::Real(price));
        }

        where_clause = format!("{where_clause} AND ({})", search_parts.join(" OR "));
    }

    let total = connection
        .prepare(&format!(
            "SELECT COUNT(*) FROM product_transaction WHERE {where_clause}"
        ))?
        .query_row(params_from_iter(parameters.iter()), |row| {
            row.get::<_, i64>(0)
        })? as u64;

    let page = query.page.max(1);
    let per_page = query.per_page.max(1);
    let offset = (page - 1) * per_page;

    let transactions = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM product_transaction
             WHERE {where_clause} ORDER BY id ASC LIMIT {per_page} OFFSET {offset}"
        ))?
        .query_map(params_from_iter(parameters.iter()), map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        transactions,
        total,
        page,
        per_page,
        total_pages: total_pages(total, per_page),
    })
}
