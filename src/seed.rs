//! Fetching the upstream seed dataset and bulk-loading it into the store.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    transaction::{Transaction, insert_transactions},
};

/// Fetch the seed dataset from `url` and parse it as a list of transactions.
///
/// # Errors
/// Returns [Error::UpstreamFetch] if the request fails or the server
/// responds with an error status, and [Error::SeedFormat] if the body is not
/// a valid transaction list.
pub async fn fetch_seed_dataset(url: &str) -> Result<Vec<Transaction>, Error> {
    let body = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::UpstreamFetch(error.to_string()))?
        .text()
        .await
        .map_err(|error| Error::UpstreamFetch(error.to_string()))?;

    parse_seed_dataset(&body)
}

/// Parse a seed dataset JSON document into a list of transactions.
///
/// # Errors
/// Returns [Error::SeedFormat] if `body` is not a JSON array of
/// transactions.
pub fn parse_seed_dataset(body: &str) -> Result<Vec<Transaction>, Error> {
    serde_json::from_str(body).map_err(|error| Error::SeedFormat(error.to_string()))
}

/// Check that no transaction in the dataset carries a negative price.
///
/// The upstream dataset leaves negative prices undefined, so the import
/// refuses them outright rather than letting them fall into an arbitrary
/// histogram bucket.
///
/// # Errors
/// Returns [Error::NegativePrice] for the first offending record.
fn validate_prices(transactions: &[Transaction]) -> Result<(), Error> {
    match transactions
        .iter()
        .find(|transaction| transaction.price < 0.0)
    {
        Some(transaction) => Err(Error::NegativePrice(transaction.price)),
        None => Ok(()),
    }
}

/// Fetch the seed dataset and bulk-insert it into the database.
///
/// Responds with a plain text confirmation on success. Running this route
/// twice duplicates every record: the dataset carries no uniqueness key, so
/// none is enforced.
pub async fn get_initialize(State(state): State<AppState>) -> Response {
    let transactions = match fetch_seed_dataset(&state.seed_url).await {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };

    if let Err(error) = validate_prices(&transactions) {
        return error.into_response();
    }

    let connection = state.db_connection.lock().unwrap();

    match insert_transactions(&connection, &transactions) {
        Ok(count) => {
            tracing::info!("loaded {} transactions from {}", count, state.seed_url);
            (StatusCode::OK, "Database initialized").into_response()
        }
        Err(error) => error.into_response(),
    }
}
