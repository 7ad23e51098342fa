//! Salesboard is a small REST backend for a product-sales dashboard.
//!
//! It loads a fixed product-transaction dataset into a SQLite database and
//! serves paginated transaction search plus per-month statistics (sale
//! totals, a price-range histogram and a category distribution) as JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod monthly_report;
mod pagination;
mod routing;
mod sale_month;
mod seed;
mod statistics;
mod transaction;
mod transactions;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use sale_month::SaleMonth;
pub use statistics::{
    PriceHistogram, SalesTotals, category_distribution, price_histogram, sales_totals,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client supplied a month that is not an integer between 1 and 12.
    #[error("invalid month {0:?}: expected an integer between 1 and 12")]
    InvalidMonth(String),

    /// The month query parameter was absent from a request that requires it.
    #[error("the month query parameter is required")]
    MissingMonth,

    /// The seed dataset contained a transaction with a negative price.
    ///
    /// Prices are validated when the dataset is imported so that the
    /// histogram fold never has to guess which bucket a negative price
    /// belongs to.
    #[error("the seed dataset contains a negative price ({0})")]
    NegativePrice(f64),

    /// The seed dataset could not be fetched from the upstream source.
    #[error("could not fetch the seed dataset: {0}")]
    UpstreamFetch(String),

    /// The seed dataset was fetched but could not be parsed as a list of
    /// transactions.
    #[error("could not parse the seed dataset: {0}")]
    SeedFormat(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidMonth(_) | Error::MissingMonth => StatusCode::BAD_REQUEST,
            // The original API returned 501 for query failures on the
            // transactions route; server-side failures are normalized to 500
            // here.
            Error::NegativePrice(_)
            | Error::UpstreamFetch(_)
            | Error::SeedFormat(_)
            | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
