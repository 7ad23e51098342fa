//! The paginated transaction search route.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    sale_month::SaleMonth,
    transaction::{Transaction, TransactionQuery, search_transactions},
};

/// The query parameters accepted by the transaction search route.
///
/// Everything arrives as a raw string so that invalid values can be reported
/// (month) or defaulted (page, perPage) instead of bubbling up as an axum
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsParams {
    /// The month to filter by, 1-12. Required.
    pub month: Option<String>,
    /// Optional free-text search term.
    pub search: Option<String>,
    /// The 1-based page number. Defaults to 1.
    pub page: Option<String>,
    /// The page size. Defaults to 10.
    pub per_page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsResponse {
    transactions: Vec<Transaction>,
    total: u64,
    page: u64,
    per_page: u64,
    total_pages: u64,
}

/// Return one page of transactions for a month, optionally filtered by a
/// search term.
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionsParams>,
) -> Response {
    let month = match SaleMonth::parse(params.month.as_deref().unwrap_or_default()) {
        Ok(month) => month,
        Err(error) => return error.into_response(),
    };

    let query = TransactionQuery {
        month,
        search: params.search,
        page: parse_or_default(params.page.as_deref(), state.pagination_config.default_page),
        per_page: parse_or_default(
            params.per_page.as_deref(),
            state.pagination_config.default_page_size,
        ),
    };

    let connection = state.db_connection.lock().unwrap();

    match search_transactions(&connection, &query) {
        Ok(page) => Json(TransactionsResponse {
            transactions: page.transactions,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        })
        .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Parse a pagination parameter, falling back to `default` when the value is
/// absent, not a number, or zero.
fn parse_or_default(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|&value| value > 0)
        .unwrap_or(default)
}
