//! The combined monthly statistics route.
//!
//! One filtered scan feeds three independent folds; the results are returned
//! as a single composite response.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    sale_month::SaleMonth,
    statistics::{PriceHistogram, SalesTotals, category_distribution, price_histogram, sales_totals},
    transaction::{Transaction, select_by_month},
};

/// The query parameters accepted by the monthly statistics route.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyReportParams {
    /// The month to report on, 1-12. Required.
    pub month: Option<String>,
}

/// The composite response for one month: sale totals, the price histogram
/// for the bar chart and the category distribution for the pie chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// Sale totals per [sales_totals].
    pub statistics: SalesTotals,
    /// Price-bucket counts per [price_histogram].
    pub bar_chart: PriceHistogram,
    /// Category counts per [category_distribution].
    pub pie_chart: IndexMap<String, u64>,
}

/// Build the monthly report for `transactions`.
pub fn build_monthly_report(transactions: &[Transaction]) -> MonthlyReport {
    MonthlyReport {
        statistics: sales_totals(transactions),
        bar_chart: price_histogram(transactions),
        pie_chart: category_distribution(transactions),
    }
}

/// Return the sale totals, price histogram and category distribution for one
/// month (any year).
pub async fn get_monthly_report(
    State(state): State<AppState>,
    Query(params): Query<MonthlyReportParams>,
) -> Response {
    let raw_month = match params.month {
        Some(raw_month) => raw_month,
        None => return Error::MissingMonth.into_response(),
    };

    let month = match SaleMonth::parse(&raw_month) {
        Ok(month) => month,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    let filtered_set = match select_by_month(&connection, month) {
        Ok(filtered_set) => filtered_set,
        Err(error) => return error.into_response(),
    };
    drop(connection);

    Json(build_monthly_report(&filtered_set)).into_response()
}

#[cfg(test)]
mod monthly_report_route_tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };

    use crate::{
        app_state::test_utils::test_state,
        monthly_report::{MonthlyReportParams, get_monthly_report},
        transaction::{insert_transactions, test_data::transaction},
    };

    #[tokio::test]
    async fn missing_month_is_a_client_error() {
        let state = test_state();

        let response =
            get_monthly_report(State(state), Query(MonthlyReportParams::default())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_month_is_a_client_error() {
        let state = test_state();
        let params = MonthlyReportParams {
            month: Some("abc".to_string()),
        };

        let response = get_monthly_report(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn report_combines_all_three_folds() {
        let state = test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            insert_transactions(
                &connection,
                &[
                    transaction(1, 50.0, true),
                    transaction(2, 150.0, false),
                    transaction(3, 999.0, true),
                ],
            )
            .unwrap();
        }
        let params = MonthlyReportParams {
            month: Some("11".to_string()),
        };

        let response = get_monthly_report(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["statistics"]["totalSaleAmount"], 1049.0);
        assert_eq!(body["statistics"]["totalSoldItems"], 2);
        assert_eq!(body["statistics"]["totalNotSoldItems"], 1);
        assert_eq!(body["barChart"]["0-100"], 1);
        assert_eq!(body["barChart"]["101-200"], 1);
        assert_eq!(body["barChart"]["901-above"], 1);
        assert_eq!(body["barChart"]["401-500"], 0);
        assert_eq!(body["pieChart"]["electronics"], 3);
    }

    #[tokio::test]
    async fn empty_month_reports_zero_totals() {
        let state = test_state();
        let params = MonthlyReportParams {
            month: Some("4".to_string()),
        };

        let response = get_monthly_report(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["statistics"]["totalSaleAmount"], 0.0);
        assert_eq!(body["statistics"]["totalSoldItems"], 0);
        assert_eq!(body["statistics"]["totalNotSoldItems"], 0);
        assert_eq!(
            body["pieChart"],
            serde_json::json!({}),
            "no zero-filled categories"
        );
    }
}
