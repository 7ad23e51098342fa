//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints, monthly_report::get_monthly_report, seed::get_initialize,
    transactions::get_transactions,
};

/// Return a router with all the app's routes.
///
/// The CORS layer is permissive because the browser frontend is served from
/// a different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::INITIALIZE, get(get_initialize))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::MONTHLY_DATA, get(get_monthly_report))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::{
        app_state::test_utils::test_state,
        build_router, endpoints,
        transaction::{insert_transactions, test_data::transaction},
    };

    fn test_server() -> TestServer {
        let state = test_state();
        seeded_test_server(state, &[])
    }

    fn seeded_test_server(
        state: crate::AppState,
        records: &[crate::transaction::Transaction],
    ) -> TestServer {
        if !records.is_empty() {
            let connection = state.db_connection.lock().unwrap();
            insert_transactions(&connection, records).unwrap();
        }

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn transactions_route_rejects_invalid_months() {
        let server = test_server();

        for month in ["0", "13", "abc"] {
            let response = server
                .get(endpoints::TRANSACTIONS)
                .add_query_param("month", month)
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert!(body.get("message").is_some());
        }
    }

    #[tokio::test]
    async fn data_route_rejects_invalid_months() {
        let server = test_server();

        for month in ["0", "13", "abc"] {
            let response = server
                .get(endpoints::MONTHLY_DATA)
                .add_query_param("month", month)
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn data_route_requires_a_month() {
        let server = test_server();

        let response = server.get(endpoints::MONTHLY_DATA).await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["message"], "the month query parameter is required");
    }

    #[tokio::test]
    async fn transactions_route_pages_through_the_month() {
        let records: Vec<_> = (1..=25).map(|id| transaction(id, 50.0, true)).collect();
        let server = seeded_test_server(test_state(), &records);

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "11")
            .add_query_param("page", "3")
            .await;

        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["total"], 25);
        assert_eq!(body["page"], 3);
        assert_eq!(body["perPage"], 10);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 5);
        assert_eq!(body["transactions"][0]["dateOfSale"], "2021-11-27T20:29:54Z");
    }

    #[tokio::test]
    async fn transactions_route_combines_month_and_search() {
        let mut wanted = transaction(1, 50.0, true);
        wanted.title = "Walnut Desk".to_string();
        let server = seeded_test_server(
            test_state(),
            &[wanted, transaction(2, 60.0, true)],
        );

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "11")
            .add_query_param("search", "walnut")
            .await;

        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["total"], 1);
        assert_eq!(body["transactions"][0]["title"], "Walnut Desk");
    }

    #[tokio::test]
    async fn data_route_returns_the_composite_report() {
        let server = seeded_test_server(
            test_state(),
            &[
                transaction(1, 50.0, true),
                transaction(2, 150.0, false),
                transaction(3, 999.0, true),
            ],
        );

        let response = server
            .get(endpoints::MONTHLY_DATA)
            .add_query_param("month", "11")
            .await;

        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["statistics"]["totalSaleAmount"], 1049.0);
        assert_eq!(body["barChart"]["0-100"], 1);
        assert_eq!(body["barChart"]["201-300"], 0);
        assert_eq!(body["pieChart"]["electronics"], 3);
    }
}
