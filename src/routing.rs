//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_new_category_page,
    },
    endpoints,
    home::get_home_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, dismiss_transaction_sheet,
        get_edit_transaction_page, get_new_transaction_page, get_transaction_sheet,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::TRANSACTION_SHEET, get(get_transaction_sheet))
        .route(endpoints::DISMISS_SHEET, get(dismiss_transaction_sheet))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::PUT_TRANSACTION, put(update_transaction_endpoint))
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::COFFEE, get(get_coffee))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, endpoints,
        transaction::{TransactionForm, TransactionKind},
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open database");
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn pages_are_served() {
        let server = get_test_server();

        server.get(endpoints::ROOT).await.assert_status_ok();
        server
            .get(endpoints::NEW_TRANSACTION_VIEW)
            .await
            .assert_status_ok();
        server
            .get(endpoints::CATEGORIES_VIEW)
            .await
            .assert_status_ok();
        server
            .get(endpoints::NEW_CATEGORY_VIEW)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn created_transaction_shows_up_on_the_home_page() {
        let server = get_test_server();

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&TransactionForm {
                name: "Lunch".to_owned(),
                amount: 35000.0,
                date: date!(2025 - 08 - 20),
                description: None,
                category_id: None,
                kind: TransactionKind::Expense,
            })
            .await
            .assert_status_see_other();

        let home = server.get(endpoints::ROOT).await;
        home.assert_status_ok();
        assert!(
            home.text().contains("Lunch"),
            "want the new transaction in the feed"
        );
    }

    #[tokio::test]
    async fn coffee_route_returns_teapot() {
        let server = get_test_server();

        let response = server.get(endpoints::COFFEE).await;

        response.assert_status(StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn unknown_route_returns_styled_404_page() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"), "want the styled 404 page");
    }
}
