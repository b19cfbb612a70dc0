//! Endpoint for deleting a transaction.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, home::render_home_content, repository::FinanceRepository,
    transaction::TransactionId,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
    /// The data facade for deleting transactions.
    pub repository: FinanceRepository,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            repository: state.repository.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// On success the response body is the re-rendered home feed, which replaces
/// the feed the delete button lives in.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.repository.delete_transaction(transaction_id).await {
        // The status code has to be 200 OK or HTMX will not swap in the
        // refreshed feed.
        Ok(()) => match render_home_content(&state.repository, &state.local_timezone) {
            Ok(content) => content.into_response(),
            Err(error) => {
                tracing::error!(
                    "Could not render the feed after deleting transaction {transaction_id}: {error}"
                );
                error.into_alert_response()
            }
        },
        Err(error @ Error::DeleteMissingTransaction) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Html;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        repository::FinanceRepository,
        test_utils::{assert_content_type, assert_status_ok, parse_html_fragment},
        transaction::{Transaction, TransactionKind, delete_transaction_endpoint},
    };

    use super::DeleteTransactionState;

    async fn get_test_state() -> DeleteTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let repository =
            FinanceRepository::new(connection).expect("Could not create repository");

        repository
            .add_transaction(Transaction::build(
                "Lunch",
                35000.0,
                datetime!(2025-08-20 00:00 UTC),
                TransactionKind::Expense,
            ))
            .await
            .expect("Could not create test transaction");
        repository
            .add_transaction(Transaction::build(
                "Groceries",
                120000.0,
                datetime!(2025-08-19 00:00 UTC),
                TransactionKind::Expense,
            ))
            .await
            .expect("Could not create test transaction");

        DeleteTransactionState {
            local_timezone: "Etc/UTC".to_owned(),
            repository,
        }
    }

    #[tokio::test]
    async fn delete_returns_refreshed_feed() {
        let state = get_test_state().await;
        let lunch_id = state
            .repository
            .transactions()
            .borrow()
            .iter()
            .find(|transaction| transaction.name == "Lunch")
            .map(|transaction| transaction.id)
            .expect("test transaction missing");

        let response =
            delete_transaction_endpoint(State(state.clone()), Path(lunch_id)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let fragment = parse_html_fragment(response).await;
        assert_feed_contents(&fragment);

        let transactions = state.repository.transactions().borrow().clone();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].name, "Groceries");
    }

    #[track_caller]
    fn assert_feed_contents(fragment: &Html) {
        let feed_selector = scraper::Selector::parse("#home-content").unwrap();
        assert!(
            fragment.select(&feed_selector).next().is_some(),
            "want the response to contain the re-rendered feed"
        );

        let text = fragment.html();
        assert!(
            text.contains("Groceries"),
            "want the remaining transaction in the feed"
        );
        assert!(
            !text.contains("Lunch"),
            "want the deleted transaction gone from the feed"
        );
    }

    #[tokio::test]
    async fn delete_missing_transaction_returns_error_alert() {
        let state = get_test_state().await;

        let response = delete_transaction_endpoint(State(state.clone()), Path(999)).await;

        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "want 404 when deleting a missing transaction, got {}",
            response.status()
        );
        assert_eq!(
            state.repository.transactions().borrow().len(),
            2,
            "no rows should be deleted for a missing id"
        );
    }
}
