//! The options sheet shown when a transaction in the feed is tapped.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE,
        format_currency_rounded,
    },
    repository::FinanceRepository,
    transaction::{Transaction, TransactionId},
};

/// The state needed to show the transaction options sheet.
#[derive(Debug, Clone)]
pub struct TransactionSheetState {
    /// The data facade for looking up the tapped transaction.
    pub repository: FinanceRepository,
}

impl FromRef<AppState> for TransactionSheetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }
}

/// A route handler that renders the options sheet for a transaction.
///
/// The sheet is swapped into the feed's `#sheet-container` placeholder.
pub async fn get_transaction_sheet(
    State(state): State<TransactionSheetState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.repository.get_transaction(transaction_id) {
        Ok(transaction) => transaction_sheet_view(&transaction).into_response(),
        // The transaction may have been deleted from another tab since the
        // feed was rendered.
        Err(error @ Error::NotFound) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not load transaction {transaction_id} for sheet: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler that closes the options sheet by clearing its container.
pub async fn dismiss_transaction_sheet() -> Response {
    html! {}.into_response()
}

fn transaction_sheet_view(transaction: &Transaction) -> Markup {
    let edit_route = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_route = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);
    let dismiss_route = endpoints::DISMISS_SHEET;

    html! {
        div id="transaction-sheet" class="fixed inset-0 z-40"
        {
            div
                class="fixed inset-0 bg-gray-900/50"
                hx-get=(dismiss_route)
                hx-target="#sheet-container"
                hx-swap="innerHTML"
            {}

            div class="sheet fixed inset-x-0 bottom-0 z-50 rounded-t-2xl bg-white p-4 shadow-lg dark:bg-gray-800"
            {
                header class="mb-4 flex items-baseline justify-between"
                {
                    h2 class="text-lg font-bold text-gray-900 dark:text-white" { (transaction.name) }

                    span class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        (format_currency_rounded(transaction.amount))
                    }
                }

                div class="flex flex-col gap-2"
                {
                    a href=(edit_route) class=(BUTTON_PRIMARY_STYLE) { "Edit" }

                    button
                        hx-delete=(delete_route)
                        hx-confirm={ "Delete '" (transaction.name) "'?" }
                        hx-target="#home-content"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }

                    button
                        hx-get=(dismiss_route)
                        hx-target="#sheet-container"
                        hx-swap="innerHTML"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Close"
                    }
                }
            }
        }
    }
}
