//! Transaction edit page and update endpoint.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::{
    AppState, Error,
    category::Category,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    not_found::get_404_not_found_response,
    repository::FinanceRepository,
    timezone::get_local_offset,
    transaction::{
        Transaction, TransactionId,
        create::TransactionForm,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed for the edit transaction page and update endpoint.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
    /// The data facade for reading and updating transactions.
    pub repository: FinanceRepository,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            repository: state.repository.clone(),
        }
    }
}

/// Renders the page for editing a transaction.
///
/// Responds with a 404 page if `transaction_id` does not refer to a stored
/// transaction.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let transaction = match state.repository.get_transaction(transaction_id) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => {
            return get_404_not_found_response();
        }
        Err(error) => {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            return error.into_response();
        }
    };

    let available_categories = state.repository.categories().borrow().clone();

    let local_timezone = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => {
            tracing::error!("Invalid timezone {}", state.local_timezone);
            return Error::InvalidTimezoneError(state.local_timezone).into_response();
        }
    };

    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    edit_transaction_view(&transaction, max_date, local_timezone, &available_categories)
        .into_response()
}

/// Handle transaction update form submission.
///
/// The form carries the full set of transaction fields, so the stored row is
/// replaced rather than patched.
pub async fn update_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    // Must use axum_extra's Form since that parses an empty string as None
    // instead of crashing like axum::Form.
    axum_extra::extract::Form(form): axum_extra::extract::Form<TransactionForm>,
) -> Response {
    let local_timezone = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => {
            tracing::error!("Invalid timezone {}", state.local_timezone);
            return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
        }
    };

    // Form dates carry no time of day, so anchor them at local midnight.
    let date = PrimitiveDateTime::new(form.date, Time::MIDNIGHT).assume_offset(local_timezone);

    let transaction = Transaction {
        id: transaction_id,
        name: form.name,
        amount: form.amount,
        date,
        description: form.description,
        category_id: form.category_id,
        kind: form.kind,
    };

    match state.repository.update_transaction(transaction).await {
        Ok(()) => (
            HxRedirect(endpoints::ROOT.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");

            error.into_alert_response()
        }
    }
}

fn edit_transaction_view(
    transaction: &Transaction,
    max_date: Date,
    local_timezone: time::UtcOffset,
    available_categories: &[Category],
) -> Markup {
    let update_transaction_route = format_endpoint(endpoints::PUT_TRANSACTION, transaction.id);
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let fields = transaction_form_fields(
        &TransactionFormDefaults {
            kind: transaction.kind,
            name: Some(&transaction.name),
            amount: Some(transaction.amount),
            date: transaction.date.to_offset(local_timezone).date(),
            description: transaction.description.as_deref(),
            category_id: transaction.category_id,
            max_date,
            autofocus_name: false,
        },
        available_categories,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save Changes"
                }
            }
        }
    };

    base("Edit Transaction", &[currency_input_styles()], &content)
}
