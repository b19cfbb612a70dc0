//! Transaction creation page and endpoint.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::{
    AppState, Error, endpoints,
    category::{Category, CategoryId},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    repository::FinanceRepository,
    timezone::get_local_offset,
    transaction::{
        Transaction, TransactionKind,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed for the new transaction page and creation endpoint.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
    /// The data facade for reading categories and writing the transaction.
    pub repository: FinanceRepository,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            repository: state.repository.clone(),
        }
    }
}

/// Form data for creating or updating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    pub name: String,
    pub amount: f64,
    /// The calendar day in the user's timezone, as `yyyy-mm-dd`.
    pub date: Date,
    pub description: Option<String>,
    /// `None` when "None" is selected in the category dropdown.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub kind: TransactionKind,
}

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page(
    State(state): State<CreateTransactionState>,
) -> Result<Response, Error> {
    let available_categories = state.repository.categories().borrow().clone();

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    Ok(new_transaction_view(max_date, &available_categories).into_response())
}

/// Handle transaction creation form submission.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
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

    let builder = Transaction::build(&form.name, form.amount, date, form.kind)
        .description(form.description)
        .category_id(form.category_id);

    match state.repository.add_transaction(builder).await {
        Ok(()) => (
            HxRedirect(endpoints::ROOT.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a transaction: {error}");

            error.into_alert_response()
        }
    }
}

fn new_transaction_view(max_date: Date, available_categories: &[Category]) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let fields = transaction_form_fields(
        &TransactionFormDefaults {
            kind: TransactionKind::Expense,
            name: None,
            amount: None,
            date: max_date,
            description: None,
            category_id: None,
            max_date,
            autofocus_name: true,
        },
        available_categories,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Create Transaction"
                }
            }
        }
    };

    base("Create Transaction", &[currency_input_styles()], &content)
}

#[cfg(test)]
mod view_tests {
    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::ElementRef;
    use time::OffsetDateTime;

    use crate::{
        db::initialize,
        endpoints,
        repository::FinanceRepository,
        test_utils::{
            assert_content_type, assert_form_select, assert_form_submit_button,
            assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document,
        },
        transaction::get_new_transaction_page,
    };

    use super::CreateTransactionState;

    fn get_test_state() -> CreateTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CreateTransactionState {
            local_timezone: "Etc/UTC".to_owned(),
            repository: FinanceRepository::new(connection).expect("Could not create repository"),
        }
    }

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let state = get_test_state();

        let response = get_new_transaction_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_correct_inputs(&form);
        assert_form_select(&form, "category_id");
        assert_form_submit_button(&form);
    }

    #[track_caller]
    fn assert_correct_inputs(form: &ElementRef) {
        let expected_input_types = vec![
            ("name", "text", true),
            ("amount", "number", true),
            ("date", "date", true),
            ("description", "text", false),
        ];

        for (name, element_type, required) in expected_input_types {
            let selector_string = format!("input[name={name}]");
            let input_selector = scraper::Selector::parse(&selector_string).unwrap();
            let inputs = form.select(&input_selector).collect::<Vec<_>>();
            assert_eq!(
                inputs.len(),
                1,
                "want 1 input named {name}, got {}",
                inputs.len()
            );

            let input = inputs.first().unwrap();

            let input_type = input.value().attr("type");
            assert_eq!(
                input_type,
                Some(element_type),
                "want {name} input with type=\"{element_type}\", got {input_type:?}"
            );

            let got_required = input.value().attr("required").is_some();
            assert_eq!(
                got_required, required,
                "want {name} input required={required}, got {got_required}"
            );
        }

        assert_date_defaults_to_today(form);
    }

    #[track_caller]
    fn assert_date_defaults_to_today(form: &ElementRef) {
        let today = OffsetDateTime::now_utc().date().to_string();
        let date_selector = scraper::Selector::parse("input[name=date]").unwrap();
        let date_input = form
            .select(&date_selector)
            .next()
            .expect("date input missing");

        let value = date_input.value().attr("value");
        assert_eq!(
            value,
            Some(today.as_str()),
            "want the date input prefilled with today {today}, got {value:?}"
        );

        let max = date_input.value().attr("max");
        assert_eq!(
            max,
            Some(today.as_str()),
            "want the date input capped at today {today}, got {max:?}"
        );
    }
}
