//! Alert fragments for reporting the outcome of htmx actions.
//!
//! Alerts render into the `#alert-container` element from [crate::html::base]
//! via an out-of-band swap, so they display no matter which element the
//! triggering request targeted.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const SUCCESS_BOX_STYLE: &str = "flex items-start gap-3 p-4 rounded-lg shadow-lg \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_BOX_STYLE: &str = "flex items-start gap-3 p-4 rounded-lg shadow-lg \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

/// A floating alert message.
#[derive(Debug, Clone)]
pub enum Alert {
    /// Reports a completed action.
    SuccessSimple {
        /// The headline shown to the user.
        message: String,
    },
    /// Reports a failed action.
    Error {
        /// The headline shown to the user.
        message: String,
        /// An explanation of what went wrong and what the user can do about it.
        details: String,
    },
}

impl Alert {
    /// Render the alert wrapped in the out-of-band alert container.
    pub fn into_markup(self) -> Markup {
        let (box_style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_BOX_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_BOX_STYLE, message, details),
        };

        html! {
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
                style="position: fixed; bottom: 5rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div role="alert" class=(box_style) {
                    div class="flex-1" {
                        span class="font-medium block" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-auto -mx-1.5 -my-1.5 p-1.5 rounded-lg focus:ring-2 hover:bg-gray-200 dark:hover:bg-gray-700"
                        onclick="document.getElementById('alert-container').replaceChildren()"
                    {
                        "✕"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status = match &self {
            Alert::SuccessSimple { .. } => StatusCode::OK,
            Alert::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.into_markup()).into_response()
    }
}

/// Render an error alert with an explicit HTTP status code.
pub fn render_alert_error(status: StatusCode, message: &str, details: &str) -> Response {
    let alert = Alert::Error {
        message: message.to_owned(),
        details: details.to_owned(),
    };

    (status, alert.into_markup()).into_response()
}

#[cfg(test)]
mod alert_tests {
    use super::Alert;

    #[test]
    fn error_alert_contains_message_and_details() {
        let alert = Alert::Error {
            message: "Could not delete category".to_owned(),
            details: "The category could not be found.".to_owned(),
        };

        let html = alert.into_markup().into_string();

        assert!(html.contains("Could not delete category"));
        assert!(html.contains("The category could not be found."));
        assert!(html.contains("hx-swap-oob"));
    }

    #[test]
    fn success_alert_omits_details_paragraph() {
        let alert = Alert::SuccessSimple {
            message: "Category deleted".to_owned(),
        };

        let html = alert.into_markup().into_string();

        assert!(html.contains("Category deleted"));
        assert!(!html.contains("<p"));
    }
}
