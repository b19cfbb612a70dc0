//! The page shown for routes that do not exist.

use axum::{http::StatusCode, response::Response};

use crate::html::error_page;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    error_page(
        StatusCode::NOT_FOUND,
        "404",
        "Sorry, we can't find that page.",
    )
}
