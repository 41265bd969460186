pub mod auth;
pub mod error;
pub mod messages;
pub mod pages;
pub mod session;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// `302 Found` back to the board. Form posts answer with this on success.
pub(crate) fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
