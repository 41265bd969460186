use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Every handler failure funnels through here. User-facing bodies are
/// deliberately generic: they never say which field failed or whether a
/// username exists.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Signup/login rejection — covers bad shape, unknown user, taken
    /// username, and wrong password alike.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Message body failed the length policy.
    #[error("invalid message")]
    InvalidMessage,

    /// Delete attempted on a message owned by someone else.
    #[error("wrong credentials")]
    WrongCredentials,

    /// Delete found nothing to remove.
    #[error("error delete")]
    DeleteFailed,

    /// No valid session on a route that requires one.
    #[error("authentication required")]
    Unauthorized,

    /// Storage corruption, join failures, and everything else unexpected.
    /// Logged server-side; the client sees a generic body.
    #[error("internal error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Validation bodies answer 200 with plain text; the home-page
        // forms render them inline.
        let (status, body) = match self {
            Self::InvalidCredentials => (StatusCode::OK, "invalid credentials"),
            Self::InvalidMessage => (StatusCode::OK, "invalid message"),
            Self::WrongCredentials => (StatusCode::FORBIDDEN, "wrong credentials"),
            Self::DeleteFailed => (StatusCode::OK, "error delete"),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication required"),
            Self::Internal(err) => {
                error!("internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };
        (status, body).into_response()
    }
}

pub(crate) fn join_err(err: tokio::task::JoinError) -> ApiError {
    ApiError::Internal(anyhow::anyhow!("spawn_blocking join error: {}", err))
}
