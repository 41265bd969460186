use axum::{Extension, Form, Json, extract::State, response::Response};
use tracing::warn;
use uuid::Uuid;

use corkboard_types::api::{DeleteMessageForm, MessageItem, MessageListResponse, PostMessageForm};
use corkboard_types::escape::escape_html;

use crate::auth::AppState;
use crate::error::{ApiError, join_err};
use crate::redirect_home;
use crate::session::Claims;

/// The length policy applies to the escaped text — what gets stored —
/// and both bounds are strict.
const MESSAGE_MIN_LEN: usize = 1;
const MESSAGE_MAX_LEN: usize = 255;

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<MessageListResponse>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_messages())
        .await
        .map_err(join_err)??;

    let messages = rows
        .into_iter()
        .map(|row| MessageItem {
            username: row.username,
            value: row.value,
            key: row.id,
        })
        .collect();

    Ok(Json(MessageListResponse { messages }))
}

pub async fn post_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<PostMessageForm>,
) -> Result<Response, ApiError> {
    let escaped = escape_html(&form.message);
    let len = escaped.chars().count();
    if len <= MESSAGE_MIN_LEN || len >= MESSAGE_MAX_LEN {
        return Err(ApiError::InvalidMessage);
    }

    // Author comes from the session, never from the form.
    let id = Uuid::new_v4().to_string();
    let db = state.clone();
    let username = claims.username.clone();
    tokio::task::spawn_blocking(move || db.db.insert_message(&id, &username, &escaped))
        .await
        .map_err(join_err)??;

    Ok(redirect_home())
}

pub async fn delete_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<DeleteMessageForm>,
) -> Result<Response, ApiError> {
    let key = form.key;

    let db = state.clone();
    let id = key.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_message(&id))
        .await
        .map_err(join_err)??
        .ok_or(ApiError::DeleteFailed)?;

    // Ownership is judged against the stored row, not the submitted form.
    if row.username != claims.username {
        warn!(
            username = %claims.username,
            owner = %row.username,
            "denied delete of another user's message"
        );
        return Err(ApiError::WrongCredentials);
    }

    let db = state.clone();
    let username = claims.username.clone();
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_message(&key, &username))
        .await
        .map_err(join_err)??;

    if !deleted {
        return Err(ApiError::DeleteFailed);
    }

    Ok(redirect_home())
}
