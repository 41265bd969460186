use serde::{Deserialize, Serialize};

// -- Auth --

/// Missing form fields deserialize as empty strings and fail validation,
/// rather than rejecting the request at the extractor.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
pub struct PostMessageForm {
    #[serde(default)]
    pub message: String,
}

/// Deletion is keyed on `key` alone. Older clients also submit the
/// message's `username` and `value`; both are accepted and ignored —
/// ownership is checked against the stored row, never the form.
#[derive(Debug, Deserialize)]
pub struct DeleteMessageForm {
    #[serde(default)]
    pub key: String,
    pub username: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageItem {
    pub username: String,
    pub value: String,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageItem>,
}
