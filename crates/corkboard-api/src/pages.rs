use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;

use corkboard_db::models::MessageRow;

use crate::auth::AppState;
use crate::error::{ApiError, join_err};
use crate::session;

pub async fn home(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let current = session::session_user(&jar, &state.session_secret);

    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_messages())
        .await
        .map_err(join_err)??;

    let csrf = session::csrf_token();
    let username = current.as_ref().map(|claims| claims.username.as_str());

    Ok(Html(render_home(&rows, username, &csrf)))
}

/// Message values are escaped at the storage boundary and usernames are
/// policy-constrained to `[A-Za-z0-9_-]`, so both embed verbatim here.
fn render_home(messages: &[MessageRow], username: Option<&str>, csrf: &str) -> String {
    let mut items = String::new();
    for row in messages {
        items.push_str(&format!(
            "            <li><strong>{author}</strong>: {value}{delete}</li>\n",
            author = row.username,
            value = row.value,
            delete = if username == Some(row.username.as_str()) {
                format!(
                    r#" <form class="inline" method="post" action="/messages/delete">
                <input type="hidden" name="key" value="{key}">
                <input type="hidden" name="_csrf" value="{csrf}">
                <button type="submit">delete</button>
            </form>"#,
                    key = row.id,
                )
            } else {
                String::new()
            },
        ));
    }

    let account = match username {
        Some(name) => format!(
            r#"        <p>Signed in as <strong>{name}</strong></p>
        <form method="post" action="/messages">
            <input type="text" name="message" placeholder="Leave a note">
            <input type="hidden" name="_csrf" value="{csrf}">
            <button type="submit">Post</button>
        </form>
        <form method="post" action="/logout">
            <input type="hidden" name="_csrf" value="{csrf}">
            <button type="submit">Log out</button>
        </form>"#,
        ),
        None => format!(
            r#"        <form method="post" action="/signup">
            <h2>Sign up</h2>
            <input type="text" name="username" placeholder="username">
            <input type="password" name="password" placeholder="password">
            <input type="hidden" name="_csrf" value="{csrf}">
            <button type="submit">Sign up</button>
        </form>
        <form method="post" action="/login">
            <h2>Log in</h2>
            <input type="text" name="username" placeholder="username">
            <input type="password" name="password" placeholder="password">
            <input type="hidden" name="_csrf" value="{csrf}">
            <button type="submit">Log in</button>
        </form>"#,
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Corkboard</title>
</head>
<body>
    <main>
        <h1>Corkboard</h1>
{account}
        <ul>
{items}        </ul>
    </main>
</body>
</html>
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, username: &str, value: &str) -> MessageRow {
        MessageRow {
            id: id.to_string(),
            username: username.to_string(),
            value: value.to_string(),
            created_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn anonymous_page_shows_signup_and_login() {
        let page = render_home(&[], None, "tok");
        assert!(page.contains(r#"action="/signup""#));
        assert!(page.contains(r#"action="/login""#));
        assert!(!page.contains(r#"action="/logout""#));
    }

    #[test]
    fn authenticated_page_shows_post_and_logout() {
        let page = render_home(&[], Some("alice"), "tok");
        assert!(page.contains("Signed in as <strong>alice</strong>"));
        assert!(page.contains(r#"action="/messages""#));
        assert!(page.contains(r#"action="/logout""#));
        assert!(!page.contains(r#"action="/signup""#));
    }

    #[test]
    fn delete_form_only_on_own_messages() {
        let rows = vec![row("k1", "alice", "mine"), row("k2", "bob", "theirs")];
        let page = render_home(&rows, Some("alice"), "tok");
        assert!(page.contains(r#"value="k1""#));
        assert!(!page.contains(r#"value="k2""#));
    }

    #[test]
    fn csrf_token_is_embedded() {
        let page = render_home(&[], None, "tok-123");
        assert!(page.contains(r#"name="_csrf" value="tok-123""#));
    }
}
