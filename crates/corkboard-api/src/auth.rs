use std::sync::Arc;

use axum::{Form, extract::State, response::Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;
use uuid::Uuid;

use corkboard_auth::password;
use corkboard_auth::validate::{is_password_valid, is_username_valid};
use corkboard_db::Database;
use corkboard_db::models::CreateUserOutcome;
use corkboard_types::api::{LoginForm, SignupForm};

use crate::error::{ApiError, join_err};
use crate::{redirect_home, session};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session_secret: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    let SignupForm { username, password } = form;

    if !is_username_valid(&username) || !is_password_valid(&password) {
        return Err(ApiError::InvalidCredentials);
    }

    // Argon2 is CPU-expensive on purpose; keep it off the async runtime.
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(join_err)??;

    let user_id = Uuid::new_v4();
    let db = state.clone();
    let name = username.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        db.db.create_user(&user_id.to_string(), &name, &password_hash)
    })
    .await
    .map_err(join_err)??;

    match outcome {
        CreateUserOutcome::Created => {
            info!(username = %username, "user signed up");
            Ok(redirect_home())
        }
        // Same generic body as a validation failure: no disclosure of
        // which usernames exist.
        CreateUserOutcome::UsernameTaken => Err(ApiError::InvalidCredentials),
    }
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Response), ApiError> {
    let LoginForm { username, password } = form;

    if !is_username_valid(&username) || !is_password_valid(&password) {
        return Err(ApiError::InvalidCredentials);
    }

    let db = state.clone();
    let name = username.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_username(&name))
        .await
        .map_err(join_err)??
        .ok_or(ApiError::InvalidCredentials)?;

    let stored_hash = user.password.clone();
    let verified =
        tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
            .await
            .map_err(join_err)??;

    if !verified {
        return Err(ApiError::InvalidCredentials);
    }

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {}", user.id, e))?;

    let token = session::create_session_token(&state.session_secret, user_id, &user.username)?;

    info!(username = %user.username, "user logged in");
    Ok((jar.add(session::session_cookie(token)), redirect_home()))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Response) {
    (jar.remove(session::removal_cookie()), redirect_home())
}
