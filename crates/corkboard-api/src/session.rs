use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AppState;
use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "corkboard_session";

/// The per-request identity snapshot: a sanitized user record carried in
/// a signed cookie. Never contains the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

pub fn create_session_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Expired, tampered, or absent tokens all come back as `None` — an
/// anonymous request, not an error.
fn decode_session(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

pub fn session_user(jar: &CookieJar, secret: &str) -> Option<Claims> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| decode_session(cookie.value(), secret))
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Removal must carry the same path as the original cookie or the
/// browser keeps it.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Guard for routes that require an authenticated session. Decoded claims
/// are handed to handlers as a request extension; anonymous requests are
/// answered with a generic 401 before any handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims =
        session_user(&jar, &state.session_secret).ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Anti-forgery token embedded in the home-page forms. Generation lives
/// here; validation belongs to the fronting middleware, not this core.
pub fn csrf_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    BASE64.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let id = Uuid::new_v4();
        let token = create_session_token("secret", id, "alice").unwrap();

        let claims = decode_session(&token, "secret").unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn wrong_secret_is_anonymous() {
        let token = create_session_token("secret", Uuid::new_v4(), "alice").unwrap();
        assert!(decode_session(&token, "other-secret").is_none());
    }

    #[test]
    fn expired_token_is_anonymous() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            exp: 1_000,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(decode_session(&token, "secret").is_none());
    }

    #[test]
    fn garbage_token_is_anonymous() {
        assert!(decode_session("not-a-jwt", "secret").is_none());
    }

    #[test]
    fn csrf_tokens_are_unique() {
        assert_ne!(csrf_token(), csrf_token());
    }
}
