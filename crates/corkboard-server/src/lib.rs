use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use corkboard_api::{auth, messages, pages, session};

pub use corkboard_api::auth::{AppState, AppStateInner};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub session_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("CORKBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("CORKBOARD_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()?;
        let db_path =
            std::env::var("CORKBOARD_DB_PATH").unwrap_or_else(|_| "corkboard.db".into());
        let session_secret = std::env::var("CORKBOARD_SESSION_SECRET").unwrap_or_else(|_| {
            warn!("CORKBOARD_SESSION_SECRET not set, sessions use the dev secret");
            "dev-secret-change-me".into()
        });

        Ok(Self {
            host,
            port,
            db_path,
            session_secret,
        })
    }
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(pages::home))
        .route("/messages/list", get(messages::list_messages))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/messages", post(messages::post_message))
        .route("/messages/delete", post(messages::delete_message))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_auth,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Panicking handlers answer a generic 500 instead of dropping the
        // connection.
        .layer(CatchPanicLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
