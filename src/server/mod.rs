//! # HTTP Server
//!
//! Liveness endpoint plus the inbound-message API a chat bridge posts to.
//!
//! ## Usage
//!
//! ```bash
//! MEMOBIRD_AK=... BOT_USERNAME=memobird_bot memobird-bot serve --listen 0.0.0.0:8080
//! ```
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /ping` | `I'm alive!` |
//! | `POST /api/messages` | `{chat_id, username, first_name, last_name, text}` → `{reply}` |

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bot::Bot;
use crate::error::BotError;

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/api/messages", post(handlers::messages::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use memobird_bot::server::{serve, ServerConfig};
/// # use memobird_bot::bot::Bot;
///
/// # async fn example(bot: Bot) -> Result<(), memobird_bot::error::BotError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config, bot).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, bot: Bot) -> Result<(), BotError> {
    let app = router(Arc::new(AppState::new(bot)));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "HTTP server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::bot::replies;
    use crate::service::testing::FakeBird;
    use crate::store::connect_in_memory;

    async fn app() -> Router {
        let pool = connect_in_memory().await.unwrap();
        let bot = Bot::from_pool(pool, Arc::new(FakeBird::accepting()), "memobird_bot");
        router(Arc::new(AppState::new(bot)))
    }

    #[tokio::test]
    async fn test_ping() {
        let response = app()
            .await
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"I'm alive!\n");
    }

    #[tokio::test]
    async fn test_message_roundtrip() {
        let request = Request::post("/api/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"chat_id": 42, "first_name": "Ada", "text": "/bind"}"#))
            .unwrap();
        let response = app().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["reply"], replies::BIND_HELP);
    }

    #[tokio::test]
    async fn test_malformed_message_is_rejected() {
        let request = Request::post("/api/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "no chat id"}"#))
            .unwrap();
        let response = app().await.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
