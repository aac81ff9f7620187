//! Axum routes for the chat transport.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, post_chat, ChatAppState};

/// Creates the chat routes.
///
/// REST Endpoints:
/// - POST /api/chat - process one conversation turn
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new().route("/chat", post(post_chat))
}

/// Combined router: chat routes under /api plus the health probe.
pub fn app_router(state: ChatAppState) -> Router {
    Router::new()
        .nest("/api", chat_routes())
        .route("/health", get(health))
        .with_state(state)
}
