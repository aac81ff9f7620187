//! HTTP transport for the turn engine.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
pub use handlers::{health, post_chat, ChatApiError, ChatAppState};
pub use routes::{app_router, chat_routes};
