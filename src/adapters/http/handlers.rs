//! HTTP handlers connecting axum routes to the turn engine.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::{TurnError, TurnProcessor, TurnRequest};
use crate::domain::foundation::{TenantId, ThreadId};

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};

/// Shared application state for the chat endpoint.
#[derive(Clone)]
pub struct ChatAppState {
    /// The turn engine, constructed once at process start.
    pub engine: Arc<dyn TurnProcessor>,
}

impl ChatAppState {
    /// Creates the state around an engine.
    pub fn new(engine: Arc<dyn TurnProcessor>) -> Self {
        Self { engine }
    }
}

/// API-level errors for the chat endpoint.
#[derive(Debug)]
pub enum ChatApiError {
    /// The request was malformed.
    BadRequest(String),
    /// Anything internal; the body stays generic.
    Internal,
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ChatApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ChatApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error while processing the chat".to_string(),
            ),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<TurnError> for ChatApiError {
    fn from(error: TurnError) -> Self {
        match error {
            TurnError::EmptyMessage => {
                ChatApiError::BadRequest("message cannot be empty".to_string())
            }
            TurnError::StateStore(e) => {
                error!(error = %e, "turn failed on state store");
                ChatApiError::Internal
            }
            TurnError::TicketHandoff(e) => {
                error!(error = %e, "turn failed on ticket handoff");
                ChatApiError::Internal
            }
        }
    }
}

/// POST /api/chat - process one conversation turn.
pub async fn post_chat(
    State(state): State<ChatAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatApiError> {
    let tenant_id = TenantId::new(request.tenant_id)
        .map_err(|_| ChatApiError::BadRequest("tenantId cannot be empty".to_string()))?;

    let thread_id = match request.thread_id.as_deref() {
        Some(raw) => Some(
            raw.parse::<ThreadId>()
                .map_err(|_| ChatApiError::BadRequest("invalid threadId format".to_string()))?,
        ),
        None => None,
    };

    let outcome = state
        .engine
        .process_turn(TurnRequest {
            thread_id,
            tenant_id,
            message: request.message,
        })
        .await?;

    Ok(Json(ChatResponse {
        answer: outcome.answer,
        escalated: outcome.escalated,
        ticket_id: outcome.ticket_id.map(|id| id.to_string()),
        thread_id: outcome.thread_id.to_string(),
    }))
}

/// GET /health - liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
