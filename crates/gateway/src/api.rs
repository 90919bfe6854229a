//! The chat API, nested under `/api`.
//!
//! - `POST   /api/chat`                  send a message, get the agent's answer
//! - `POST   /api/clear`                 clear a session's context
//! - `GET    /api/tools`                 list the tool catalogue
//! - `GET    /api/sessions/{id}/context` inspect a session's context
//! - `DELETE /api/sessions/{id}`         drop a session

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use wayfarer_agent::{LoopState, Outcome};
use wayfarer_core::message::Message;

use crate::SharedState;

/// Session used when a request does not name one.
pub const DEFAULT_SESSION: &str = "default";

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/clear", post(clear_handler))
        .route("/tools", get(list_tools_handler))
        .route("/sessions/{id}/context", get(context_handler))
        .route("/sessions/{id}", delete(delete_session_handler))
}

// ── Types ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub outcome: Outcome,
    pub steps: usize,
    pub tool_calls: usize,
    pub timestamp: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolDto {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDto>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub session_id: String,
    pub state: LoopState,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn session_or_default(id: Option<String>) -> String {
    id.filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION.to_string())
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Message cannot be empty"));
    }

    let session_id = session_or_default(payload.session_id);
    info!(session_id = %session_id, message_len = message.len(), "Chat request");

    let agent = state.sessions.get_or_create(&session_id).await;
    let result = agent.lock().await.process_turn(message).await;

    match result {
        Ok(turn) => Ok(Json(ChatResponse {
            session_id,
            response: turn.answer,
            outcome: turn.outcome,
            steps: turn.steps,
            tool_calls: turn.tool_calls_made,
            timestamp: Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Agent processing failed");
            Err(api_error(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// Accepts an empty body as well as `{"session_id": ...}`.
async fn clear_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ClearResponse>, ApiError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ClearRequest::default()
    } else {
        serde_json::from_slice::<ClearRequest>(&body)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid request: {e}")))?
    };

    let session_id = session_or_default(request.session_id);
    state.sessions.reset(&session_id).await;
    info!(session_id = %session_id, "Conversation cleared");

    Ok(Json(ClearResponse {
        session_id,
        message: "Conversation cleared".into(),
    }))
}

async fn list_tools_handler(State(state): State<SharedState>) -> Json<ToolListResponse> {
    let defs = state.tools.definitions();
    let count = defs.len();

    Json(ToolListResponse {
        tools: defs
            .into_iter()
            .map(|d| ToolDto {
                name: d.name,
                description: d.description,
                parameters: d.parameters,
            })
            .collect(),
        count,
    })
}

async fn context_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ContextResponse>, ApiError> {
    let agent = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Session '{id}' not found")))?;
    let agent = agent.lock().await;

    Ok(Json(ContextResponse {
        session_id: id,
        state: agent.state(),
        messages: agent.context().to_vec(),
    }))
}

async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id).await {
        info!(session_id = %id, "Session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("Session '{id}' not found")))
    }
}
