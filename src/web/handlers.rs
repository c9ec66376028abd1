//! HTTP request handlers

use super::state::AppState;
use crate::commands::CommandContext;
use crate::matrix::Message;
use crate::metrics::Outcome;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, warn};

/// A chat message relayed to the bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub room_id: String,
    pub user_id: String,
    pub body: String,
}

/// Reply produced for a command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Command that handled the message
    pub command: String,
    /// Message content for the room
    pub content: Message,
    /// Event ID when the content was delivered
    pub event_id: Option<String>,
}

/// Command handler
pub async fn command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let ctx = CommandContext::new(request.room_id.clone(), request.user_id.clone());
    let start = Instant::now();

    let Some(dispatched) = state.registry.dispatch(&ctx, &request.body).await else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let outcome = Outcome::of(&dispatched.result);
    state.metrics.record(
        &dispatched.command,
        outcome,
        start.elapsed().as_millis() as u64,
    );

    let content = match dispatched.result {
        Ok(message) => message,
        Err(e) => {
            warn!(
                "Command {} failed for {} in {}: {}",
                dispatched.command, request.user_id, request.room_id, e
            );
            Message::notice(e.to_string())
        }
    };

    let event_id = if state.delivers_messages() {
        match state.matrix.send_message(&request.room_id, &content).await {
            Ok(event_id) => Some(event_id),
            Err(e) => {
                error!("Failed to deliver reply to {}: {}", request.room_id, e);
                return (
                    StatusCode::BAD_GATEWAY,
                    Json(serde_json::json!({
                        "error": e.to_string(),
                        "content": content,
                    })),
                )
                    .into_response();
            }
        }
    } else {
        None
    };

    Json(CommandResponse {
        command: dispatched.command,
        content,
        event_id,
    })
    .into_response()
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "total_commands": state.metrics.get_total_commands(),
        "commands": state.metrics.get_command_stats(),
    }))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
