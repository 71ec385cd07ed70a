//! Inbound chat messages.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::bot::InboundMessage;

use super::super::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageReply {
    pub reply: String,
}

/// POST /api/messages - handle one message, return the text to send back.
pub async fn handle(State(state): State<Arc<AppState>>, Json(msg): Json<InboundMessage>) -> Json<MessageReply> {
    let reply = state.bot.handle_text(&msg).await;
    Json(MessageReply { reply })
}
