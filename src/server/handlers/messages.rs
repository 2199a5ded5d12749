//! Contact-form messages: public submission, admin inbox

use crate::core::entity::CREATED_AT_FIELD;
use crate::core::error::AtelierResult;
use crate::core::query::{Filter, SortSpec};
use crate::server::extractors::{Payload, RecordId, RequireAdmin};
use crate::server::response::{counted, created, deleted, ok};
use crate::server::state::AppState;
use axum::extract::State;
use axum::response::Response;
use serde_json::json;

/// `POST /messages`
pub async fn send_message(
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    let message = state.messages.create(payload).await?;
    tracing::info!(id = %message.id, subject = ?message.subject, "message received");
    Ok(created(message))
}

/// `GET /messages`
pub async fn list_messages(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AtelierResult<Response> {
    let messages = state
        .messages
        .list(&Filter::new(), &SortSpec::descending(CREATED_AT_FIELD), None)
        .await?;
    Ok(counted(messages))
}

/// `GET /messages/{id}`
pub async fn get_message(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    Ok(ok(state.messages.require(&id).await?))
}

/// `PUT /messages/{id}`: only the read flag can change
pub async fn update_message_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    let message = match payload.get("isRead") {
        Some(is_read) => {
            state
                .messages
                .update(&id, json!({ "isRead": is_read }))
                .await?
        }
        None => state.messages.require(&id).await?,
    };
    Ok(ok(message))
}

/// `DELETE /messages/{id}`
pub async fn delete_message(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    state.messages.delete(&id).await?;
    Ok(deleted())
}
