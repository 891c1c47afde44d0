//! Chat controller: contacts, conversations and message sending.

use crate::{
    extractors::AuthenticatedUser,
    responses::{ok, ApiResult, AppError, Created},
    state::AppState,
};
use palaver_core::{PalaverError, UserId};
use palaver_service::{MessageResponse, SendMessageRequest, UserResponse};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

/// Creates the chat router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route("/chat-partners", get(list_chat_partners))
        .route("/messages/:peer_id", get(list_messages).post(send_message))
}

/// List every other user as a potential contact.
async fn list_contacts(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<UserResponse>> {
    debug!("List contacts request for {}", user.user_id);

    let response = state.chat_service.list_contacts(user.user_id).await?;
    ok(response)
}

/// List the users the caller has exchanged messages with.
async fn list_chat_partners(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<UserResponse>> {
    debug!("List chat partners request for {}", user.user_id);

    let response = state.chat_service.list_chat_partners(user.user_id).await?;
    ok(response)
}

/// List the conversation with a peer.
async fn list_messages(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(peer_id): Path<String>,
) -> ApiResult<Vec<MessageResponse>> {
    debug!("List messages request: {} <-> {}", user.user_id, peer_id);

    let peer_id = parse_user_id(&peer_id)?;
    let response = state.chat_service.list_messages(user.user_id, peer_id).await?;
    ok(response)
}

/// Send a message to a receiver.
async fn send_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(receiver_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Created<MessageResponse>, AppError> {
    debug!("Send message request: {} -> {}", user.user_id, receiver_id);

    let receiver_id = parse_user_id(&receiver_id)?;
    let response = state
        .chat_service
        .send_message(user.user_id, receiver_id, request)
        .await?;
    Ok(Created(response))
}

/// Helper to parse a user ID from a path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(PalaverError::Validation(format!("Invalid user ID: {}", id))))
}
