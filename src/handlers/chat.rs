use crate::{
    error::AppError,
    handlers::AppState,
    models::campaign::{ChatRequest, ChatResponse},
    session::SessionContext,
};
use axum::{extract::State, Extension, Json};

/// Handle `POST /chat`
///
/// Relays a message to the campaign assistant. Blank messages never reach
/// the backend.
pub async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidRequest("No message received".to_string()));
    }

    tracing::debug!(account = %session.account, chars = message.len(), "Relaying chat message");

    let reply = state.backend().chat(message).await?;
    Ok(Json(reply))
}
