use crate::{models::quote::SessionView, session::SessionContext};
use axum::{Extension, Json};

/// Handle `GET /api/session`
pub async fn session_info(Extension(session): Extension<SessionContext>) -> Json<SessionView> {
    Json(SessionView {
        balance_display: session.balance.to_string(),
        account: session.account,
        role: session.role,
        balance: session.balance,
        locale: session.locale,
    })
}
