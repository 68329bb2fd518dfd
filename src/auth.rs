use crate::{config::Config, error::AppError, pricing::Locale, session::SessionContext};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Session middleware
///
/// Resolves the Bearer token to a configured account and attaches a
/// [`SessionContext`] to the request, localized from `Accept-Language`.
pub async fn session_middleware(
    State(config): State<Arc<arc_swap::ArcSwap<Config>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = extract_bearer_token(auth_header)?;

    let config = config.load();

    let account = config
        .accounts
        .iter()
        .find(|a| a.token == token && a.enabled)
        .ok_or_else(|| AppError::Unauthorized("Invalid or disabled session token".to_string()))?;

    let locale = Locale::negotiate(
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );

    let session = SessionContext::from_account(account, locale);
    tracing::debug!(account = %session.account, role = ?session.role, "Session resolved");

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    const BEARER_PREFIX: &str = "Bearer ";

    let token = auth_header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AppError::Unauthorized("Authorization header must use Bearer scheme".to_string())
    })?;

    if token.is_empty() {
        return Err(AppError::Unauthorized("Bearer token is empty".to_string()));
    }

    Ok(token)
}
