use crate::{
    error::AppError,
    handlers::AppState,
    metrics,
    models::quote::{PlanView, PlansResponse, QuoteRequest, QuoteResponse},
    pricing::{compute_pricing_in, default_selection, select_plan},
    session::SessionContext,
};
use axum::{extract::State, Extension, Json};

/// Handle `GET /api/plans`
pub async fn list_plans(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Json<PlansResponse> {
    let table = state.plans.load();

    Json(PlansResponse {
        locale: session.locale,
        min_prospects: table.min_prospects(),
        plans: table
            .plans()
            .iter()
            .map(|plan| PlanView::new(plan, session.locale))
            .collect(),
    })
}

/// Handle `POST /api/pricing/quote`
///
/// Invalid prospect counts are not request errors: the response carries a
/// neutral summary plus the tagged validation error.
pub async fn quote(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let table = state.plans.load();
    let available = session.balance.available();
    let locale = session.locale;

    let outcome = match (request.plan, &request.prospects) {
        (Some(key), _) => select_plan(key, available, &table, locale)
            .map(Ok)
            .ok_or_else(|| AppError::NotFound(format!("plan '{}' is not offered", key)))?,
        (None, Some(raw)) => raw
            .parse()
            .and_then(|requested| compute_pricing_in(requested, available, &table, locale)),
        (None, None) => default_selection(available, &table, locale),
    };

    match &outcome {
        Ok(result) => {
            metrics::record_quote(result.plan_key.as_str(), result.is_custom);
            tracing::info!(
                account = %session.account,
                plan = %result.plan_key,
                prospects = result.prospects,
                total_cost = %result.total_cost,
                affordable = result.affordable,
                "Quote computed"
            );
        }
        Err(err) => {
            metrics::record_validation_error(err.kind());
            tracing::debug!(account = %session.account, error = %err, "Quote input rejected");
        }
    }

    Ok(Json(QuoteResponse::from_outcome(outcome, session.balance)))
}
