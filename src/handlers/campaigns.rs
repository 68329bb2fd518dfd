use crate::{
    error::AppError,
    handlers::AppState,
    metrics,
    models::{
        campaign::{Ack, CampaignDetail, CampaignId, CampaignUpdate, DashboardData, NewCampaign},
        quote::{LaunchRequest, LaunchResponse},
    },
    pricing::compute_pricing_in,
    session::SessionContext,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

/// Handle `POST /api/campaigns/launch`
///
/// Re-prices the draft server-side and only forwards it to the backend when
/// the session balance covers the total.
pub async fn launch_campaign(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<LaunchRequest>,
) -> Result<Json<LaunchResponse>, AppError> {
    let request_id = Uuid::new_v4().to_string();
    let table = state.plans.load_full();

    let result = match request
        .prospectos_dia
        .parse()
        .and_then(|requested| {
            compute_pricing_in(requested, session.balance.available(), &table, session.locale)
        }) {
        Ok(result) => result,
        Err(err) => {
            metrics::record_validation_error(err.kind());
            metrics::record_launch("invalid");
            return Err(err.into());
        }
    };

    if !result.affordable {
        metrics::record_launch("insufficient_balance");
        tracing::info!(
            request_id = %request_id,
            account = %session.account,
            total_cost = %result.total_cost,
            "Launch blocked by balance"
        );
        return Err(AppError::InsufficientBalance {
            total_cost: result.total_cost,
            recharge: result.total_cost - session.balance.available(),
        });
    }

    if let Err(message) = request.details.validate() {
        metrics::record_launch("invalid");
        return Err(AppError::InvalidRequest(message));
    }

    let campaign = NewCampaign {
        details: request.details,
        prospectos_dia: result.prospects,
        plan: result.plan_key,
        costo_total: result.total_cost,
    };

    let ack = match state.backend().create_campaign(&campaign).await {
        Ok(ack) => ack,
        Err(err) => {
            metrics::record_launch("error");
            tracing::error!(request_id = %request_id, error = %err, "Campaign launch failed");
            return Err(err);
        }
    };

    metrics::record_launch(if ack.success { "launched" } else { "rejected" });
    tracing::info!(
        request_id = %request_id,
        account = %session.account,
        campaign = %campaign.details.nombre,
        plan = %result.plan_key,
        prospects = result.prospects,
        total_cost = %result.total_cost,
        success = ack.success,
        "Campaign launch forwarded"
    );

    Ok(Json(LaunchResponse {
        request_id,
        plan: result.plan_key,
        prospectos_dia: result.prospects,
        total_cost: result.total_cost,
        ack,
    }))
}

/// Handle `GET /api/dashboard-data`
pub async fn dashboard_data(State(state): State<AppState>) -> Result<Json<DashboardData>, AppError> {
    Ok(Json(state.backend().dashboard_data().await?))
}

/// Handle `GET /api/campana/:id`
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CampaignDetail>, AppError> {
    let id: CampaignId = id.parse().map_err(AppError::InvalidRequest)?;
    Ok(Json(state.backend().campaign(&id).await?))
}

/// Handle `POST /api/actualizar-campana`
pub async fn update_campaign(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(update): Json<CampaignUpdate>,
) -> Result<Json<Ack>, AppError> {
    let Some(id) = &update.id else {
        return Err(AppError::InvalidRequest("campaign id is required".to_string()));
    };

    tracing::info!(account = %session.account, campaign_id = %id, "Updating campaign");

    Ok(Json(state.backend().update_campaign(&update).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;
    use crate::models::campaign::CampaignDetails;
    use crate::models::quote::RawCount;
    use crate::pricing::{Locale, PlanKey, PricingError};
    use crate::session::{Balance, Role};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn session(balance: Balance) -> SessionContext {
        SessionContext {
            account: "ferreteria".to_string(),
            role: Role::Client,
            balance,
            locale: Locale::En,
        }
    }

    fn draft(prospects: RawCount) -> LaunchRequest {
        LaunchRequest {
            details: CampaignDetails {
                nombre: "Tornillos Norte".to_string(),
                que_vende: "tornillería industrial".to_string(),
                a_quien: "talleres".to_string(),
                tipo_producto: "tangible".to_string(),
                ..Default::default()
            },
            prospectos_dia: prospects,
        }
    }

    #[tokio::test]
    async fn test_launch_forwards_resolved_plan() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/crear-campana"))
            .and(body_partial_json(json!({
                "nombre": "Tornillos Norte",
                "prospectos_dia": 16,
                "plan": "professional"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let Json(response) = launch_campaign(
            State(state),
            Extension(session(Balance::Amount(dec!(500)))),
            Json(draft(RawCount::Number(16))),
        )
        .await
        .unwrap();

        assert_eq!(response.plan, PlanKey::Professional);
        assert_eq!(response.total_cost, dec!(425.60));
        assert!(response.ack.success);
        assert!(!response.request_id.is_empty());
    }

    #[tokio::test]
    async fn test_launch_blocked_when_unaffordable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/crear-campana"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(0)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let result = launch_campaign(
            State(state),
            Extension(session(Balance::Amount(dec!(500)))),
            Json(draft(RawCount::Text("14".to_string()))),
        )
        .await;

        match result {
            Err(AppError::InsufficientBalance { total_cost, recharge }) => {
                assert_eq!(total_cost, dec!(521.50));
                assert_eq!(recharge, dec!(21.50));
            }
            other => panic!("expected insufficient balance, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_launch_rejects_invalid_count() {
        let state = test_state("http://127.0.0.1:9");
        let result = launch_campaign(
            State(state),
            Extension(session(Balance::Unlimited)),
            Json(draft(RawCount::Text("tres".to_string()))),
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(PricingError::NotANumber { .. }))
        ));
    }

    #[tokio::test]
    async fn test_launch_requires_brief_fields() {
        let state = test_state("http://127.0.0.1:9");
        let mut request = draft(RawCount::Number(4));
        request.details.que_vende = String::new();

        let result = launch_campaign(
            State(state),
            Extension(session(Balance::Amount(Decimal::ONE_THOUSAND))),
            Json(request),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidRequest(ref m)) if m.contains("que_vende")));
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let state = test_state("http://127.0.0.1:9");
        let result = update_campaign(
            State(state),
            Extension(session(Balance::Unlimited)),
            Json(CampaignUpdate::default()),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_get_campaign_rejects_path_like_ids() {
        let state = test_state("http://127.0.0.1:9");
        let result = get_campaign(State(state), Path("../dashboard-data".to_string())).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(ref m)) if m.contains("invalid campaign id")));
    }

    #[tokio::test]
    async fn test_dashboard_proxy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kpis": {"total": 12, "calificados": 3, "tasa": 25},
                "campanas": [{"id": 7, "nombre": "Tornillos Norte", "estado": "activa"}]
            })))
            .mount(&server)
            .await;

        let Json(data) = dashboard_data(State(test_state(&server.uri()))).await.unwrap();
        assert_eq!(data.campanas.len(), 1);
        assert_eq!(data.kpis.unwrap().total, 12);
    }
}
