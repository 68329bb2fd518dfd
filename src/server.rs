use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    auth,
    config::Config,
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
};

/// Start the pricing service
///
/// This function:
/// 1. Initializes metrics
/// 2. Builds the plan table from the configuration
/// 3. Sets up signal handlers for graceful shutdown and config reload
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics()?);

    let plans = config.pricing.build_table()?;
    info!(
        "Plan table loaded: {} tiers, minimum {} prospects",
        plans.plans().len(),
        plans.min_prospects()
    );

    // Wrap config and plans in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));
    let plans_swap = Arc::new(ArcSwap::from_pointee(plans));

    // SIGTERM, SIGINT for shutdown; SIGHUP for reload
    let (shutdown_tx, signal_handle) =
        setup_signal_handlers(config_path, config_swap.clone(), plans_swap.clone());
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState {
        config: config_swap,
        plans: plans_swap,
        http_client: reqwest::Client::new(),
    };

    let app = create_router(app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting prospect pricing service on {}", addr);
    info!(
        "Configuration: {} accounts, backend {}",
        config.accounts.iter().filter(|a| a.enabled).count(),
        config.backend.base_url
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(app_state: AppState, metrics_handle: Arc<PrometheusHandle>) -> Router {
    let metrics_config = app_state.config.load().metrics.clone();

    // Session-scoped routes
    let session_routes = Router::new()
        .route("/api/session", get(handlers::session::session_info))
        .route("/api/plans", get(handlers::pricing::list_plans))
        .route("/api/pricing/quote", post(handlers::pricing::quote))
        .route(
            "/api/campaigns/launch",
            post(handlers::campaigns::launch_campaign),
        )
        .route(
            "/api/dashboard-data",
            get(handlers::campaigns::dashboard_data),
        )
        .route("/api/campana/:id", get(handlers::campaigns::get_campaign))
        .route(
            "/api/actualizar-campana",
            post(handlers::campaigns::update_campaign),
        )
        .route("/chat", post(handlers::chat::chat))
        .layer(middleware::from_fn_with_state(
            app_state.config.clone(),
            auth::session_middleware,
        ))
        .with_state(app_state);

    let mut public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    if metrics_config.enabled {
        public_routes = public_routes.route(
            &metrics_config.endpoint,
            get(handlers::metrics_handler::metrics),
        );
    }

    public_routes
        .with_state(metrics_handle)
        .merge(session_routes)
        // Campaign briefs are small; cap bodies at 1MB
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}
