pub mod campaigns;
pub mod chat;
pub mod health;
pub mod metrics_handler;
pub mod pricing;
pub mod session;

use crate::{config::Config, pricing::PlanTable, upstream::DashboardClient};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub plans: Arc<ArcSwap<PlanTable>>,
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Backend client bound to the current configuration snapshot
    pub fn backend(&self) -> DashboardClient {
        DashboardClient::new(self.http_client.clone(), &self.config.load().backend)
    }
}

#[cfg(test)]
pub(crate) fn test_state(backend_url: &str) -> AppState {
    let mut config = crate::config::test_config();
    config.backend.base_url = backend_url.to_string();

    AppState {
        plans: Arc::new(ArcSwap::from_pointee(PlanTable::observed())),
        config: Arc::new(ArcSwap::from_pointee(config)),
        http_client: reqwest::Client::new(),
    }
}
