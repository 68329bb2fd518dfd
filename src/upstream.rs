use crate::{
    config::BackendConfig,
    error::AppError,
    metrics,
    models::campaign::{
        Ack, CampaignDetail, CampaignId, CampaignUpdate, ChatRequest, ChatResponse, DashboardData,
        NewCampaign,
    },
};
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};

/// Metric label shared by every campaign lookup
const CAMPAIGN_ENDPOINT: &str = "/api/campana/{id}";

/// Typed client for the campaign backend
///
/// Cheap to construct: the connection pool lives in the shared
/// `reqwest::Client`, so handlers build one per request from the current
/// configuration snapshot.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    service_token: Option<String>,
}

impl DashboardClient {
    pub fn new(http: Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
            service_token: config.service_token.clone(),
        }
    }

    /// `GET /api/dashboard-data`
    pub async fn dashboard_data(&self) -> Result<DashboardData, AppError> {
        self.get("/api/dashboard-data").await
    }

    /// `GET /api/campana/{id}`
    ///
    /// The id is pushed as a single encoded path segment.
    pub async fn campaign(&self, id: &CampaignId) -> Result<CampaignDetail, AppError> {
        let mut url = Url::parse(&self.url("/api/campana"))
            .map_err(|e| AppError::ConfigError(format!("invalid backend URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::ConfigError("backend URL cannot carry a path".to_string()))?
            .push(&id.to_string());

        let body: serde_json::Value = self.send(CAMPAIGN_ENDPOINT, self.http.get(url)).await?;

        // The backend reports missing campaigns as `{"error": ...}` with a 200
        if let Some(error) = body.get("error") {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(AppError::NotFound(format!("campaign {}: {}", id, message)));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// `POST /api/crear-campana`
    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Ack, AppError> {
        self.post("/api/crear-campana", campaign).await
    }

    /// `POST /api/actualizar-campana`
    pub async fn update_campaign(&self, update: &CampaignUpdate) -> Result<Ack, AppError> {
        self.post("/api/actualizar-campana", update).await
    }

    /// `POST /chat`
    pub async fn chat(&self, message: &str) -> Result<ChatResponse, AppError> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        self.post("/chat", &request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.get(self.url(path));
        self.send(path, request).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        if let Some(token) = &self.service_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let start = Instant::now();
        let result = request.timeout(self.timeout).send().await;
        metrics::record_upstream_duration(endpoint, start.elapsed());

        let response = result?;

        // Check for HTTP errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                endpoint,
                status = status.as_u16(),
                "Backend returned an error"
            );
            return Err(AppError::UpstreamError {
                status,
                message: error_text,
            });
        }

        Ok(response.json::<T>().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
