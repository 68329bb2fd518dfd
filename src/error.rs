use crate::pricing::PricingError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::fmt;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Configuration error
    ConfigError(String),
    /// Authentication error
    Unauthorized(String),
    /// Prospect count rejected by the pricing calculator
    Validation(PricingError),
    /// Malformed or incomplete request body
    InvalidRequest(String),
    /// Balance does not cover the quoted campaign
    InsufficientBalance { total_cost: Decimal, recharge: Decimal },
    /// Unknown resource
    NotFound(String),
    /// Backend returned a non-success status
    UpstreamError { status: StatusCode, message: String },
    /// Internal server error
    InternalError(String),
    /// HTTP request error (transport-level failure talking to the backend)
    HttpRequest(reqwest::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Validation(err) => write!(f, "Invalid prospect count: {}", err),
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Self::InsufficientBalance { total_cost, recharge } => write!(
                f,
                "Insufficient balance: campaign costs ${:.2}, recharge ${:.2} to launch",
                total_cost, recharge
            ),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::UpstreamError { status, message } => {
                write!(f, "Upstream error ({}): {}", status, message)
            }
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
            Self::HttpRequest(err) => write!(f, "HTTP request error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientBalance { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamError { status, .. } => *status,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HttpRequest(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::UpstreamError { message, .. } => message.clone(),
            Self::Validation(err) => err.to_string(),
            other => other.to_string(),
        };

        let mut error = json!({
            "message": message,
            "type": error_type_name(&self),
        });
        match &self {
            Self::Validation(err) => {
                error["kind"] = json!(err.kind());
            }
            Self::InsufficientBalance { total_cost, recharge } => {
                error["total_cost"] = json!(format!("{:.2}", total_cost));
                error["recharge"] = json!(format!("{:.2}", recharge));
            }
            _ => {}
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::Unauthorized(_) => "unauthorized",
        AppError::Validation(_) => "validation_error",
        AppError::InvalidRequest(_) => "invalid_request",
        AppError::InsufficientBalance { .. } => "insufficient_balance",
        AppError::NotFound(_) => "not_found",
        AppError::UpstreamError { .. } => "upstream_error",
        AppError::InternalError(_) => "internal_error",
        AppError::HttpRequest(_) => "http_request_error",
    }
}

// Implement conversions from common error types
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpRequest(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(format!("JSON error: {}", err))
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        Self::Validation(err)
    }
}
