use crate::pricing::{Labels, Locale, Plan, PlanTable, PlanTableError};
use crate::session::Role;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    pub backend: BackendConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

/// Plan table as written in the configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "default_custom_label")]
    pub custom_label: Labels,
    #[serde(default = "default_plans")]
    pub plans: Vec<Plan>,
}

impl PricingConfig {
    pub fn build_table(&self) -> Result<PlanTable, PlanTableError> {
        PlanTable::new(self.plans.clone(), self.custom_label.clone(), self.default_locale)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            custom_label: default_custom_label(),
            plans: default_plans(),
        }
    }
}

/// Dashboard account resolved from a bearer token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
    pub token: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    /// Prepaid balance; ignored for admins
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Campaign backend that owns dashboard data, campaigns and chat
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub service_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_custom_label() -> Labels {
    Labels::new("Custom", "Personalizado")
}

fn default_plans() -> Vec<Plan> {
    PlanTable::observed().plans().to_vec()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

/// Load configuration from `path`, overlaid with `PROSPECT_PRICING__*`
/// environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("PROSPECT_PRICING").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    cfg.pricing
        .build_table()
        .map_err(|e| anyhow::anyhow!("Invalid plan table: {}", e))?;

    if cfg.accounts.is_empty() {
        anyhow::bail!("At least one account must be configured");
    }

    for (idx, account) in cfg.accounts.iter().enumerate() {
        if account.name.is_empty() {
            anyhow::bail!("Account name cannot be empty");
        }
        if account.token.is_empty() {
            anyhow::bail!("Account '{}' has an empty token", account.name);
        }
        if cfg.accounts[..idx].iter().any(|a| a.token == account.token) {
            anyhow::bail!("Account '{}' reuses another account's token", account.name);
        }
        if let Some(balance) = account.balance {
            if balance < Decimal::ZERO {
                anyhow::bail!("Account '{}' has a negative balance", account.name);
            }
        }
    }

    if !cfg.backend.base_url.starts_with("http://") && !cfg.backend.base_url.starts_with("https://") {
        anyhow::bail!(
            "Backend base_url must be an http(s) URL, got '{}'",
            cfg.backend.base_url
        );
    }

    if cfg.backend.timeout_seconds == 0 {
        anyhow::bail!("Backend timeout_seconds must be greater than zero");
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    use rust_decimal_macros::dec;

    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        },
        pricing: PricingConfig::default(),
        accounts: vec![
            AccountConfig {
                token: "tok-client-0001".to_string(),
                name: "ferreteria".to_string(),
                role: Role::Client,
                balance: Some(dec!(500.00)),
                enabled: true,
            },
            AccountConfig {
                token: "tok-admin-0001".to_string(),
                name: "ceo".to_string(),
                role: Role::Admin,
                balance: None,
                enabled: true,
            },
            AccountConfig {
                token: "tok-disabled-01".to_string(),
                name: "former-client".to_string(),
                role: Role::Client,
                balance: Some(dec!(10000)),
                enabled: false,
            },
        ],
        backend: BackendConfig {
            base_url: "http://127.0.0.1:9000".to_string(),
            timeout_seconds: 30,
            service_token: None,
        },
        metrics: MetricsConfig::default(),
    }
}
