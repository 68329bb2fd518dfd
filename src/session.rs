use crate::config::AccountConfig;
use crate::pricing::Locale;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role as reported by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Client,
    Admin,
}

/// Funds available to pay for a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum Balance {
    Amount(Decimal),
    Unlimited,
}

impl Balance {
    /// Value handed to the pricing calculator
    pub fn available(&self) -> Decimal {
        match self {
            Balance::Amount(amount) => *amount,
            Balance::Unlimited => Decimal::MAX,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Balance::Unlimited)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::Amount(amount) => write!(f, "${:.2}", amount),
            Balance::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Per-request view of who is asking and what they can spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub account: String,
    pub role: Role,
    pub balance: Balance,
    pub locale: Locale,
}

impl SessionContext {
    pub fn from_account(account: &AccountConfig, locale: Locale) -> Self {
        let balance = match account.role {
            Role::Admin => Balance::Unlimited,
            Role::Client => Balance::Amount(account.balance.unwrap_or(Decimal::ZERO)),
        };

        Self {
            account: account.name.clone(),
            role: account.role,
            balance,
            locale,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
