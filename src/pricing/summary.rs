//! Quote view model
//!
//! Derives the selected plan, the cost summary, and the balance banner from
//! one pricing outcome so the three can never disagree.

use crate::pricing::calculator::PricingError;
use crate::pricing::models::{PlanKey, PricingResult};
use crate::session::Balance;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Affordability banner state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BalanceBanner {
    /// Balance covers the cost. `remaining` is absent for unlimited balances.
    Sufficient { remaining: Option<Decimal> },
    /// Balance falls short by `recharge`.
    Insufficient { recharge: Decimal },
    /// No valid quote to compare against.
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    pub selected_plan: Option<PlanKey>,
    pub plan_label: Option<String>,
    pub daily_prospects: Option<i64>,
    pub total_cost: Decimal,
    pub balance: Balance,
    pub banner: BalanceBanner,
    pub launch_enabled: bool,
}

impl QuoteSummary {
    pub fn from_result(result: &PricingResult, balance: Balance) -> Self {
        // Compared unrounded, like `affordable`; only the shown amounts are rounded
        let banner = match balance {
            Balance::Unlimited => BalanceBanner::Sufficient { remaining: None },
            Balance::Amount(amount) if result.affordable => BalanceBanner::Sufficient {
                remaining: Some(
                    (amount - result.total_cost).round_dp_with_strategy(2, RoundingStrategy::ToZero),
                ),
            },
            Balance::Amount(amount) => BalanceBanner::Insufficient {
                recharge: (result.total_cost - amount)
                    .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero),
            },
        };

        Self {
            selected_plan: Some(result.plan_key),
            plan_label: Some(result.display_name.clone()),
            daily_prospects: Some(result.prospects),
            total_cost: result
                .total_cost
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            balance,
            launch_enabled: result.affordable,
            banner,
        }
    }

    /// Inert state shown while the input is invalid
    pub fn neutral(balance: Balance) -> Self {
        Self {
            selected_plan: None,
            plan_label: None,
            daily_prospects: None,
            total_cost: Decimal::ZERO,
            balance,
            banner: BalanceBanner::Neutral,
            launch_enabled: false,
        }
    }

    pub fn from_outcome(outcome: &Result<PricingResult, PricingError>, balance: Balance) -> Self {
        match outcome {
            Ok(result) => Self::from_result(result, balance),
            Err(_) => Self::neutral(balance),
        }
    }
}
