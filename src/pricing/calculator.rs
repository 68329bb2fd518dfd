use crate::pricing::models::{Locale, PlanKey, PricingResult};
use crate::pricing::table::PlanTable;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Rejected prospect-count input
///
/// Callers recover by rendering a neutral quote; these never reach the
/// network layer as failures.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingError {
    #[error("{requested} daily prospects is below the minimum of {minimum}")]
    BelowMinimum { requested: i64, minimum: u32 },
    #[error("'{input}' is not a whole number of prospects")]
    NotANumber { input: String },
}

impl PricingError {
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::BelowMinimum { .. } => "below_minimum",
            PricingError::NotANumber { .. } => "not_a_number",
        }
    }
}

/// Parse user-entered text into a prospect count
///
/// Surrounding whitespace is ignored; anything other than a base-10
/// integer is rejected.
pub fn parse_requested_count(input: &str) -> Result<i64, PricingError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| PricingError::NotANumber {
            input: input.to_string(),
        })
}

/// Price `requested` daily prospects against `table`, labelled in the
/// table's default locale.
pub fn compute_pricing(
    requested: i64,
    balance: Decimal,
    table: &PlanTable,
) -> Result<PricingResult, PricingError> {
    compute_pricing_in(requested, balance, table, table.default_locale())
}

/// Price `requested` daily prospects, labelling the result in `locale`.
pub fn compute_pricing_in(
    requested: i64,
    balance: Decimal,
    table: &PlanTable,
    locale: Locale,
) -> Result<PricingResult, PricingError> {
    let minimum = table.min_prospects();
    let below_minimum = PricingError::BelowMinimum { requested, minimum };

    if requested < i64::from(minimum) {
        return Err(below_minimum);
    }

    // The partition covers [minimum, ∞), so a miss here means an empty table
    let plan = table.find(requested).ok_or(below_minimum)?;

    let base = i64::from(plan.base_prospects);
    let extra_prospects = (requested - base).max(0);
    let total_cost = plan.base_cost + Decimal::from(extra_prospects) * plan.extra_cost_per_prospect;

    let is_custom = requested != base;
    let display_name = if is_custom {
        table.custom_label(locale).to_string()
    } else {
        plan.label(locale).to_string()
    };

    Ok(PricingResult {
        plan_key: plan.key,
        display_name,
        is_custom,
        prospects: requested,
        extra_prospects,
        total_cost,
        affordable: balance >= total_cost,
    })
}

/// Parse then price raw input from a form field.
pub fn compute_pricing_from_input(
    input: &str,
    balance: Decimal,
    table: &PlanTable,
    locale: Locale,
) -> Result<PricingResult, PricingError> {
    let requested = parse_requested_count(input)?;
    compute_pricing_in(requested, balance, table, locale)
}

/// Price a plan at its included base count, as when its card is clicked.
///
/// Returns `None` for a plan the table does not define.
pub fn select_plan(
    key: PlanKey,
    balance: Decimal,
    table: &PlanTable,
    locale: Locale,
) -> Option<PricingResult> {
    let plan = table.plan(key)?;
    compute_pricing_in(i64::from(plan.base_prospects), balance, table, locale).ok()
}

/// The selection shown before the user touches anything: the lowest tier
/// at its base count.
pub fn default_selection(
    balance: Decimal,
    table: &PlanTable,
    locale: Locale,
) -> Result<PricingResult, PricingError> {
    compute_pricing_in(i64::from(table.min_prospects()), balance, table, locale)
}
