use crate::pricing::models::{Labels, Locale, Plan, PlanKey};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

/// Reasons a plan table fails to partition the prospect domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanTableError {
    #[error("plan table is empty")]
    Empty,
    #[error("plan '{0}' is defined more than once")]
    DuplicatePlan(PlanKey),
    #[error("plan '{0}' must include at least one base prospect")]
    ZeroBase(PlanKey),
    #[error("plan '{key}' upper bound {upper} is below its base of {base}")]
    InvertedRange { key: PlanKey, base: u32, upper: u32 },
    #[error("plan '{0}' has a negative cost")]
    NegativeCost(PlanKey),
    #[error("no unbounded top tier is defined")]
    MissingUnboundedTier,
    #[error("plan '{0}' is unbounded but is not the highest tier")]
    UnboundedNotLast(PlanKey),
    #[error("gap between '{previous}' and '{next}': expected base {expected}, found {found}")]
    Gap {
        previous: PlanKey,
        next: PlanKey,
        expected: u32,
        found: u32,
    },
    #[error("'{previous}' overlaps '{next}': expected base {expected}, found {found}")]
    Overlap {
        previous: PlanKey,
        next: PlanKey,
        expected: u32,
        found: u32,
    },
}

/// Immutable, validated set of pricing tiers
///
/// Tiers are ordered by base and partition `[min_prospects, ∞)` with no
/// gaps and no overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanTable {
    plans: Vec<Plan>,
    custom_labels: Labels,
    default_locale: Locale,
}

impl PlanTable {
    pub fn new(
        mut plans: Vec<Plan>,
        custom_labels: Labels,
        default_locale: Locale,
    ) -> Result<Self, PlanTableError> {
        if plans.is_empty() {
            return Err(PlanTableError::Empty);
        }

        plans.sort_by_key(|p| p.base_prospects);

        for (idx, plan) in plans.iter().enumerate() {
            if plans[..idx].iter().any(|p| p.key == plan.key) {
                return Err(PlanTableError::DuplicatePlan(plan.key));
            }
            if plan.base_prospects == 0 {
                return Err(PlanTableError::ZeroBase(plan.key));
            }
            if plan.base_cost < Decimal::ZERO || plan.extra_cost_per_prospect < Decimal::ZERO {
                return Err(PlanTableError::NegativeCost(plan.key));
            }
            if let Some(upper) = plan.upper_bound {
                if upper < plan.base_prospects {
                    return Err(PlanTableError::InvertedRange {
                        key: plan.key,
                        base: plan.base_prospects,
                        upper,
                    });
                }
            }
        }

        for pair in plans.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            let upper = previous
                .upper_bound
                .ok_or(PlanTableError::UnboundedNotLast(previous.key))?;
            let expected = upper.saturating_add(1);

            if next.base_prospects > expected {
                return Err(PlanTableError::Gap {
                    previous: previous.key,
                    next: next.key,
                    expected,
                    found: next.base_prospects,
                });
            }
            if next.base_prospects < expected {
                return Err(PlanTableError::Overlap {
                    previous: previous.key,
                    next: next.key,
                    expected,
                    found: next.base_prospects,
                });
            }
        }

        if plans.last().and_then(|p| p.upper_bound).is_some() {
            return Err(PlanTableError::MissingUnboundedTier);
        }

        Ok(Self {
            plans,
            custom_labels,
            default_locale,
        })
    }

    /// The tiers sold on the dashboard today
    pub fn observed() -> Self {
        let plans = vec![
            Plan {
                key: PlanKey::Starter,
                base_prospects: 4,
                base_cost: dec!(149.00),
                extra_cost_per_prospect: dec!(37.25),
                upper_bound: Some(14),
                labels: Labels::new("The Starter", "El Arrancador"),
            },
            Plan {
                key: PlanKey::Professional,
                base_prospects: 15,
                base_cost: dec!(399.00),
                extra_cost_per_prospect: dec!(26.60),
                upper_bound: Some(49),
                labels: Labels::new("The Professional", "El Profesional"),
            },
            Plan {
                key: PlanKey::Dominator,
                base_prospects: 50,
                base_cost: dec!(999.00),
                extra_cost_per_prospect: dec!(20.00),
                upper_bound: None,
                labels: Labels::new("The Dominator", "El Dominador"),
            },
        ];

        Self {
            plans,
            custom_labels: Labels::new("Custom", "Personalizado"),
            default_locale: Locale::En,
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn plan(&self, key: PlanKey) -> Option<&Plan> {
        self.plans.iter().find(|p| p.key == key)
    }

    /// Lowest accepted daily prospect count
    pub fn min_prospects(&self) -> u32 {
        // Non-empty by construction
        self.plans.first().map_or(1, |p| p.base_prospects)
    }

    /// The unique tier whose range contains `prospects`
    pub fn find(&self, prospects: i64) -> Option<&Plan> {
        self.plans.iter().find(|p| p.contains(prospects))
    }

    pub fn custom_label(&self, locale: Locale) -> &str {
        self.custom_labels.get(locale)
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::observed()
    }
}
