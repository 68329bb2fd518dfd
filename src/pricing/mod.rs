pub mod calculator;
pub mod models;
pub mod summary;
pub mod table;

pub use calculator::{
    compute_pricing, compute_pricing_from_input, compute_pricing_in, default_selection,
    parse_requested_count, select_plan, PricingError,
};
pub use models::{Labels, Locale, Plan, PlanKey, PricingResult};
pub use summary::{BalanceBanner, QuoteSummary};
pub use table::{PlanTable, PlanTableError};
