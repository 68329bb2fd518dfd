use crate::models::campaign::{Ack, CampaignDetails};
use crate::pricing::{
    parse_requested_count, Locale, Plan, PlanKey, PricingError, PricingResult, QuoteSummary,
};
use crate::session::{Balance, Role};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 2^63, the first float magnitude that no longer fits in an `i64`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Prospect count as submitted by a form: a JSON number or the raw text
/// of the input field.
///
/// Fractional and out-of-range numbers deserialize as `Float` so they are
/// reported as `NotANumber` instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(i64),
    Float(f64),
    Text(String),
}

impl RawCount {
    pub fn parse(&self) -> Result<i64, PricingError> {
        match self {
            RawCount::Number(n) => Ok(*n),
            RawCount::Float(f) if f.fract() == 0.0 && f.abs() < I64_LIMIT => Ok(*f as i64),
            RawCount::Float(f) => Err(PricingError::NotANumber {
                input: f.to_string(),
            }),
            RawCount::Text(text) => parse_requested_count(text),
        }
    }
}

/// Body of `POST /api/pricing/quote`
///
/// `plan` prices a plan card at its base count and wins over `prospects`.
/// An empty body returns the default selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub prospects: Option<RawCount>,
    #[serde(default)]
    pub plan: Option<PlanKey>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub summary: QuoteSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PricingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<PricingError>,
}

impl QuoteResponse {
    pub fn from_outcome(outcome: Result<PricingResult, PricingError>, balance: Balance) -> Self {
        let summary = QuoteSummary::from_outcome(&outcome, balance);
        match outcome {
            Ok(result) => Self {
                summary,
                result: Some(result),
                validation_error: None,
            },
            Err(err) => Self {
                summary,
                result: None,
                validation_error: Some(err),
            },
        }
    }
}

/// A plan as listed by `GET /api/plans`
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub key: PlanKey,
    pub label: String,
    pub base_prospects: u32,
    pub upper_bound: Option<u32>,
    pub base_cost: Decimal,
    pub extra_cost_per_prospect: Decimal,
}

impl PlanView {
    pub fn new(plan: &Plan, locale: Locale) -> Self {
        Self {
            key: plan.key,
            label: plan.label(locale).to_string(),
            base_prospects: plan.base_prospects,
            upper_bound: plan.upper_bound,
            base_cost: plan.base_cost,
            extra_cost_per_prospect: plan.extra_cost_per_prospect,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlansResponse {
    pub locale: Locale,
    pub min_prospects: u32,
    pub plans: Vec<PlanView>,
}

/// Body of `POST /api/campaigns/launch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRequest {
    #[serde(flatten)]
    pub details: CampaignDetails,
    pub prospectos_dia: RawCount,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaunchResponse {
    pub request_id: String,
    pub plan: PlanKey,
    pub prospectos_dia: i64,
    pub total_cost: Decimal,
    #[serde(flatten)]
    pub ack: Ack,
}

/// Response of `GET /api/session`
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub account: String,
    pub role: Role,
    pub balance: Balance,
    pub balance_display: String,
    pub locale: Locale,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_count_accepts_numbers_and_text() {
        let number: RawCount = serde_json::from_value(json!(15)).unwrap();
        assert_eq!(number.parse(), Ok(15));

        let text: RawCount = serde_json::from_value(json!(" 22 ")).unwrap();
        assert_eq!(text.parse(), Ok(22));

        let junk: RawCount = serde_json::from_value(json!("abc")).unwrap();
        assert!(matches!(junk.parse(), Err(PricingError::NotANumber { .. })));
    }

    #[test]
    fn test_raw_count_non_integer_numbers() {
        let whole: RawCount = serde_json::from_value(json!(15.0)).unwrap();
        assert_eq!(whole.parse(), Ok(15));

        for value in [json!(4.5), json!(1e20), json!(-1e300), json!(18446744073709551615u64)] {
            let count: RawCount = serde_json::from_value(value.clone()).unwrap();
            assert!(
                matches!(count.parse(), Err(PricingError::NotANumber { .. })),
                "{} parsed as {:?}",
                value,
                count.parse()
            );
        }

        let request: QuoteRequest = serde_json::from_str(r#"{"prospects": 4.5}"#).unwrap();
        assert!(matches!(request.prospects, Some(RawCount::Float(_))));
    }

    #[test]
    fn test_quote_request_empty_body() {
        let request: QuoteRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.prospects.is_none());
        assert!(request.plan.is_none());
    }

    #[test]
    fn test_launch_request_flattens_details() {
        let request: LaunchRequest = serde_json::from_value(json!({
            "nombre": "Zapatería Veloz",
            "que_vende": "tenis",
            "a_quien": "corredores",
            "prospectos_dia": "14"
        }))
        .unwrap();
        assert_eq!(request.details.nombre, "Zapatería Veloz");
        assert_eq!(request.prospectos_dia.parse(), Ok(14));
    }
}
