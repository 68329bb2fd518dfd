use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pricing tier identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKey {
    #[serde(alias = "arrancador")]
    Starter,
    #[serde(alias = "profesional")]
    Professional,
    #[serde(alias = "dominador")]
    Dominator,
}

impl PlanKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKey::Starter => "starter",
            PlanKey::Professional => "professional",
            PlanKey::Dominator => "dominator",
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starter" | "arrancador" => Ok(PlanKey::Starter),
            "professional" | "profesional" => Ok(PlanKey::Professional),
            "dominator" | "dominador" => Ok(PlanKey::Dominator),
            other => Err(format!("unknown plan: {}", other)),
        }
    }
}

/// Display language for plan labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Negotiate a locale from an `Accept-Language` header value.
    ///
    /// A missing header falls back to Spanish. A header that names neither
    /// supported language falls back to English.
    pub fn negotiate(accept_language: Option<&str>) -> Locale {
        let header = match accept_language {
            Some(h) if !h.trim().is_empty() => h,
            _ => return Locale::Es,
        };

        let mut best: Option<(Locale, f32)> = None;
        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let primary = tag.split('-').next().unwrap_or("");
            let locale = match primary {
                "en" => Locale::En,
                "es" => Locale::Es,
                _ => continue,
            };

            if quality <= 0.0 {
                continue;
            }
            match best {
                Some((_, q)) if q >= quality => {}
                _ => best = Some((locale, quality)),
            }
        }

        best.map(|(locale, _)| locale).unwrap_or(Locale::En)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

/// Localized label pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub en: String,
    pub es: String,
}

impl Labels {
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            es: es.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }
}

/// A pricing tier
///
/// The tier covers `[base_prospects, upper_bound]`; `upper_bound = None`
/// marks the open-ended top tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub key: PlanKey,
    pub base_prospects: u32,
    pub base_cost: Decimal,
    pub extra_cost_per_prospect: Decimal,
    #[serde(default)]
    pub upper_bound: Option<u32>,
    pub labels: Labels,
}

impl Plan {
    pub fn contains(&self, prospects: i64) -> bool {
        prospects >= i64::from(self.base_prospects)
            && self
                .upper_bound
                .map_or(true, |upper| prospects <= i64::from(upper))
    }

    pub fn label(&self, locale: Locale) -> &str {
        self.labels.get(locale)
    }
}

/// Outcome of a single pricing computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub plan_key: PlanKey,
    pub display_name: String,
    pub is_custom: bool,
    pub prospects: i64,
    pub extra_prospects: i64,
    pub total_cost: Decimal,
    pub affordable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_key_accepts_legacy_identifiers() {
        let key: PlanKey = serde_json::from_str("\"arrancador\"").unwrap();
        assert_eq!(key, PlanKey::Starter);
        assert_eq!("Profesional".parse::<PlanKey>().unwrap(), PlanKey::Professional);
        assert_eq!("dominator".parse::<PlanKey>().unwrap(), PlanKey::Dominator);
        assert!("platinum".parse::<PlanKey>().is_err());
    }

    #[test]
    fn test_plan_key_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PlanKey::Professional).unwrap(), "\"professional\"");
    }

    #[test]
    fn test_locale_missing_header_is_spanish() {
        assert_eq!(Locale::negotiate(None), Locale::Es);
        assert_eq!(Locale::negotiate(Some("")), Locale::Es);
    }

    #[test]
    fn test_locale_unsupported_header_is_english() {
        assert_eq!(Locale::negotiate(Some("fr-FR,de;q=0.8")), Locale::En);
    }

    #[test]
    fn test_locale_picks_highest_quality() {
        assert_eq!(Locale::negotiate(Some("en-US;q=0.5,es-MX;q=0.9")), Locale::Es);
        assert_eq!(Locale::negotiate(Some("es;q=0.3, en")), Locale::En);
        assert_eq!(Locale::negotiate(Some("fr, es-AR")), Locale::Es);
    }

    #[test]
    fn test_locale_ignores_zero_quality() {
        assert_eq!(Locale::negotiate(Some("es;q=0, en;q=0.1")), Locale::En);
    }
}
