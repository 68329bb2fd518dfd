use crate::pricing::PlanKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Campaign identifier as issued by the backend (numeric or textual)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CampaignId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignId::Number(n) => write!(f, "{}", n),
            CampaignId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Ids taken from a request path: ASCII letters, digits, `-` and `_` only
impl FromStr for CampaignId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(format!("invalid campaign id: {:?}", s));
        }

        Ok(s.parse::<i64>()
            .map(CampaignId::Number)
            .unwrap_or_else(|_| CampaignId::Text(s.to_string())))
    }
}

/// Response of `GET /api/dashboard-data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Kpis>,
    #[serde(default)]
    pub campanas: Vec<CampaignSummary>,
}

/// Headline counters shown above the campaign table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kpis {
    /// Prospects found
    #[serde(default)]
    pub total: u64,
    /// Qualified leads
    #[serde(default)]
    pub calificados: u64,
    /// Qualification rate, formatted by the backend
    #[serde(default)]
    pub tasa: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of the campaign table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub id: CampaignId,
    pub nombre: String,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub encontrados: u64,
    #[serde(default)]
    pub calificados: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full campaign record returned by `GET /api/campana/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDetail {
    pub id: CampaignId,
    pub nombre: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Campaign brief entered on the "create campaign" tab
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignDetails {
    pub nombre: String,
    pub que_vende: String,
    pub a_quien: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idiomas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_producto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competidores_principales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objetivo_cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dolores_pain_points: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tono_marca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_constitution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_blackboard: Option<String>,
    #[serde(default = "default_product_type")]
    pub tipo_producto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enlace: Option<String>,
}

fn default_product_type() -> String {
    "tangible".to_string()
}

impl CampaignDetails {
    /// Check the fields the orchestrator cannot start without
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("nombre", &self.nombre),
            ("que_vende", &self.que_vende),
            ("a_quien", &self.a_quien),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing required fields: {}", missing.join(", ")))
        }
    }
}

/// Body sent to `POST /api/crear-campana` once the quote is affordable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    #[serde(flatten)]
    pub details: CampaignDetails,
    pub prospectos_dia: i64,
    pub plan: PlanKey,
    pub costo_total: Decimal,
}

/// Body of `POST /api/actualizar-campana`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub id: Option<CampaignId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pizarron: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competidores: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dolores: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tono: Option<String>,
}

/// `{success, error?}` acknowledgement used by the campaign endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dashboard_data_tolerates_unknown_fields() {
        let data: DashboardData = serde_json::from_value(json!({
            "kpis": {"total": 120, "calificados": 18, "tasa": "15%", "costo": 3.5},
            "campanas": [{
                "id": 7,
                "nombre": "Ferreterías CDMX",
                "fecha": "2025-11-02",
                "estado": "active",
                "encontrados": 120,
                "calificados": 18,
                "origen": "gmaps"
            }]
        }))
        .unwrap();

        let kpis = data.kpis.unwrap();
        assert_eq!(kpis.total, 120);
        assert_eq!(kpis.tasa, json!("15%"));
        assert_eq!(kpis.extra["costo"], json!(3.5));
        assert_eq!(data.campanas[0].id, CampaignId::Number(7));
        assert_eq!(data.campanas[0].estado, "active");
        assert_eq!(data.campanas[0].extra["origen"], json!("gmaps"));
    }

    #[test]
    fn test_campaign_id_accepts_text() {
        let id: CampaignId = serde_json::from_value(json!("c-91")).unwrap();
        assert_eq!(id.to_string(), "c-91");
    }

    #[test]
    fn test_campaign_id_from_path_segment() {
        assert_eq!("42".parse::<CampaignId>(), Ok(CampaignId::Number(42)));
        assert_eq!(
            "c_91-b".parse::<CampaignId>(),
            Ok(CampaignId::Text("c_91-b".to_string()))
        );
        for bad in ["", "../dashboard-data", "7/../../chat", "7?x=1", "a b", "%2F"] {
            assert!(bad.parse::<CampaignId>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_details_default_product_type() {
        let details: CampaignDetails = serde_json::from_value(json!({
            "nombre": "Spa",
            "que_vende": "masajes",
            "a_quien": "oficinistas"
        }))
        .unwrap();
        assert_eq!(details.tipo_producto, "tangible");
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_details_validate_lists_missing_fields() {
        let details = CampaignDetails {
            nombre: "  ".to_string(),
            que_vende: "seguros".to_string(),
            ..Default::default()
        };
        assert_eq!(
            details.validate().unwrap_err(),
            "missing required fields: nombre, a_quien"
        );
    }

    #[test]
    fn test_new_campaign_flattens_details() {
        let campaign = NewCampaign {
            details: CampaignDetails {
                nombre: "Dental".to_string(),
                que_vende: "implantes".to_string(),
                a_quien: "clínicas".to_string(),
                tipo_producto: "servicio".to_string(),
                ..Default::default()
            },
            prospectos_dia: 15,
            plan: PlanKey::Professional,
            costo_total: rust_decimal_macros::dec!(399.00),
        };

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(value["nombre"], "Dental");
        assert_eq!(value["prospectos_dia"], 15);
        assert_eq!(value["plan"], "professional");
        assert!(value.get("whatsapp").is_none());
    }
}
