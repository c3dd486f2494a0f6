use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A beneficiary record as delivered by the backend.
///
/// The dashboard only needs a handful of fields for display; everything
/// else the document carries is preserved verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Beneficiary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

impl Beneficiary {
    /// Display label: full name when present, otherwise the document id.
    pub fn label(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(unnamed)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_record_roundtrips_exactly() {
        let raw = json!({"id": "1"});
        let parsed: Beneficiary = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("1"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "id": "b-7",
            "fullName": "Carmen Ruiz",
            "municipio": "Sevilla",
            "riskLevel": 2
        });
        let parsed: Beneficiary = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed.extra.get("municipio"), Some(&json!("Sevilla")));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let b = Beneficiary {
            id: Some("b-1".into()),
            ..Default::default()
        };
        assert_eq!(b.label(), "b-1");
    }
}
