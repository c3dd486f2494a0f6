use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A follow-up call record ("seguimiento") for a beneficiary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct FollowUp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "beneficiaryId", skip_serializing_if = "Option::is_none")]
    pub beneficiary_id: Option<String>,
    /// ISO date string as stored by the backend; kept opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// E-mail of the operator who logged the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let f = FollowUp {
            id: Some("s-1".into()),
            beneficiary_id: Some("b-1".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&f).unwrap();
        assert_eq!(value, json!({"id": "s-1", "beneficiaryId": "b-1"}));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({"id": "s-2", "durationSeconds": 340});
        let parsed: FollowUp = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }
}
