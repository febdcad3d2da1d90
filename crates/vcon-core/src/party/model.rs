//! Party domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CivicAddress;
use crate::Extensions;
use crate::error::{Result, VConError};

/// A participant in the conversation.
///
/// No field is required. Absent fields are omitted from the JSON document
/// and unknown fields survive a parse/serialize cycle through `extensions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Party {
    /// Telephone URI or number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    /// STIR PASSporT for the telephone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// How the party's identity was validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    /// GML position ("lat lon")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmlpos: Option<String>,
    #[serde(
        rename = "civicaddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub civic_address: Option<CivicAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Role in the conversation (e.g. "agent", "customer")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    /// Fields this version does not model, re-emitted verbatim
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Party {
    /// Creates an empty party.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a party from a loosely-typed JSON object.
    ///
    /// Recognized keys must carry the expected type; everything else is kept
    /// in `extensions`.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| VConError::validation("party", e.to_string()))
    }

    pub fn with_tel(mut self, tel: impl Into<String>) -> Self {
        self.tel = Some(tel.into());
        self
    }

    pub fn with_mailto(mut self, mailto: impl Into<String>) -> Self {
        self.mailto = Some(mailto.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_fields_sets_known_fields() {
        let party = Party::from_fields(object(json!({
            "tel": "+1234567890",
            "name": "John Doe",
            "contact_list": "support",
        })))
        .unwrap();

        assert_eq!(party.tel.as_deref(), Some("+1234567890"));
        assert_eq!(party.name.as_deref(), Some("John Doe"));
        assert_eq!(party.contact_list.as_deref(), Some("support"));
        assert!(party.extensions.is_empty());
    }

    #[test]
    fn test_from_fields_keeps_unknown_keys() {
        let party = Party::from_fields(object(json!({
            "name": "Jane",
            "sip": "sip:jane@example.com",
        })))
        .unwrap();

        assert_eq!(party.extensions.get("sip"), Some(&json!("sip:jane@example.com")));
        let out = serde_json::to_value(&party).unwrap();
        assert_eq!(out, json!({"name": "Jane", "sip": "sip:jane@example.com"}));
    }

    #[test]
    fn test_from_fields_rejects_wrong_type() {
        let err = Party::from_fields(object(json!({"tel": 42}))).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let party = Party::new().with_mailto("a@example.com");
        let out = serde_json::to_string(&party).unwrap();
        assert_eq!(out, r#"{"mailto":"a@example.com"}"#);
    }

    #[test]
    fn test_civic_address_wire_name() {
        let party = Party {
            civic_address: Some(CivicAddress {
                country: Some("US".to_string()),
                locality: Some("Springfield".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let out = serde_json::to_value(&party).unwrap();
        assert_eq!(
            out,
            json!({"civicaddress": {"country": "US", "locality": "Springfield"}})
        );
    }
}
