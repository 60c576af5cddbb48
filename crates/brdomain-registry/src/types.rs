//! View types over the RDAP domain response.
//!
//! Only the parts consumed by [`crate::extract`] are modelled. Nested lists
//! stay as raw JSON so each element is parsed on its own; one malformed
//! entity or identifier never hides its well-formed siblings.

use serde::Deserialize;
use serde_json::Value;

/// An RDAP entity (registrant, contacts, registrar...).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RdapEntity {
    pub roles: Vec<String>,
    /// jCard: `["vcard", [[name, params, type, value], ...]]`.
    pub vcard_array: Option<Value>,
    pub public_ids: Vec<Value>,
    pub entities: Vec<Value>,
}

impl RdapEntity {
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// The jCard property list, or an empty slice when the card is absent
    /// or not shaped like a jCard.
    #[must_use]
    pub fn vcard_properties(&self) -> &[Value] {
        self.vcard_array
            .as_ref()
            .and_then(|card| card.get(1))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Nested entities that parse; the rest are skipped.
    #[must_use]
    pub fn sub_entities(&self) -> Vec<RdapEntity> {
        parse_entities(&self.entities)
    }

    /// Public identifiers that parse; the rest are skipped.
    #[must_use]
    pub fn public_ids(&self) -> Vec<RdapPublicId> {
        self.public_ids
            .iter()
            .filter_map(|v| RdapPublicId::deserialize(v).ok())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RdapPublicId {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// Parses each element of an RDAP `entities` list independently.
#[must_use]
pub fn parse_entities(items: &[Value]) -> Vec<RdapEntity> {
    items
        .iter()
        .filter_map(|v| RdapEntity::deserialize(v).ok())
        .collect()
}

/// Name of a jCard property (`"fn"`, `"email"`, ...).
#[must_use]
pub fn property_name(property: &Value) -> Option<&str> {
    property.get(0).and_then(Value::as_str)
}

/// Text value of a jCard property (its fourth element).
#[must_use]
pub fn property_text(property: &Value) -> Option<&str> {
    property.get(3).and_then(Value::as_str)
}
