//! Flattening of raw registry payloads into [`OwnershipRecord`] and
//! [`CompanyRecord`].
//!
//! Both functions are pure and total: absent, null or wrongly shaped data
//! resolves to [`NOT_AVAILABLE`] and never to an error.

use brdomain_core::{CompanyRecord, OwnershipRecord, Partner, NOT_AVAILABLE};
use serde_json::Value;

use crate::types::{parse_entities, property_name, property_text, RdapEntity};

const REGISTRANT_ROLE: &str = "registrant";
const MAX_PARTNERS: usize = 2;

/// Extracts registrant name, taxpayer id and contact email from an RDAP
/// domain response.
///
/// A payload carrying an `"error"` key yields [`OwnershipRecord::error`].
/// The taxpayer id and name come from the first entity with the
/// `registrant` role that has them; the email is the first `email` jCard
/// property found among the sub-entities of any entity.
#[must_use]
pub fn extract_ownership(raw: &Value) -> OwnershipRecord {
    if raw.get("error").is_some() {
        return OwnershipRecord::error();
    }

    let entities = raw
        .get("entities")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .map(parse_entities)
        .unwrap_or_default();

    let mut taxpayer_id = None;
    let mut registrant_name = None;
    let mut contact_email = None;

    for entity in &entities {
        if entity.has_role(REGISTRANT_ROLE) {
            if registrant_name.is_none() {
                registrant_name = display_name(entity);
            }
            if taxpayer_id.is_none() {
                taxpayer_id = taxpayer_id_of(entity);
            }
        }

        if contact_email.is_none() {
            contact_email = entity.sub_entities().iter().find_map(first_email);
        }
    }

    OwnershipRecord {
        taxpayer_id,
        contact_email: contact_email.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        registrant_name: registrant_name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        is_error: false,
    }
}

/// The jCard `fn` value, falling back to the value of the second property
/// (where registro.br places `fn`).
fn display_name(entity: &RdapEntity) -> Option<String> {
    let properties = entity.vcard_properties();
    properties
        .iter()
        .find(|p| property_name(p) == Some("fn"))
        .or_else(|| properties.get(1))
        .and_then(property_text)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

fn taxpayer_id_of(entity: &RdapEntity) -> Option<String> {
    entity
        .public_ids()
        .into_iter()
        .find(|id| id.kind.eq_ignore_ascii_case("cpf") || id.kind.eq_ignore_ascii_case("cnpj"))
        .map(|id| id.identifier)
        .filter(|id| !id.is_empty())
}

fn first_email(entity: &RdapEntity) -> Option<String> {
    entity
        .vcard_properties()
        .iter()
        .find(|p| property_name(p) == Some("email"))
        .and_then(property_text)
        .filter(|email| !email.is_empty())
        .map(str::to_owned)
}

/// Extracts company name, address parts, contacts and up to two partners
/// from a ReceitaWS response.
#[must_use]
pub fn extract_company(raw: &Value) -> CompanyRecord {
    let field = |key: &str| text_or_sentinel(raw.get(key));

    let partners = raw
        .get("qsa")
        .and_then(Value::as_array)
        .map(|qsa| {
            qsa.iter()
                .take(MAX_PARTNERS)
                .map(|partner| Partner {
                    name: text_or_sentinel(partner.get("nome")),
                    role: text_or_sentinel(partner.get("qual")),
                })
                .collect()
        })
        .unwrap_or_default();

    CompanyRecord {
        name: field("nome"),
        street: field("logradouro"),
        number: field("numero"),
        district: field("bairro"),
        municipality: field("municipio"),
        state: field("uf"),
        phone: field("telefone"),
        email: field("email"),
        partners,
    }
}

/// Strings are kept verbatim and numbers rendered; anything else is the
/// sentinel.
fn text_or_sentinel(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
