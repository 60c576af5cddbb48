//! Flat records produced by the registry lookups and the persisted row built
//! from them.
//!
//! Every textual field is always populated: missing upstream data is the
//! [`NOT_AVAILABLE`] sentinel, never an empty `Option`, so the persisted
//! column set stays stable whatever the registries return.

use serde::{Deserialize, Serialize};

use crate::domain::Domain;

pub const NOT_AVAILABLE: &str = "Not available";
pub const ERROR_SENTINEL: &str = "Error";

const CNPJ_DIGITS: usize = 14;

/// Fields pulled from the ownership (RDAP) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRecord {
    /// Raw CPF/CNPJ as published, possibly with `.`, `/` and `-`.
    pub taxpayer_id: Option<String>,
    pub contact_email: String,
    pub registrant_name: String,
    pub is_error: bool,
}

impl OwnershipRecord {
    /// Record standing in for a lookup that reported an error.
    #[must_use]
    pub fn error() -> Self {
        Self {
            taxpayer_id: Some(ERROR_SENTINEL.to_string()),
            contact_email: ERROR_SENTINEL.to_string(),
            registrant_name: ERROR_SENTINEL.to_string(),
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub role: String,
}

/// Fields pulled from the company registry (ReceitaWS) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub municipality: String,
    pub state: String,
    pub phone: String,
    pub email: String,
    /// At most two entries.
    pub partners: Vec<Partner>,
}

impl CompanyRecord {
    /// Street, number, district, municipality and state joined with `", "`.
    #[must_use]
    pub fn address(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.street, self.number, self.district, self.municipality, self.state
        )
    }

    fn partner_field(&self, index: usize, field: impl Fn(&Partner) -> &str) -> String {
        self.partners
            .get(index)
            .map_or(NOT_AVAILABLE, field)
            .to_string()
    }
}

/// Strips every character that is not an ASCII digit.
#[must_use]
pub fn sanitize_taxpayer_id(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// A company-grade (14 digit) taxpayer id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cnpj(String);

impl Cnpj {
    /// Sanitizes `raw` and accepts it only when exactly 14 digits remain.
    ///
    /// Individual ids (CPF, 11 digits) and anything else yield `None`.
    #[must_use]
    pub fn from_taxpayer_id(raw: &str) -> Option<Self> {
        let digits = sanitize_taxpayer_id(raw);
        (digits.len() == CNPJ_DIGITS).then_some(Self(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cnpj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted row; `domain` is the store key.
///
/// Serde names are the column headers of the output file. Missing columns
/// in an older file load as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentRow {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "CNPJ")]
    pub cnpj: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "RDAP Email")]
    pub rdap_email: String,
    #[serde(rename = "ReceitaWS Email")]
    pub receitaws_email: String,
    #[serde(rename = "Socio 1 Nome")]
    pub partner_1_name: String,
    #[serde(rename = "Socio 1 Cargo")]
    pub partner_1_role: String,
    #[serde(rename = "Socio 2 Nome")]
    pub partner_2_name: String,
    #[serde(rename = "Socio 2 Cargo")]
    pub partner_2_role: String,
}

impl EnrichmentRow {
    /// Column headers in file order.
    pub const COLUMNS: [&'static str; 11] = [
        "Domain",
        "CNPJ",
        "Company Name",
        "Address",
        "Phone",
        "RDAP Email",
        "ReceitaWS Email",
        "Socio 1 Nome",
        "Socio 1 Cargo",
        "Socio 2 Nome",
        "Socio 2 Cargo",
    ];

    /// Flattens both lookup records into the persisted row.
    #[must_use]
    pub fn compose(domain: &Domain, ownership: &OwnershipRecord, company: &CompanyRecord) -> Self {
        Self {
            domain: domain.to_string(),
            cnpj: ownership
                .taxpayer_id
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            company_name: company.name.clone(),
            address: company.address(),
            phone: company.phone.clone(),
            rdap_email: ownership.contact_email.clone(),
            receitaws_email: company.email.clone(),
            partner_1_name: company.partner_field(0, |p| p.name.as_str()),
            partner_1_role: company.partner_field(0, |p| p.role.as_str()),
            partner_2_name: company.partner_field(1, |p| p.name.as_str()),
            partner_2_role: company.partner_field(1, |p| p.role.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize_domain;

    fn company(partners: Vec<Partner>) -> CompanyRecord {
        CompanyRecord {
            name: "ACME LTDA".to_owned(),
            street: "RUA A".to_owned(),
            number: "10".to_owned(),
            district: "CENTRO".to_owned(),
            municipality: "SAO PAULO".to_owned(),
            state: "SP".to_owned(),
            phone: "(11) 5555-0000".to_owned(),
            email: "contato@acme.com.br".to_owned(),
            partners,
        }
    }

    fn ownership() -> OwnershipRecord {
        OwnershipRecord {
            taxpayer_id: Some("12.345.678/0001-90".to_owned()),
            contact_email: "hostmaster@acme.com.br".to_owned(),
            registrant_name: "ACME LTDA".to_owned(),
            is_error: false,
        }
    }

    #[test]
    fn sanitize_keeps_only_digits() {
        assert_eq!(sanitize_taxpayer_id("12.345.678/0001-90"), "12345678000190");
        assert_eq!(sanitize_taxpayer_id("Not available"), "");
    }

    #[test]
    fn cnpj_accepts_fourteen_digits() {
        let cnpj = Cnpj::from_taxpayer_id("12.345.678/0001-90").expect("valid CNPJ");
        assert_eq!(cnpj.as_str(), "12345678000190");
    }

    #[test]
    fn cnpj_rejects_cpf_length() {
        assert!(Cnpj::from_taxpayer_id("123.456.789-09").is_none());
    }

    #[test]
    fn cnpj_rejects_other_lengths() {
        assert!(Cnpj::from_taxpayer_id("").is_none());
        assert!(Cnpj::from_taxpayer_id("Not available").is_none());
        assert!(Cnpj::from_taxpayer_id("123456780001901").is_none());
    }

    #[test]
    fn address_joins_components_with_commas() {
        assert_eq!(company(vec![]).address(), "RUA A, 10, CENTRO, SAO PAULO, SP");
    }

    #[test]
    fn compose_fills_missing_partners_with_sentinel() {
        let domain = normalize_domain("acme.com.br").unwrap();
        let row = EnrichmentRow::compose(
            &domain,
            &ownership(),
            &company(vec![Partner {
                name: "FULANO".to_owned(),
                role: "Socio-Administrador".to_owned(),
            }]),
        );
        assert_eq!(row.domain, "acme.com.br");
        assert_eq!(row.cnpj, "12.345.678/0001-90");
        assert_eq!(row.company_name, "ACME LTDA");
        assert_eq!(row.rdap_email, "hostmaster@acme.com.br");
        assert_eq!(row.receitaws_email, "contato@acme.com.br");
        assert_eq!(row.partner_1_name, "FULANO");
        assert_eq!(row.partner_1_role, "Socio-Administrador");
        assert_eq!(row.partner_2_name, NOT_AVAILABLE);
        assert_eq!(row.partner_2_role, NOT_AVAILABLE);
    }

    #[test]
    fn error_record_uses_error_sentinel_everywhere() {
        let record = OwnershipRecord::error();
        assert!(record.is_error);
        assert_eq!(record.taxpayer_id.as_deref(), Some(ERROR_SENTINEL));
        assert_eq!(record.contact_email, ERROR_SENTINEL);
        assert_eq!(record.registrant_name, ERROR_SENTINEL);
    }
}
