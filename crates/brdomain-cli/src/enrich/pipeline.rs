//! Per-domain enrichment: ownership lookup → taxpayer id check → company
//! lookup → composed row.
//!
//! Each step either advances or stops the domain with a [`DomainFailure`];
//! persistence is left to the caller so a failure here never touches the
//! store.

use brdomain_core::{sanitize_taxpayer_id, Cnpj, Domain, EnrichmentRow};
use brdomain_registry::{extract_company, extract_ownership, RegistryClient, RegistryError};
use thiserror::Error;

use super::pacing::PacingPolicy;

/// Why a domain was not enriched in this run.
///
/// None of these are persisted, so every domain that failed is looked up
/// again on the next run.
#[derive(Debug, Error)]
pub(crate) enum DomainFailure {
    #[error("ownership lookup failed: {0}")]
    OwnershipLookup(#[source] RegistryError),

    #[error("ownership lookup returned an error payload")]
    OwnershipPayload,

    #[error("taxpayer id not found in ownership data")]
    TaxpayerIdNotFound,

    #[error("taxpayer id {sanitized:?} is not a valid company id (CNPJ)")]
    NotCompanyId { sanitized: String },

    #[error("company lookup failed: {0}")]
    CompanyLookup(#[source] RegistryError),
}

impl DomainFailure {
    /// Data outcomes (no CNPJ to follow) rather than transport errors.
    pub(crate) fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainFailure::TaxpayerIdNotFound | DomainFailure::NotCompanyId { .. }
        )
    }
}

/// Runs both lookups for `domain` and flattens them into a row.
///
/// The settle delay follows each registry call whether it succeeded or not.
/// The company lookup is only attempted for a 14-digit taxpayer id.
pub(crate) async fn enrich_domain(
    client: &RegistryClient,
    pacing: &PacingPolicy,
    domain: &Domain,
) -> Result<EnrichmentRow, DomainFailure> {
    let ownership_raw = client.lookup_ownership(domain).await;
    pacing.settle().await;
    let ownership = extract_ownership(&ownership_raw.map_err(DomainFailure::OwnershipLookup)?);
    if ownership.is_error {
        return Err(DomainFailure::OwnershipPayload);
    }
    tracing::info!(%domain, "ownership data retrieved");

    let raw_id = ownership
        .taxpayer_id
        .as_deref()
        .ok_or(DomainFailure::TaxpayerIdNotFound)?;
    let cnpj = Cnpj::from_taxpayer_id(raw_id).ok_or_else(|| DomainFailure::NotCompanyId {
        sanitized: sanitize_taxpayer_id(raw_id),
    })?;

    let company_raw = client.lookup_company(&cnpj).await;
    pacing.settle().await;
    let company = extract_company(&company_raw.map_err(DomainFailure::CompanyLookup)?);

    Ok(EnrichmentRow::compose(domain, &ownership, &company))
}
