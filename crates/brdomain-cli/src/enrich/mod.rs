//! The `enrich` command: plan which domains still need a lookup, then walk
//! them one at a time under the pacing policy, saving each success.

mod pacing;
mod pipeline;

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use brdomain_core::{normalize_domains, AppConfig, Domain};
use brdomain_registry::RegistryClient;
use brdomain_store::CsvStore;
use tokio::time::Instant;

use pacing::{PacingPolicy, RunContext};
use pipeline::enrich_domain;

/// Normalized input split against the store's existing keys.
pub(crate) struct RunPlan {
    pub store: CsvStore,
    /// Domains to look up, in input order, each at most once.
    pub pending: Vec<Domain>,
    pub already_present: usize,
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub pending: usize,
    pub already_present: usize,
    pub saved: usize,
    pub failed: usize,
}

/// Reads and normalizes the input, loads the store and keeps only the
/// domains it does not contain yet.
///
/// # Errors
///
/// Fails when the input file is missing or unreadable, or the existing
/// store cannot be parsed. Nothing has been looked up at that point.
pub(crate) fn plan_run(input: &Path, output: &Path) -> anyhow::Result<RunPlan> {
    let raw = crate::input::read_domain_column(input)?;
    let domains = normalize_domains(&raw);
    tracing::info!(
        raw = raw.len(),
        normalized = domains.len(),
        "normalized input domains"
    );

    let store = CsvStore::open(output)
        .with_context(|| format!("failed to load existing results from {}", output.display()))?;
    let (pending, already_present) = pending_domains(domains, &store.domains());

    Ok(RunPlan {
        store,
        pending,
        already_present,
    })
}

/// Drops domains already in the store and repeats within the input, keeping
/// first-appearance order. Returns the remaining domains and how many were
/// skipped because the store already had them.
fn pending_domains(domains: Vec<Domain>, known: &HashSet<String>) -> (Vec<Domain>, usize) {
    let mut seen = HashSet::new();
    let mut already_present = 0;
    let mut pending = Vec::new();

    for domain in domains {
        if !seen.insert(domain.clone()) {
            continue;
        }
        if known.contains(domain.as_str()) {
            tracing::info!(%domain, "already present in results, skipping");
            already_present += 1;
            continue;
        }
        pending.push(domain);
    }

    (pending, already_present)
}

pub(crate) fn build_registry_client(config: &AppConfig) -> anyhow::Result<RegistryClient> {
    RegistryClient::with_base_urls(
        config.request_timeout_secs,
        &config.user_agent,
        &config.rdap_base_url,
        &config.receitaws_base_url,
    )
    .context("failed to build registry client")
}

/// Builds the client and pacing policy from `config` and runs the plan.
///
/// # Errors
///
/// Fails if the client cannot be built or a save cannot be written.
pub(crate) async fn execute_plan(config: &AppConfig, plan: RunPlan) -> anyhow::Result<RunSummary> {
    let client = build_registry_client(config)?;
    let pacing = PacingPolicy::from_config(config);
    let RunPlan {
        mut store,
        pending,
        already_present,
    } = plan;

    let mut summary = run_pending(&client, &pacing, &mut store, &pending).await?;
    summary.already_present = already_present;

    tracing::info!(
        pending = summary.pending,
        already_present = summary.already_present,
        saved = summary.saved,
        failed = summary.failed,
        "enrichment run finished"
    );
    Ok(summary)
}

/// The sequential run loop.
///
/// A failed domain is logged and the loop moves on; only a failed store
/// write stops the run, leaving the last successful save as the resume
/// point.
async fn run_pending(
    client: &RegistryClient,
    pacing: &PacingPolicy,
    store: &mut CsvStore,
    pending: &[Domain],
) -> anyhow::Result<RunSummary> {
    let mut ctx = RunContext::default();
    let mut summary = RunSummary {
        pending: pending.len(),
        ..RunSummary::default()
    };

    for domain in pending {
        let started = Instant::now();
        tracing::info!(%domain, "processing domain");

        let saved = match enrich_domain(client, pacing, domain).await {
            Ok(row) => {
                store
                    .upsert(row)
                    .with_context(|| format!("failed to save results for {domain}"))?;
                ctx.record_success();
                summary.saved += 1;
                tracing::info!(%domain, "results saved");
                true
            }
            Err(failure) => {
                if failure.is_validation() {
                    tracing::warn!(%domain, reason = %failure, "domain skipped");
                } else {
                    tracing::error!(%domain, error = %failure, "domain failed");
                }
                summary.failed += 1;
                false
            }
        };

        pacing.hold_floor(started).await;
        if saved {
            pacing.after_success(&ctx).await;
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "enrich_test.rs"]
mod tests;
