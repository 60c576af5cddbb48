//! Canonical form of the domains fed to the enrichment pipeline.
//!
//! A [`Domain`] is lowercase, scheme-less, without a leading `www.`, cut to
//! at most its last three labels, and always ends in `.br`. The three-label
//! cut is a heuristic for the usual `name.com.br` shape, not a public suffix
//! lookup: `shop.example.br` stays whole while `a.b.example.br` becomes
//! `b.example.br`.

use url::Url;

const NATIONAL_SUFFIX: &str = ".br";
const MAX_LABELS: usize = 3;

/// A normalized domain; the uniqueness key of the enrichment store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(String);

impl Domain {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a raw domain string, returning `None` when it does not reduce
/// to a `.br` domain.
///
/// Steps: trim, lowercase, drop a leading `http://`/`https://`, drop trailing
/// slashes, drop one leading `www.`, keep only the host part of what remains,
/// then keep at most the last three labels. Internationalized names stay in
/// Unicode.
#[must_use]
pub fn normalize_domain(raw: &str) -> Option<Domain> {
    let lowered = raw.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let without_slash = without_scheme.trim_end_matches('/');
    let without_www = without_slash.strip_prefix("www.").unwrap_or(without_slash);

    let host = authority_host(without_www);
    // The url parser only validates; its host would be punycode for IDNs.
    Url::parse(&format!("http://{host}")).ok()?.host_str()?;

    let labels: Vec<&str> = host.split('.').collect();
    let kept = if labels.len() > 2 {
        labels[labels.len().saturating_sub(MAX_LABELS)..].join(".")
    } else {
        labels.join(".")
    };

    kept.ends_with(NATIONAL_SUFFIX).then(|| Domain(kept))
}

/// The host part of an authority, as written: path, query and fragment are
/// cut, then any credentials and port.
fn authority_host(value: &str) -> &str {
    let authority = value.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    host_port.split(':').next().unwrap_or_default()
}

/// Normalizes every raw value, silently dropping the ones that are rejected.
///
/// Input order is kept and repeated domains are not collapsed here.
pub fn normalize_domains<I, S>(raw: I) -> Vec<Domain>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|value| normalize_domain(value.as_ref()))
        .collect()
}

#[cfg(test)]
#[path = "domain_test.rs"]
mod tests;
