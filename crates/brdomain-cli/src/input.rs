//! Reading the raw domain list from the input CSV.

use std::path::Path;

use anyhow::Context;

/// Returns the first column of every record after the header row.
///
/// Records may have any number of columns; blank lines are skipped. Values
/// are returned untouched and left to the normalizer.
///
/// # Errors
///
/// Fails if the file cannot be opened or a record cannot be decoded; either
/// aborts the run before any lookup.
pub(crate) fn read_domain_column(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read input file {}", path.display()))?;
        if let Some(first) = record.get(0) {
            values.push(first.to_owned());
        }
    }

    tracing::debug!(path = %path.display(), rows = values.len(), "read input domains");
    Ok(values)
}
